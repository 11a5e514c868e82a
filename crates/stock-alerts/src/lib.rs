//! Low-stock alerting.
//!
//! [`LowStockNotifier`] listens for completed stock moves and, when a stockable
//! product ends up below its minimum stock, notifies the acting user and
//! leaves a note on the picking, the product and the product template.

pub mod config;
pub mod notifier;
pub mod query;

pub use config::AlertConfig;
pub use notifier::LowStockNotifier;
pub use query::{is_low_stock, low_stock_products};
