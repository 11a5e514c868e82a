//! Sales Orders module.
//!
//! Orders are edited interactively; every product/quantity/customer change on
//! a line notifies the registered [`SaleLineListener`]s, which may rewrite the
//! line (e.g. its discount).

pub mod hooks;
pub mod order;

pub use hooks::{SaleLineListener, SalesHooks};
pub use order::{SaleOrder, SaleOrderId, SaleOrderLine, SaleOrderStatus};
