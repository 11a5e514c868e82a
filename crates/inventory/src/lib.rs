//! Inventory module: on-hand quantities, stock moves and pickings.
//!
//! Completing moves updates the on-hand ledger and notifies the registered
//! [`MoveDoneListener`]s with the post-movement quantities.

pub mod hooks;
pub mod ledger;
pub mod moves;
pub mod service;

pub use hooks::{InventoryHooks, MoveCompletion, MoveDoneListener};
pub use ledger::{OnHand, StockLedger};
pub use moves::{Location, MoveId, MoveState, Picking, PickingId, StockMove};
pub use service::StockService;
