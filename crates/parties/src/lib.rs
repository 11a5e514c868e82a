//! Parties module: customers and their client types.
//!
//! A client type is a purely classificatory label; discount rules may target
//! it. Customers carry at most one.

pub mod client_type;
pub mod customer;
pub mod directory;

pub use client_type::{ClientType, ClientTypeId};
pub use customer::{Customer, PartyId};
pub use directory::{CustomerDirectory, InMemoryDirectory};
