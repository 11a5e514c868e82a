//! Invoicing module: customer/vendor invoices and their posting lifecycle.
//!
//! Posting runs every registered [`InvoicePostListener`] before the invoice is
//! marked posted. A listener error aborts the post and leaves the invoice
//! untouched.

pub mod hooks;
pub mod invoice;

pub use hooks::{InvoiceHooks, InvoicePostListener};
pub use invoice::{Invoice, InvoiceId, InvoiceLine, InvoiceStatus, MoveType};
