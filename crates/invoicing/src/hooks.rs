use salesguard_core::DomainResult;
use salesguard_events::Listeners;

use crate::invoice::Invoice;

/// Extension point: an invoice is about to be posted.
///
/// Listeners may rewrite draft lines. Returning an error aborts the post.
pub trait InvoicePostListener: Send + Sync {
    fn before_post(&self, invoice: &mut Invoice) -> DomainResult<()>;
}

/// Registered invoicing lifecycle listeners.
#[derive(Debug, Clone, Default)]
pub struct InvoiceHooks {
    pub before_post: Listeners<dyn InvoicePostListener>,
}

impl InvoiceHooks {
    pub fn new() -> Self {
        Self::default()
    }
}
