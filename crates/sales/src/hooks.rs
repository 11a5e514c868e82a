use salesguard_events::Listeners;
use salesguard_parties::PartyId;

use crate::order::SaleOrderLine;

/// Extension point: a sale order line's product, quantity or customer changed.
///
/// Listeners run synchronously, in registration order, while the order is
/// being edited. They may mutate the line.
pub trait SaleLineListener: Send + Sync {
    fn on_line_changed(&self, customer: Option<PartyId>, line: &mut SaleOrderLine);
}

/// Registered sales lifecycle listeners.
#[derive(Debug, Clone, Default)]
pub struct SalesHooks {
    pub line_changed: Listeners<dyn SaleLineListener>,
}

impl SalesHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fire_line_changed(&self, customer: Option<PartyId>, line: &mut SaleOrderLine) {
        for listener in self.line_changed.iter() {
            listener.on_line_changed(customer, line);
        }
    }
}
