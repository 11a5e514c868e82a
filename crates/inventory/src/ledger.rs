use std::collections::HashMap;

use salesguard_products::ProductId;

/// Read access to on-hand quantities.
pub trait OnHand {
    /// Quantity on hand in internal locations (0.0 when never stocked).
    fn on_hand(&self, product: ProductId) -> f64;
}

/// On-hand quantity per product across internal locations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockLedger {
    quantities: HashMap<ProductId, f64>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the on-hand quantity (initial inventory / adjustment).
    pub fn set(&mut self, product: ProductId, quantity: f64) {
        self.quantities.insert(product, quantity);
    }

    pub(crate) fn add(&mut self, product: ProductId, delta: f64) {
        *self.quantities.entry(product).or_insert(0.0) += delta;
    }
}

impl OnHand for StockLedger {
    fn on_hand(&self, product: ProductId) -> f64 {
        self.quantities.get(&product).copied().unwrap_or(0.0)
    }
}
