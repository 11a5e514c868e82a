use salesguard_inventory::OnHand;
use salesguard_products::{Product, ProductCatalog};

/// A product with a positive minimum whose on-hand quantity is strictly below
/// that minimum. The product kind is not considered here; only completed moves
/// of stockable products raise alerts.
pub fn is_low_stock(product: &Product, on_hand: f64) -> bool {
    product.minimal_stock() > 0.0 && on_hand < product.minimal_stock()
}

/// Every catalog product currently below its minimum stock.
pub fn low_stock_products<C>(catalog: &C, on_hand: &dyn OnHand) -> Vec<Product>
where
    C: ProductCatalog + ?Sized,
{
    catalog
        .products()
        .into_iter()
        .filter(|p| is_low_stock(p, on_hand.on_hand(p.id_typed())))
        .collect()
}
