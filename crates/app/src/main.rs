use anyhow::Context;

use salesguard_app::{Addons, AppConfig, Seed};
use salesguard_core::UserId;
use salesguard_inventory::{Location, MoveId, Picking, PickingId, StockMove};
use salesguard_products::ProductCatalog;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    salesguard_observability::init_with(config.log_format);

    let addons = Addons::new(config.alerts.clone());

    let Some(path) = config.seed.as_deref() else {
        tracing::warn!("SALESGUARD_SEED not set; no scenario to run");
        return Ok(());
    };
    let seed = Seed::load(path).with_context(|| format!("loading seed {}", path.display()))?;
    let seeded = seed.apply(&addons).context("applying seed")?;

    for quote in &seeded.quotes {
        let discount = addons.best_discount(quote.customer, quote.product, quote.quantity);
        tracing::info!(
            customer = quote.customer_key.as_deref().unwrap_or("-"),
            product = %quote.product_key,
            quantity = quote.quantity,
            discount,
            "best discount"
        );
    }

    let mut stock = addons.stock_service();
    for (product, on_hand) in &seeded.stock {
        stock.set_on_hand(*product, *on_hand)?;
    }

    let operator = UserId::new();
    for delivery in &seeded.deliveries {
        let mut picking = Picking::new(PickingId::new(), delivery.name.clone());
        picking.add_move(StockMove::new(
            MoveId::new(),
            delivery.product,
            delivery.quantity,
            Location::Internal,
            Location::Customer,
        )?)?;
        stock
            .validate_picking(&mut picking, operator)
            .with_context(|| format!("validating delivery {}", delivery.name))?;
    }

    let low = addons.low_stock(&stock);
    tracing::info!(
        alerts = addons.chatter.all().len(),
        low_stock = low.len(),
        "scenario finished"
    );
    for product in low {
        let category = addons.catalog.category(product.category());
        tracing::info!(
            product = %product.name(),
            category = category.as_ref().map_or("-", |c| c.name.as_str()),
            minimum = product.minimal_stock(),
            "below minimum stock"
        );
    }

    Ok(())
}
