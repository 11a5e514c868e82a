//! Composition root: wires the discount and low-stock add-ons into the host
//! extension points, backed by in-memory collaborators.

pub mod config;
pub mod seed;

use std::sync::Arc;

use salesguard_discounts::{
    DiscountPricing, InMemoryRuleRepository, InvoiceDiscount, PolicyAdmin, PolicyEvent, SaleLineDiscount,
};
use salesguard_events::InMemoryEventBus;
use salesguard_inventory::{InventoryHooks, OnHand, StockService};
use salesguard_invoicing::InvoiceHooks;
use salesguard_messaging::{BusNotificationSink, InMemoryChatter, Notification};
use salesguard_parties::{InMemoryDirectory, PartyId};
use salesguard_products::{InMemoryCatalog, Product, ProductId};
use salesguard_sales::SalesHooks;
use salesguard_stock_alerts::{AlertConfig, LowStockNotifier, low_stock_products};

pub use config::{AppConfig, ConfigError};
pub use seed::{Seed, SeedError, Seeded};

pub type Rules = Arc<InMemoryRuleRepository>;
pub type Catalog = Arc<InMemoryCatalog>;
pub type Directory = Arc<InMemoryDirectory>;
pub type Pricing = DiscountPricing<Rules, Catalog, Directory>;
pub type PolicyBus = Arc<InMemoryEventBus<PolicyEvent>>;
pub type NotificationBus = Arc<InMemoryEventBus<Notification>>;

/// Everything the add-ons need, plus the host registries they are plugged into.
#[derive(Debug)]
pub struct Addons {
    pub rules: Rules,
    pub catalog: Catalog,
    pub directory: Directory,
    pub chatter: Arc<InMemoryChatter>,
    pub notifications: NotificationBus,
    admin: PolicyAdmin<Rules, PolicyBus>,
    pricing: Pricing,
    sales_hooks: SalesHooks,
    invoice_hooks: InvoiceHooks,
    inventory_hooks: InventoryHooks,
}

impl Addons {
    pub fn new(alerts: AlertConfig) -> Self {
        let rules: Rules = Arc::new(InMemoryRuleRepository::new());
        let catalog: Catalog = Arc::new(InMemoryCatalog::new());
        let directory: Directory = Arc::new(InMemoryDirectory::new());
        let chatter = Arc::new(InMemoryChatter::new());
        let notifications: NotificationBus = Arc::new(InMemoryEventBus::new());
        let policy_bus: PolicyBus = Arc::new(InMemoryEventBus::new());

        let pricing = DiscountPricing::new(rules.clone(), catalog.clone(), directory.clone());

        let mut sales_hooks = SalesHooks::new();
        sales_hooks
            .line_changed
            .register(Arc::new(SaleLineDiscount::new(pricing.clone())));

        let mut invoice_hooks = InvoiceHooks::new();
        invoice_hooks
            .before_post
            .register(Arc::new(InvoiceDiscount::new(pricing.clone())));

        let mut inventory_hooks = InventoryHooks::new();
        inventory_hooks.moves_done.register(Arc::new(LowStockNotifier::new(
            chatter.clone(),
            BusNotificationSink::new(notifications.clone()),
            catalog.clone(),
            alerts,
        )));

        tracing::info!(
            sale_line_listeners = sales_hooks.line_changed.len(),
            invoice_listeners = invoice_hooks.before_post.len(),
            move_listeners = inventory_hooks.moves_done.len(),
            "add-ons registered"
        );

        Self {
            admin: PolicyAdmin::new(rules.clone(), policy_bus),
            rules,
            catalog,
            directory,
            chatter,
            notifications,
            pricing,
            sales_hooks,
            invoice_hooks,
            inventory_hooks,
        }
    }

    pub fn admin(&self) -> &PolicyAdmin<Rules, PolicyBus> {
        &self.admin
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn best_discount(&self, customer: Option<PartyId>, product: ProductId, quantity: f64) -> f64 {
        self.pricing.best_discount_for(customer, product, quantity)
    }

    pub fn sales_hooks(&self) -> &SalesHooks {
        &self.sales_hooks
    }

    pub fn invoice_hooks(&self) -> &InvoiceHooks {
        &self.invoice_hooks
    }

    pub fn inventory_hooks(&self) -> &InventoryHooks {
        &self.inventory_hooks
    }

    /// A stock service whose completions run the low-stock notifier.
    pub fn stock_service(&self) -> StockService {
        StockService::new(self.inventory_hooks.clone())
    }

    pub fn low_stock(&self, on_hand: &dyn OnHand) -> Vec<Product> {
        low_stock_products(&self.catalog, on_hand)
    }
}

impl Default for Addons {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
