//! Move-completion listener raising low-stock alerts.

use salesguard_core::{DomainError, DomainResult, UserId};
use salesguard_inventory::{MoveCompletion, MoveDoneListener, StockMove};
use salesguard_messaging::{Chatter, ChatterMessage, Notification, NotificationKind, NotificationSink, RecordRef};
use salesguard_products::{Product, ProductCatalog};

use crate::config::AlertConfig;
use crate::query::is_low_stock;

pub const PICKING_MODEL: &str = "stock.picking";
pub const PRODUCT_MODEL: &str = "product.product";
pub const TEMPLATE_MODEL: &str = "product.template";

/// Emits one alert set per completed move that leaves its product below the
/// minimum stock:
///
/// - a warning notification to the user who completed the move
/// - a note on the picking (when the move belongs to one)
/// - a note on the product and one on its template
///
/// Quantities are the committed post-movement on-hand values. Alerts run
/// after the completion is committed, so a failed delivery is reported but
/// never causes the same move to alert twice.
#[derive(Debug)]
pub struct LowStockNotifier<C, N, P> {
    chatter: C,
    notifications: N,
    catalog: P,
    config: AlertConfig,
}

impl<C, N, P> LowStockNotifier<C, N, P>
where
    C: Chatter,
    N: NotificationSink,
    P: ProductCatalog,
{
    pub fn new(chatter: C, notifications: N, catalog: P, config: AlertConfig) -> Self {
        Self {
            chatter,
            notifications,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Deliver one alert set. Every delivery is attempted even if an earlier
    /// one fails; the first failure is returned.
    fn alert(&self, stock_move: &StockMove, product: &Product, on_hand: f64, actor: UserId) -> DomainResult<()> {
        let minimum = product.minimal_stock();
        tracing::warn!(
            product_id = %product.id_typed(),
            product = %product.name(),
            on_hand,
            minimum,
            move_id = %stock_move.id_typed(),
            "product below minimum stock"
        );

        let mut first_failure: Option<DomainError> = None;
        let mut record = |err: DomainError| {
            tracing::error!(error = %err, move_id = %stock_move.id_typed(), "low-stock alert delivery failed");
            first_failure.get_or_insert(err);
        };

        let pushed = self.notifications.push(Notification {
            recipient: actor,
            kind: NotificationKind::Warning,
            title: self.config.title.clone(),
            message: format!(
                "Product {} fell below its minimum stock ({minimum}). Current: {on_hand}",
                product.name()
            ),
            sticky: self.config.sticky,
        });
        if let Err(e) = pushed {
            record(DomainError::invariant(format!("low-stock notification failed: {e}")));
        }

        let body = format!(
            "LOW STOCK ALERT: product {} is down to {on_hand} (minimum: {minimum}).",
            product.name()
        );
        let mut targets = Vec::with_capacity(3);
        if let Some(picking) = stock_move.picking() {
            targets.push(RecordRef::new(PICKING_MODEL, picking));
        }
        targets.push(RecordRef::new(PRODUCT_MODEL, product.id_typed()));
        targets.push(RecordRef::new(TEMPLATE_MODEL, product.template_id()));

        for target in targets {
            let posted = self
                .chatter
                .post(target, ChatterMessage::note(self.config.subject.clone(), body.clone()));
            if let Err(e) = posted {
                record(DomainError::invariant(format!("low-stock note on {target} failed: {e}")));
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<C, N, P> MoveDoneListener for LowStockNotifier<C, N, P>
where
    C: Chatter,
    N: NotificationSink,
    P: ProductCatalog,
{
    fn on_moves_done(&self, completion: &MoveCompletion<'_>) -> DomainResult<()> {
        let mut failure: Option<DomainError> = None;
        for stock_move in completion.moves {
            let Some(product) = self.catalog.product(stock_move.product()) else {
                tracing::debug!(product_id = %stock_move.product(), "completed move for unknown product; skipped");
                continue;
            };
            let on_hand = completion.on_hand.on_hand(product.id_typed());
            if product.is_stockable()
                && is_low_stock(&product, on_hand)
                && let Err(err) = self.alert(stock_move, &product, on_hand, completion.actor)
            {
                failure.get_or_insert(err);
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesguard_events::{EventBus, InMemoryEventBus, Subscription};
    use salesguard_inventory::{InventoryHooks, Location, MoveId, Picking, PickingId, StockService};
    use salesguard_messaging::{BusNotificationSink, ChatterError, InMemoryChatter, MessageId, MessageSubtype};
    use salesguard_products::{CategoryId, InMemoryCatalog, ProductId, ProductKind, TemplateId};
    use std::sync::{Arc, Mutex};

    struct Harness {
        service: StockService,
        chatter: Arc<InMemoryChatter>,
        inbox: Subscription<Notification>,
        catalog: Arc<InMemoryCatalog>,
    }

    fn harness(config: AlertConfig) -> Harness {
        let chatter = Arc::new(InMemoryChatter::new());
        let bus = Arc::new(InMemoryEventBus::<Notification>::new());
        let inbox = bus.subscribe();
        let catalog = Arc::new(InMemoryCatalog::new());

        let notifier = LowStockNotifier::new(
            chatter.clone(),
            BusNotificationSink::new(bus),
            catalog.clone(),
            config,
        );
        let mut hooks = InventoryHooks::new();
        hooks.moves_done.register(Arc::new(notifier));

        Harness {
            service: StockService::new(hooks),
            chatter,
            inbox,
            catalog,
        }
    }

    fn add_product(h: &Harness, name: &str, kind: ProductKind, minimal_stock: f64) -> Product {
        let p = Product::new(ProductId::new(), TemplateId::new(), name, CategoryId::new(), kind)
            .unwrap()
            .with_minimal_stock(minimal_stock)
            .unwrap();
        h.catalog.upsert_product(p.clone());
        p
    }

    fn delivery(product: &Product, qty: f64) -> Picking {
        let mut picking = Picking::new(PickingId::new(), "WH/OUT/0001");
        picking
            .add_move(StockMove::new(MoveId::new(), product.id_typed(), qty, Location::Internal, Location::Customer).unwrap())
            .unwrap();
        picking
    }

    #[test]
    fn delivery_below_minimum_alerts_each_record_once() {
        let mut h = harness(AlertConfig::default());
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 20.0).unwrap();
        let actor = UserId::new();

        let mut picking = delivery(&widget, 15.0);
        h.service.validate_picking(&mut picking, actor).unwrap();

        let picking_ref = RecordRef::new(PICKING_MODEL, picking.id_typed());
        let product_ref = RecordRef::new(PRODUCT_MODEL, widget.id_typed());
        let template_ref = RecordRef::new(TEMPLATE_MODEL, widget.template_id());
        for target in [picking_ref, product_ref, template_ref] {
            let messages = h.chatter.messages_for(target);
            assert_eq!(messages.len(), 1, "{target}");
            assert_eq!(messages[0].message.subject, "Minimum Stock Alert");
            assert_eq!(messages[0].message.subtype, MessageSubtype::Note);
            assert_eq!(
                messages[0].message.body,
                "LOW STOCK ALERT: product Widget is down to 5 (minimum: 10)."
            );
        }

        let pushed = h.inbox.drain();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].recipient, actor);
        assert_eq!(pushed[0].kind, NotificationKind::Warning);
        assert_eq!(pushed[0].title, "Minimum Stock Reached");
        assert_eq!(pushed[0].message, "Product Widget fell below its minimum stock (10). Current: 5");
        assert!(!pushed[0].sticky);
    }

    #[test]
    fn revalidating_the_picking_does_not_alert_again() {
        let mut h = harness(AlertConfig::default());
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 20.0).unwrap();

        let mut picking = delivery(&widget, 15.0);
        h.service.validate_picking(&mut picking, UserId::new()).unwrap();
        h.service.validate_picking(&mut picking, UserId::new()).unwrap();

        assert_eq!(h.chatter.all().len(), 3);
        assert_eq!(h.inbox.drain().len(), 1);
    }

    #[test]
    fn staying_at_minimum_raises_nothing() {
        let mut h = harness(AlertConfig::default());
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 20.0).unwrap();

        let mut picking = delivery(&widget, 10.0);
        h.service.validate_picking(&mut picking, UserId::new()).unwrap();

        assert!(h.chatter.all().is_empty());
        assert!(h.inbox.drain().is_empty());
    }

    #[test]
    fn products_without_minimum_or_not_stockable_are_ignored() {
        let mut h = harness(AlertConfig::default());
        let untracked = add_product(&h, "Untracked", ProductKind::Stockable, 0.0);
        let consumable = add_product(&h, "Paper", ProductKind::Consumable, 10.0);
        h.service.set_on_hand(untracked.id_typed(), 5.0).unwrap();
        h.service.set_on_hand(consumable.id_typed(), 5.0).unwrap();

        let mut a = delivery(&untracked, 5.0);
        let mut b = delivery(&consumable, 5.0);
        h.service.validate_picking(&mut a, UserId::new()).unwrap();
        h.service.validate_picking(&mut b, UserId::new()).unwrap();

        assert!(h.chatter.all().is_empty());
        assert!(h.inbox.drain().is_empty());
    }

    #[test]
    fn move_without_picking_notes_only_product_and_template() {
        let mut h = harness(AlertConfig::default());
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 12.0).unwrap();

        let mut moves = vec![
            StockMove::new(MoveId::new(), widget.id_typed(), 4.0, Location::Internal, Location::Adjustment).unwrap(),
        ];
        h.service.complete(&mut moves, UserId::new()).unwrap();

        let notes = h.chatter.all();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|m| m.target.model() != PICKING_MODEL));
        assert_eq!(h.inbox.drain().len(), 1);
    }

    #[test]
    fn configured_wording_and_stickiness_are_used() {
        let config = AlertConfig {
            subject: "Reorder".to_string(),
            title: "Stock low".to_string(),
            sticky: true,
        };
        let mut h = harness(config);
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 10.0).unwrap();

        let mut picking = delivery(&widget, 1.0);
        h.service.validate_picking(&mut picking, UserId::new()).unwrap();

        assert!(h.chatter.all().iter().all(|m| m.message.subject == "Reorder"));
        let pushed = h.inbox.drain();
        assert_eq!(pushed[0].title, "Stock low");
        assert!(pushed[0].sticky);
    }

    /// Fails the `fail_on`-th post (1-based), succeeds otherwise.
    struct FlakyChatter {
        inner: InMemoryChatter,
        fail_on: usize,
        calls: Mutex<usize>,
    }

    impl Chatter for FlakyChatter {
        fn post(&self, target: RecordRef, message: ChatterMessage) -> Result<MessageId, ChatterError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == self.fail_on {
                return Err(ChatterError::Unavailable);
            }
            self.inner.post(target, message)
        }
    }

    #[test]
    fn failed_note_does_not_duplicate_alerts_on_revalidation() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let widget = Product::new(ProductId::new(), TemplateId::new(), "Widget", CategoryId::new(), ProductKind::Stockable)
            .unwrap()
            .with_minimal_stock(10.0)
            .unwrap();
        catalog.upsert_product(widget.clone());

        let chatter = Arc::new(FlakyChatter {
            inner: InMemoryChatter::new(),
            fail_on: 2,
            calls: Mutex::new(0),
        });
        let bus = Arc::new(InMemoryEventBus::<Notification>::new());
        let inbox = bus.subscribe();
        let notifier = LowStockNotifier::new(chatter.clone(), BusNotificationSink::new(bus), catalog, AlertConfig::default());
        let mut hooks = InventoryHooks::new();
        hooks.moves_done.register(Arc::new(notifier));
        let mut service = StockService::new(hooks);
        service.set_on_hand(widget.id_typed(), 20.0).unwrap();

        let mut picking = delivery(&widget, 15.0);
        service.validate_picking(&mut picking, UserId::new()).unwrap();
        service.validate_picking(&mut picking, UserId::new()).unwrap();

        assert!(picking.is_done());
        assert_eq!(salesguard_inventory::OnHand::on_hand(&service, widget.id_typed()), 5.0);
        // The product note failed; the picking and template notes still went out, once.
        let picking_ref = RecordRef::new(PICKING_MODEL, picking.id_typed());
        let product_ref = RecordRef::new(PRODUCT_MODEL, widget.id_typed());
        let template_ref = RecordRef::new(TEMPLATE_MODEL, widget.template_id());
        assert_eq!(chatter.inner.messages_for(picking_ref).len(), 1);
        assert_eq!(chatter.inner.messages_for(product_ref).len(), 0);
        assert_eq!(chatter.inner.messages_for(template_ref).len(), 1);
        assert_eq!(inbox.drain().len(), 1);
        assert_eq!(*chatter.calls.lock().unwrap(), 3);
    }

    #[test]
    fn over_delivery_alerts_with_negative_quantity() {
        let mut h = harness(AlertConfig::default());
        let widget = add_product(&h, "Widget", ProductKind::Stockable, 10.0);
        h.service.set_on_hand(widget.id_typed(), 3.0).unwrap();

        let mut picking = delivery(&widget, 5.0);
        h.service.validate_picking(&mut picking, UserId::new()).unwrap();

        let notes = h.chatter.messages_for(RecordRef::new(PRODUCT_MODEL, widget.id_typed()));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message.body, "LOW STOCK ALERT: product Widget is down to -2 (minimum: 10).");
        assert_eq!(h.inbox.drain()[0].message, "Product Widget fell below its minimum stock (10). Current: -2");
    }
}
