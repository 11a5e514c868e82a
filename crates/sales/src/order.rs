use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};
use salesguard_parties::PartyId;
use salesguard_products::ProductId;

use crate::hooks::SalesHooks;

uuid_id!(
    /// Sales order identifier.
    SaleOrderId,
    "SaleOrderId"
);

/// Sales order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleOrderStatus {
    Draft,
    Confirmed,
}

/// Order line: product, quantity, unit price, discount percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleOrderLine {
    pub line_no: u32,
    pub product: Option<ProductId>,
    pub quantity: f64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    /// Discount percentage in [0, 100].
    pub discount: f64,
}

/// Sales order being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleOrder {
    id: SaleOrderId,
    customer: Option<PartyId>,
    status: SaleOrderStatus,
    lines: Vec<SaleOrderLine>,
}

impl SaleOrder {
    pub fn new(id: SaleOrderId, customer: Option<PartyId>) -> Self {
        Self {
            id,
            customer,
            status: SaleOrderStatus::Draft,
            lines: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> SaleOrderId {
        self.id
    }

    pub fn customer(&self) -> Option<PartyId> {
        self.customer
    }

    pub fn status(&self) -> SaleOrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[SaleOrderLine] {
        &self.lines
    }

    pub fn line(&self, line_no: u32) -> Option<&SaleOrderLine> {
        self.lines.iter().find(|l| l.line_no == line_no)
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, SaleOrderStatus::Draft)
    }

    /// Add a line and notify listeners as if product and quantity were just
    /// entered. Returns the new line number.
    pub fn add_line(
        &mut self,
        product: Option<ProductId>,
        quantity: f64,
        unit_price: u64,
        hooks: &SalesHooks,
    ) -> DomainResult<u32> {
        self.ensure_modifiable()?;
        validate_quantity(quantity)?;

        let line_no = self.lines.iter().map(|l| l.line_no).max().unwrap_or(0) + 1;
        let mut line = SaleOrderLine {
            line_no,
            product,
            quantity,
            unit_price,
            discount: 0.0,
        };
        hooks.fire_line_changed(self.customer, &mut line);
        self.lines.push(line);
        Ok(line_no)
    }

    pub fn change_product(
        &mut self,
        line_no: u32,
        product: Option<ProductId>,
        hooks: &SalesHooks,
    ) -> DomainResult<()> {
        self.ensure_modifiable()?;
        let customer = self.customer;
        let line = self.line_mut(line_no)?;
        line.product = product;
        hooks.fire_line_changed(customer, line);
        Ok(())
    }

    pub fn change_quantity(&mut self, line_no: u32, quantity: f64, hooks: &SalesHooks) -> DomainResult<()> {
        self.ensure_modifiable()?;
        validate_quantity(quantity)?;
        let customer = self.customer;
        let line = self.line_mut(line_no)?;
        line.quantity = quantity;
        hooks.fire_line_changed(customer, line);
        Ok(())
    }

    /// Change the customer; every line is re-evaluated by the listeners.
    pub fn change_customer(&mut self, customer: Option<PartyId>, hooks: &SalesHooks) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.customer = customer;
        tracing::debug!(order_id = %self.id, lines = self.lines.len(), "customer changed, re-evaluating lines");
        for line in &mut self.lines {
            hooks.fire_line_changed(customer, line);
        }
        Ok(())
    }

    /// Manually set a line discount (no listeners involved).
    pub fn set_discount(&mut self, line_no: u32, discount: f64) -> DomainResult<()> {
        self.ensure_modifiable()?;
        if !(0.0..=100.0).contains(&discount) {
            return Err(DomainError::validation("discount must be between 0 and 100"));
        }
        self.line_mut(line_no)?.discount = discount;
        Ok(())
    }

    pub fn confirm(&mut self) -> DomainResult<()> {
        if self.status != SaleOrderStatus::Draft {
            return Err(DomainError::invariant("only draft orders can be confirmed"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("cannot confirm order without lines"));
        }
        self.status = SaleOrderStatus::Confirmed;
        Ok(())
    }

    fn ensure_modifiable(&self) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant("cannot modify order once it is confirmed"));
        }
        Ok(())
    }

    fn line_mut(&mut self, line_no: u32) -> DomainResult<&mut SaleOrderLine> {
        self.lines
            .iter_mut()
            .find(|l| l.line_no == line_no)
            .ok_or_else(DomainError::not_found)
    }
}

impl Entity for SaleOrder {
    type Id = SaleOrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_quantity(quantity: f64) -> DomainResult<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(DomainError::validation("quantity must be a finite, non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::SaleLineListener;
    use std::sync::{Arc, Mutex};

    /// Records every notification and sets the discount to the quantity.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(Option<PartyId>, u32)>>,
    }

    impl SaleLineListener for Recorder {
        fn on_line_changed(&self, customer: Option<PartyId>, line: &mut SaleOrderLine) {
            self.calls.lock().unwrap().push((customer, line.line_no));
            line.discount = line.quantity;
        }
    }

    fn hooks_with(recorder: Arc<Recorder>) -> SalesHooks {
        let mut hooks = SalesHooks::new();
        hooks.line_changed.register(recorder);
        hooks
    }

    #[test]
    fn add_line_notifies_listeners_before_storing() {
        let recorder = Arc::new(Recorder::default());
        let hooks = hooks_with(recorder.clone());
        let customer = PartyId::new();
        let mut order = SaleOrder::new(SaleOrderId::new(), Some(customer));

        let line_no = order.add_line(Some(ProductId::new()), 7.0, 100, &hooks).unwrap();

        assert_eq!(line_no, 1);
        assert_eq!(order.line(1).unwrap().discount, 7.0);
        assert_eq!(*recorder.calls.lock().unwrap(), vec![(Some(customer), 1)]);
    }

    #[test]
    fn quantity_change_notifies_only_that_line() {
        let recorder = Arc::new(Recorder::default());
        let hooks = hooks_with(recorder.clone());
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        order.add_line(Some(ProductId::new()), 1.0, 100, &hooks).unwrap();
        order.add_line(Some(ProductId::new()), 2.0, 100, &hooks).unwrap();

        order.change_quantity(2, 9.0, &hooks).unwrap();

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls.last(), Some(&(None, 2)));
        assert_eq!(calls.len(), 3);
        assert_eq!(order.line(2).unwrap().discount, 9.0);
        assert_eq!(order.line(1).unwrap().discount, 1.0);
    }

    #[test]
    fn customer_change_notifies_every_line() {
        let recorder = Arc::new(Recorder::default());
        let hooks = hooks_with(recorder.clone());
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        order.add_line(Some(ProductId::new()), 1.0, 100, &hooks).unwrap();
        order.add_line(None, 2.0, 100, &hooks).unwrap();

        let customer = PartyId::new();
        order.change_customer(Some(customer), &hooks).unwrap();

        let calls = recorder.calls.lock().unwrap();
        assert_eq!(&calls[2..], &[(Some(customer), 1), (Some(customer), 2)]);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let hooks = SalesHooks::new();
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        assert!(order.add_line(None, -1.0, 100, &hooks).unwrap_err().is_validation());
    }

    #[test]
    fn manual_discount_out_of_range_is_rejected() {
        let hooks = SalesHooks::new();
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        order.add_line(None, 1.0, 100, &hooks).unwrap();

        assert!(order.set_discount(1, 101.0).is_err());
        order.set_discount(1, 12.5).unwrap();
        assert_eq!(order.line(1).unwrap().discount, 12.5);
    }

    #[test]
    fn confirmed_order_cannot_be_edited() {
        let hooks = SalesHooks::new();
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        order.add_line(None, 1.0, 100, &hooks).unwrap();
        order.confirm().unwrap();

        let err = order.change_quantity(1, 3.0, &hooks).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn unknown_line_is_not_found() {
        let hooks = SalesHooks::new();
        let mut order = SaleOrder::new(SaleOrderId::new(), None);
        assert_eq!(order.change_product(5, None, &hooks).unwrap_err(), DomainError::NotFound);
    }
}
