use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};
use salesguard_parties::PartyId;
use salesguard_products::ProductId;

use crate::hooks::InvoiceHooks;

uuid_id!(
    /// Invoice identifier.
    InvoiceId,
    "InvoiceId"
);

/// Accounting document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    OutInvoice,
    OutRefund,
    OutReceipt,
    InInvoice,
    InRefund,
    InReceipt,
    Entry,
}

impl MoveType {
    /// Customer invoices and sales receipts (refunds excluded).
    pub fn is_sale(self) -> bool {
        matches!(self, MoveType::OutInvoice | MoveType::OutReceipt)
    }
}

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Posted,
}

/// Invoice line. Lines without a product are notes/sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub line_no: u32,
    pub product: Option<ProductId>,
    pub quantity: f64,
    /// Price in smallest currency unit (e.g., cents).
    pub unit_price: u64,
    /// Discount percentage in [0, 100].
    pub discount: f64,
}

impl InvoiceLine {
    /// Line subtotal after discount, in smallest currency unit (rounded).
    pub fn subtotal(&self) -> u64 {
        let gross = self.quantity * self.unit_price as f64;
        (gross * (1.0 - self.discount / 100.0)).round().max(0.0) as u64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    id: InvoiceId,
    move_type: MoveType,
    customer: Option<PartyId>,
    status: InvoiceStatus,
    lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn new(id: InvoiceId, move_type: MoveType, customer: Option<PartyId>) -> Self {
        Self {
            id,
            move_type,
            customer,
            status: InvoiceStatus::Draft,
            lines: Vec::new(),
        }
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    pub fn customer(&self) -> Option<PartyId> {
        self.customer
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn lines(&self) -> &[InvoiceLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [InvoiceLine] {
        &mut self.lines
    }

    pub fn line(&self, line_no: u32) -> Option<&InvoiceLine> {
        self.lines.iter().find(|l| l.line_no == line_no)
    }

    pub fn total(&self) -> u64 {
        self.lines.iter().map(InvoiceLine::subtotal).sum()
    }

    /// Add a draft line with an optional manual discount. Returns the line number.
    pub fn add_line(
        &mut self,
        product: Option<ProductId>,
        quantity: f64,
        unit_price: u64,
        discount: f64,
    ) -> DomainResult<u32> {
        self.ensure_draft()?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(DomainError::validation("quantity must be a finite, non-negative number"));
        }
        if !(0.0..=100.0).contains(&discount) {
            return Err(DomainError::validation("discount must be between 0 and 100"));
        }
        let line_no = self.lines.iter().map(|l| l.line_no).max().unwrap_or(0) + 1;
        self.lines.push(InvoiceLine {
            line_no,
            product,
            quantity,
            unit_price,
            discount,
        });
        Ok(line_no)
    }

    /// Post the invoice.
    ///
    /// Runs `before_post` listeners on a working copy; only if all of them
    /// succeed is the copy committed and marked posted.
    pub fn post(&mut self, hooks: &InvoiceHooks) -> DomainResult<()> {
        self.ensure_draft()?;

        let mut working = self.clone();
        for listener in hooks.before_post.iter() {
            if let Err(err) = listener.before_post(&mut working) {
                tracing::error!(invoice_id = %self.id, error = %err, "before-post listener failed");
                return Err(err);
            }
        }
        if working.status != InvoiceStatus::Draft || working.id != self.id {
            return Err(DomainError::invariant("before-post listeners must not change identity or status"));
        }

        working.status = InvoiceStatus::Posted;
        *self = working;
        tracing::info!(invoice_id = %self.id, move_type = ?self.move_type, total = self.total(), "invoice posted");
        Ok(())
    }

    fn ensure_draft(&self) -> DomainResult<()> {
        if self.status != InvoiceStatus::Draft {
            return Err(DomainError::invariant("only draft invoices can be modified or posted"));
        }
        Ok(())
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::InvoicePostListener;
    use std::sync::Arc;

    struct SetEveryDiscount(f64);

    impl InvoicePostListener for SetEveryDiscount {
        fn before_post(&self, invoice: &mut Invoice) -> DomainResult<()> {
            for line in invoice.lines_mut() {
                line.discount = self.0;
            }
            Ok(())
        }
    }

    struct Reject;

    impl InvoicePostListener for Reject {
        fn before_post(&self, _invoice: &mut Invoice) -> DomainResult<()> {
            Err(DomainError::validation("rejected"))
        }
    }

    fn draft() -> Invoice {
        let mut invoice = Invoice::new(InvoiceId::new(), MoveType::OutInvoice, Some(PartyId::new()));
        invoice.add_line(Some(ProductId::new()), 2.0, 1_000, 0.0).unwrap();
        invoice
    }

    #[test]
    fn post_runs_listeners_then_marks_posted() {
        let mut hooks = InvoiceHooks::new();
        hooks.before_post.register(Arc::new(SetEveryDiscount(10.0)));
        let mut invoice = draft();

        invoice.post(&hooks).unwrap();

        assert_eq!(invoice.status(), InvoiceStatus::Posted);
        assert_eq!(invoice.line(1).unwrap().discount, 10.0);
        assert_eq!(invoice.total(), 1_800);
    }

    #[test]
    fn failing_listener_leaves_invoice_untouched() {
        let mut hooks = InvoiceHooks::new();
        hooks.before_post.register(Arc::new(SetEveryDiscount(50.0)));
        hooks.before_post.register(Arc::new(Reject));
        let mut invoice = draft();
        let before = invoice.clone();

        assert!(invoice.post(&hooks).is_err());
        assert_eq!(invoice, before);
    }

    #[test]
    fn posting_twice_is_rejected() {
        let hooks = InvoiceHooks::new();
        let mut invoice = draft();
        invoice.post(&hooks).unwrap();

        let err = invoice.post(&hooks).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn only_customer_invoices_and_receipts_are_sales() {
        assert!(MoveType::OutInvoice.is_sale());
        assert!(MoveType::OutReceipt.is_sale());
        assert!(!MoveType::OutRefund.is_sale());
        assert!(!MoveType::InInvoice.is_sale());
        assert!(!MoveType::Entry.is_sale());
    }

    #[test]
    fn manual_discount_must_be_a_percentage() {
        let mut invoice = Invoice::new(InvoiceId::new(), MoveType::OutInvoice, None);
        assert!(invoice.add_line(None, 1.0, 10, -5.0).is_err());
        assert!(invoice.lines().is_empty());
    }
}
