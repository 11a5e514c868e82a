//! Wiring of the resolver into host lifecycle hooks.

use salesguard_core::DomainResult;
use salesguard_invoicing::{Invoice, InvoicePostListener};
use salesguard_parties::{Customer, CustomerDirectory, PartyId};
use salesguard_products::{ProductCatalog, ProductId};
use salesguard_sales::{SaleLineListener, SaleOrderLine};

use crate::repository::RuleRepository;
use crate::resolver::DiscountResolver;

/// Resolver plus the master-data lookups needed to turn document ids into
/// pricing context.
#[derive(Debug, Clone)]
pub struct DiscountPricing<R, P, D> {
    resolver: DiscountResolver<R>,
    catalog: P,
    directory: D,
}

impl<R, P, D> DiscountPricing<R, P, D>
where
    R: RuleRepository,
    P: ProductCatalog,
    D: CustomerDirectory,
{
    pub fn new(rules: R, catalog: P, directory: D) -> Self {
        Self {
            resolver: DiscountResolver::new(rules),
            catalog,
            directory,
        }
    }

    /// Best discount for ids as they appear on documents. Unknown ids count
    /// as absent.
    pub fn best_discount_for(&self, customer: Option<PartyId>, product: ProductId, quantity: f64) -> f64 {
        let customer: Option<Customer> = customer.and_then(|id| self.directory.customer(id));
        let product = self.catalog.product(product);
        self.resolver.best_discount(customer.as_ref(), product.as_ref(), quantity)
    }
}

/// Sale order line listener: always overwrites the line discount with the
/// freshly resolved value, even when that value is lower (or zero).
#[derive(Debug, Clone)]
pub struct SaleLineDiscount<R, P, D> {
    pricing: DiscountPricing<R, P, D>,
}

impl<R, P, D> SaleLineDiscount<R, P, D> {
    pub fn new(pricing: DiscountPricing<R, P, D>) -> Self {
        Self { pricing }
    }
}

impl<R, P, D> SaleLineListener for SaleLineDiscount<R, P, D>
where
    R: RuleRepository,
    P: ProductCatalog,
    D: CustomerDirectory,
{
    fn on_line_changed(&self, customer: Option<PartyId>, line: &mut SaleOrderLine) {
        let (Some(customer), Some(product)) = (customer, line.product) else {
            return;
        };

        let discount = self.pricing.best_discount_for(Some(customer), product, line.quantity);
        tracing::debug!(
            line_no = line.line_no,
            product_id = %product,
            previous = line.discount,
            discount,
            "sale line discount set"
        );
        line.discount = discount;
    }
}

/// Invoice posting listener: raises line discounts to the resolved value, and
/// never lowers a discount already present on the line.
///
/// Only customer invoices and sales receipts are touched.
#[derive(Debug, Clone)]
pub struct InvoiceDiscount<R, P, D> {
    pricing: DiscountPricing<R, P, D>,
}

impl<R, P, D> InvoiceDiscount<R, P, D> {
    pub fn new(pricing: DiscountPricing<R, P, D>) -> Self {
        Self { pricing }
    }
}

impl<R, P, D> InvoicePostListener for InvoiceDiscount<R, P, D>
where
    R: RuleRepository,
    P: ProductCatalog,
    D: CustomerDirectory,
{
    fn before_post(&self, invoice: &mut Invoice) -> DomainResult<()> {
        if !invoice.move_type().is_sale() {
            return Ok(());
        }

        let invoice_id = invoice.id_typed();
        let customer = invoice.customer();
        for line in invoice.lines_mut() {
            let Some(product) = line.product else {
                continue;
            };
            let best = self.pricing.best_discount_for(customer, product, line.quantity);
            if best > line.discount {
                tracing::info!(
                    invoice_id = %invoice_id,
                    line_no = line.line_no,
                    previous = line.discount,
                    discount = best,
                    "invoice line discount raised"
                );
                line.discount = best;
            } else {
                tracing::debug!(
                    invoice_id = %invoice_id,
                    line_no = line.line_no,
                    current = line.discount,
                    resolved = best,
                    "invoice line discount kept"
                );
            }
        }
        Ok(())
    }
}
