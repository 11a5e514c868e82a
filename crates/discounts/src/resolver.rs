//! Best-discount selection.

use salesguard_parties::Customer;
use salesguard_products::Product;

use crate::repository::{RuleQuery, RuleRecord, RuleRepository};

/// Selects the best discount for a (customer, product, quantity) context.
///
/// Every axis is matched independently as "unset or equal"; among all matching
/// rules the highest percentage wins, regardless of how specific the rule is.
/// A catch-all rule with 30% beats a product-specific rule with 10%.
///
/// Among several rules sharing the maximum percentage, the first in canonical
/// order (ascending minimum quantity, then rule id) is reported.
#[derive(Debug, Clone)]
pub struct DiscountResolver<R> {
    rules: R,
}

impl<R> DiscountResolver<R>
where
    R: RuleRepository,
{
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Best discount percentage, `0.0` when no rule matches or the product is
    /// absent. A missing customer is treated as one without client type.
    pub fn best_discount(&self, customer: Option<&Customer>, product: Option<&Product>, quantity: f64) -> f64 {
        self.best_rule(customer, product, quantity)
            .map(|record| record.rule.discount().value())
            .unwrap_or(0.0)
    }

    /// The winning rule, if any.
    pub fn best_rule(&self, customer: Option<&Customer>, product: Option<&Product>, quantity: f64) -> Option<RuleRecord> {
        let product = product?;
        let query = RuleQuery {
            client_type: customer.and_then(Customer::client_type),
            product: product.id_typed(),
            category: product.category(),
            quantity,
        };

        let candidates = self.rules.find_matching(&query);
        let mut best: Option<RuleRecord> = None;
        for record in candidates {
            let better = match &best {
                Some(current) => record.rule.discount() > current.rule.discount(),
                None => true,
            };
            if better {
                best = Some(record);
            }
        }

        tracing::debug!(
            product_id = %query.product,
            quantity,
            client_type = ?query.client_type,
            rule_id = ?best.as_ref().map(|r| r.rule.id_typed()),
            discount = best.as_ref().map(|r| r.rule.discount().value()).unwrap_or(0.0),
            "best discount resolved"
        );
        best
    }
}
