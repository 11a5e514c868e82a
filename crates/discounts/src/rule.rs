use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};
use salesguard_parties::ClientTypeId;
use salesguard_products::{CategoryId, ProductId};

use crate::axis::Axis;
use crate::percentage::Percentage;

uuid_id!(
    /// Discount rule identifier.
    RuleId,
    "RuleId"
);

fn default_min_quantity() -> f64 {
    1.0
}

/// Unvalidated rule attributes, as submitted by an administrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub client_type: Axis<ClientTypeId>,
    #[serde(default)]
    pub product: Axis<ProductId>,
    #[serde(default)]
    pub category: Axis<CategoryId>,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: f64,
    pub discount_percentage: f64,
}

impl RuleSpec {
    /// Wildcard on every axis, minimum quantity 1.
    pub fn new(discount_percentage: f64) -> Self {
        Self {
            client_type: Axis::Any,
            product: Axis::Any,
            category: Axis::Any,
            min_quantity: default_min_quantity(),
            discount_percentage,
        }
    }

    pub fn for_client_type(mut self, client_type: ClientTypeId) -> Self {
        self.client_type = Axis::Specific(client_type);
        self
    }

    pub fn for_product(mut self, product: ProductId) -> Self {
        self.product = Axis::Specific(product);
        self
    }

    pub fn for_category(mut self, category: CategoryId) -> Self {
        self.category = Axis::Specific(category);
        self
    }

    pub fn min_quantity(mut self, min_quantity: f64) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    /// Validate into a rule.
    pub fn build(&self, id: RuleId) -> DomainResult<DiscountRule> {
        if !self.min_quantity.is_finite() || self.min_quantity < 0.0 {
            return Err(DomainError::validation(
                "min_quantity must be a finite, non-negative number",
            ));
        }
        Ok(DiscountRule {
            id,
            client_type: self.client_type,
            product: self.product,
            category: self.category,
            min_quantity: self.min_quantity,
            discount: Percentage::new(self.discount_percentage)?,
        })
    }
}

/// A validated discount rule. Always owned by exactly one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    id: RuleId,
    client_type: Axis<ClientTypeId>,
    product: Axis<ProductId>,
    category: Axis<CategoryId>,
    min_quantity: f64,
    discount: Percentage,
}

impl DiscountRule {
    pub fn id_typed(&self) -> RuleId {
        self.id
    }

    pub fn client_type(&self) -> Axis<ClientTypeId> {
        self.client_type
    }

    pub fn product(&self) -> Axis<ProductId> {
        self.product
    }

    pub fn category(&self) -> Axis<CategoryId> {
        self.category
    }

    pub fn min_quantity(&self) -> f64 {
        self.min_quantity
    }

    pub fn discount(&self) -> Percentage {
        self.discount
    }

    /// Canonical listing order: ascending minimum quantity, then id.
    pub fn canonical_cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.min_quantity
            .total_cmp(&other.min_quantity)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl Entity for DiscountRule {
    type Id = RuleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
