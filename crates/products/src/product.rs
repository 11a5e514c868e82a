use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};

uuid_id!(
    /// Product variant identifier.
    ProductId,
    "ProductId"
);

uuid_id!(
    /// Product template identifier (shared by all variants of a product).
    TemplateId,
    "TemplateId"
);

uuid_id!(
    /// Product category identifier.
    CategoryId,
    "CategoryId"
);

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// How a product is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// Consumed without on-hand tracking.
    Consumable,
    Service,
    /// Tracked with an on-hand quantity.
    Stockable,
}

/// A sellable product variant.
///
/// `minimal_stock` is a template-level setting in the host; it is carried on
/// the variant snapshot so stock checks need a single lookup. `0.0` disables
/// low-stock alerting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    template_id: TemplateId,
    name: String,
    category: CategoryId,
    kind: ProductKind,
    minimal_stock: f64,
}

impl Product {
    pub fn new(
        id: ProductId,
        template_id: TemplateId,
        name: impl Into<String>,
        category: CategoryId,
        kind: ProductKind,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            template_id,
            name,
            category,
            kind,
            minimal_stock: 0.0,
        })
    }

    pub fn with_minimal_stock(mut self, minimal_stock: f64) -> DomainResult<Self> {
        self.set_minimal_stock(minimal_stock)?;
        Ok(self)
    }

    pub fn set_minimal_stock(&mut self, minimal_stock: f64) -> DomainResult<()> {
        if !minimal_stock.is_finite() || minimal_stock < 0.0 {
            return Err(DomainError::validation(
                "minimal_stock must be a finite, non-negative number",
            ));
        }
        self.minimal_stock = minimal_stock;
        Ok(())
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> CategoryId {
        self.category
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn minimal_stock(&self) -> f64 {
        self.minimal_stock
    }

    pub fn is_stockable(&self) -> bool {
        self.kind == ProductKind::Stockable
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
