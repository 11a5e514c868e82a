//! JSON seed scenario: master data, discount policies, stock and the quotes to
//! price at startup.
//!
//! Records reference each other through human-readable keys (`"wholesale"`,
//! `"crate-a"`); fresh ids are generated when the seed is applied.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use salesguard_core::{DomainError, ExpectedVersion};
use salesguard_discounts::{AddRule, AdminError, CreatePolicy, PolicyCommand, PolicyId, RuleId, RuleSpec};
use salesguard_parties::{ClientType, ClientTypeId, Customer, PartyId};
use salesguard_products::{Category, CategoryId, Product, ProductId, ProductKind, TemplateId};

use crate::Addons;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown {kind} key {key:?}")]
    UnknownKey { kind: &'static str, key: String },
    #[error("duplicate {kind} key {key:?}")]
    DuplicateKey { kind: &'static str, key: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Admin(#[from] AdminError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedClientType {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCategory {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCustomer {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub client_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProduct {
    pub key: String,
    pub name: String,
    pub category: String,
    #[serde(default = "default_kind")]
    pub kind: ProductKind,
    #[serde(default)]
    pub minimal_stock: f64,
}

fn default_kind() -> ProductKind {
    ProductKind::Stockable
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRule {
    #[serde(default)]
    pub client_type: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: f64,
    pub discount_percentage: f64,
}

fn default_min_quantity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedPolicy {
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub rules: Vec<SeedRule>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedQuote {
    #[serde(default)]
    pub customer: Option<String>,
    pub product: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedStock {
    pub product: String,
    pub on_hand: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDelivery {
    pub name: String,
    pub product: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Seed {
    pub client_types: Vec<SeedClientType>,
    pub categories: Vec<SeedCategory>,
    pub customers: Vec<SeedCustomer>,
    pub products: Vec<SeedProduct>,
    pub policies: Vec<SeedPolicy>,
    pub quotes: Vec<SeedQuote>,
    pub stock: Vec<SeedStock>,
    pub deliveries: Vec<SeedDelivery>,
}

/// A quote with its keys resolved to ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub customer_key: Option<String>,
    pub product_key: String,
    pub customer: Option<PartyId>,
    pub product: ProductId,
    pub quantity: f64,
}

/// A delivery with its product resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub name: String,
    pub product: ProductId,
    pub quantity: f64,
}

/// Ids generated while applying a seed, addressable by key.
#[derive(Debug, Clone, Default)]
pub struct Seeded {
    pub client_types: HashMap<String, ClientTypeId>,
    pub categories: HashMap<String, CategoryId>,
    pub customers: HashMap<String, PartyId>,
    pub products: HashMap<String, ProductId>,
    pub policies: Vec<PolicyId>,
    pub quotes: Vec<Quote>,
    pub stock: Vec<(ProductId, f64)>,
    pub deliveries: Vec<Delivery>,
}

impl Seeded {
    pub fn customer(&self, key: &str) -> Option<PartyId> {
        self.customers.get(key).copied()
    }

    pub fn product(&self, key: &str) -> Option<ProductId> {
        self.products.get(key).copied()
    }
}

fn lookup<T: Copy>(map: &HashMap<String, T>, kind: &'static str, key: &str) -> Result<T, SeedError> {
    map.get(key).copied().ok_or_else(|| SeedError::UnknownKey {
        kind,
        key: key.to_string(),
    })
}

fn insert_unique<T>(map: &mut HashMap<String, T>, kind: &'static str, key: &str, value: T) -> Result<(), SeedError> {
    if map.contains_key(key) {
        return Err(SeedError::DuplicateKey {
            kind,
            key: key.to_string(),
        });
    }
    map.insert(key.to_string(), value);
    Ok(())
}

impl Seed {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Register master data and policies with the add-ons. Stops at the first
    /// invalid record; records applied before it stay in place.
    pub fn apply(&self, addons: &Addons) -> Result<Seeded, SeedError> {
        let mut seeded = Seeded::default();

        for ct in &self.client_types {
            let id = ClientTypeId::new();
            addons
                .directory
                .add_client_type(ClientType::new(id, ct.name.clone(), ct.description.clone())?);
            insert_unique(&mut seeded.client_types, "client type", &ct.key, id)?;
        }

        for cat in &self.categories {
            let id = CategoryId::new();
            addons.catalog.add_category(Category {
                id,
                name: cat.name.clone(),
            });
            insert_unique(&mut seeded.categories, "category", &cat.key, id)?;
        }

        for c in &self.customers {
            let mut customer = Customer::new(PartyId::new(), c.name.clone())?;
            if let Some(key) = &c.client_type {
                customer = customer.with_client_type(lookup(&seeded.client_types, "client type", key)?);
            }
            let id = customer.id_typed();
            addons.directory.upsert_customer(customer)?;
            insert_unique(&mut seeded.customers, "customer", &c.key, id)?;
        }

        for p in &self.products {
            let category = lookup(&seeded.categories, "category", &p.category)?;
            let product = Product::new(ProductId::new(), TemplateId::new(), p.name.clone(), category, p.kind)?
                .with_minimal_stock(p.minimal_stock)?;
            let id = product.id_typed();
            addons.catalog.upsert_product(product);
            insert_unique(&mut seeded.products, "product", &p.key, id)?;
        }

        for policy in &self.policies {
            seeded.policies.push(self.apply_policy(addons, &seeded, policy)?);
        }

        for q in &self.quotes {
            let customer = match &q.customer {
                Some(key) => Some(lookup(&seeded.customers, "customer", key)?),
                None => None,
            };
            seeded.quotes.push(Quote {
                customer_key: q.customer.clone(),
                product_key: q.product.clone(),
                customer,
                product: lookup(&seeded.products, "product", &q.product)?,
                quantity: q.quantity,
            });
        }

        for s in &self.stock {
            seeded.stock.push((lookup(&seeded.products, "product", &s.product)?, s.on_hand));
        }

        for d in &self.deliveries {
            seeded.deliveries.push(Delivery {
                name: d.name.clone(),
                product: lookup(&seeded.products, "product", &d.product)?,
                quantity: d.quantity,
            });
        }

        tracing::info!(
            customers = seeded.customers.len(),
            products = seeded.products.len(),
            policies = seeded.policies.len(),
            quotes = seeded.quotes.len(),
            "seed applied"
        );
        Ok(seeded)
    }

    fn apply_policy(&self, addons: &Addons, seeded: &Seeded, policy: &SeedPolicy) -> Result<PolicyId, SeedError> {
        let policy_id = PolicyId::new();
        addons.admin().execute(
            PolicyCommand::CreatePolicy(CreatePolicy {
                policy_id,
                name: policy.name.clone(),
                active: policy.active,
                occurred_at: Utc::now(),
            }),
            ExpectedVersion::Exact(0),
        )?;

        for rule in &policy.rules {
            let mut spec = RuleSpec::new(rule.discount_percentage).min_quantity(rule.min_quantity);
            if let Some(key) = &rule.client_type {
                spec = spec.for_client_type(lookup(&seeded.client_types, "client type", key)?);
            }
            if let Some(key) = &rule.product {
                spec = spec.for_product(lookup(&seeded.products, "product", key)?);
            }
            if let Some(key) = &rule.category {
                spec = spec.for_category(lookup(&seeded.categories, "category", key)?);
            }
            addons.admin().execute(
                PolicyCommand::AddRule(AddRule {
                    policy_id,
                    rule_id: RuleId::new(),
                    spec,
                    occurred_at: Utc::now(),
                }),
                ExpectedVersion::Any,
            )?;
        }
        Ok(policy_id)
    }
}
