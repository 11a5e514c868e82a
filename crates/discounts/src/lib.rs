//! Discount policy module.
//!
//! - [`DiscountPolicy`]: administrator-maintained container of rules (aggregate).
//! - [`DiscountResolver`]: picks the best discount for (customer, product, quantity).
//! - [`SaleLineDiscount`] / [`InvoiceDiscount`]: the listeners that apply it to
//!   sale order lines (overwrite) and to invoices being posted (raise only).

pub mod admin;
pub mod application;
pub mod axis;
pub mod percentage;
pub mod policy;
pub mod repository;
pub mod resolver;
pub mod rule;

pub use admin::{AdminError, PolicyAdmin};
pub use application::{DiscountPricing, InvoiceDiscount, SaleLineDiscount};
pub use axis::Axis;
pub use percentage::Percentage;
pub use policy::{
    ActivatePolicy, AddRule, CreatePolicy, DeactivatePolicy, DeletePolicy, DiscountPolicy, PolicyActivated,
    PolicyCommand, PolicyCreated, PolicyDeactivated, PolicyDeleted, PolicyEvent, PolicyId, PolicyRenamed,
    RemoveRule, RenamePolicy, RuleAdded, RuleRemoved, RuleUpdated, UpdateRule,
};
pub use repository::{InMemoryRuleRepository, RuleQuery, RuleRecord, RuleRepository};
pub use resolver::DiscountResolver;
pub use rule::{DiscountRule, RuleId, RuleSpec};
