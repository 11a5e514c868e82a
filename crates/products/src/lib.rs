//! Products module: product variants, their templates and categories.

pub mod catalog;
pub mod product;

pub use catalog::{InMemoryCatalog, ProductCatalog};
pub use product::{Category, CategoryId, Product, ProductId, ProductKind, TemplateId};
