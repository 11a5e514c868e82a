use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::product::{Category, CategoryId, Product, ProductId};

/// Read access to products and categories.
pub trait ProductCatalog: Send + Sync {
    fn product(&self, id: ProductId) -> Option<Product>;
    fn category(&self, id: CategoryId) -> Option<Category>;
    fn products(&self) -> Vec<Product>;
}

impl<C> ProductCatalog for Arc<C>
where
    C: ProductCatalog + ?Sized,
{
    fn product(&self, id: ProductId) -> Option<Product> {
        (**self).product(id)
    }

    fn category(&self, id: CategoryId) -> Option<Category> {
        (**self).category(id)
    }

    fn products(&self) -> Vec<Product> {
        (**self).products()
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, category: Category) {
        if let Ok(mut map) = self.categories.write() {
            map.insert(category.id, category);
        }
    }

    pub fn upsert_product(&self, product: Product) {
        if let Ok(mut map) = self.products.write() {
            map.insert(product.id_typed(), product);
        }
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.read().ok()?.get(&id).cloned()
    }

    fn category(&self, id: CategoryId) -> Option<Category> {
        self.categories.read().ok()?.get(&id).cloned()
    }

    fn products(&self) -> Vec<Product> {
        match self.products.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}
