use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::model::Product;

/// One user's products in insertion order. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    products: Vec<Product>,
}

impl Collection {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn appended(&self, product: Product) -> Self {
        let mut products = self.products.clone();
        products.push(product);
        Self { products }
    }

    /// `None` when no product has that id.
    pub fn without(&self, id: Uuid) -> Option<Self> {
        let position = self.products.iter().position(|p| p.id == id)?;
        let mut products = self.products.clone();
        products.remove(position);
        Some(Self { products })
    }
}

/// Per-user collections. Each change swaps in a whole new [`Collection`], so
/// a snapshot handed out earlier never changes under its reader.
#[derive(Debug, Default)]
pub struct CollectionStore {
    inner: RwLock<HashMap<Uuid, Arc<Collection>>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self, user_id: Uuid) -> Arc<Collection> {
        self.inner
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn add(&self, user_id: Uuid, product: Product) -> Arc<Collection> {
        let mut guard = self.inner.write().await;
        let current = guard.get(&user_id).cloned().unwrap_or_default();
        let next = Arc::new(current.appended(product));
        guard.insert(user_id, Arc::clone(&next));
        debug!(%user_id, count = next.products().len(), "collection grew");
        next
    }

    /// Returns `false` when the product was not in the user's collection.
    pub async fn remove(&self, user_id: Uuid, product_id: Uuid) -> bool {
        let mut guard = self.inner.write().await;
        let Some(next) = guard.get(&user_id).and_then(|c| c.without(product_id)) else {
            return false;
        };
        guard.insert(user_id, Arc::new(next));
        debug!(%user_id, %product_id, "product removed");
        true
    }
}
