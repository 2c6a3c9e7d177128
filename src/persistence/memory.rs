//! In-memory product store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::model::{NewProduct, Product, ProductOrder};
use super::ProductStore;

/// Process-local store backed by a `BTreeMap`.
///
/// Ids come from a counter that only moves forward, so a deleted id is never
/// handed out again.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    next_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored products
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_all(&self, order: ProductOrder) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut products: Vec<Product> = inner.rows.values().cloned().collect();

        // Ties keep id order, matching the SQL ordering.
        match order {
            ProductOrder::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn create(&self, product: NewProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let id = inner.next_id;
        inner.next_id += 1;

        let record = Product {
            id,
            name: product.name,
            price: product.price,
            availability: true,
        };
        inner.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn save(&self, product: &Product) -> StoreResult<Product> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let row = inner
            .rows
            .get_mut(&product.id)
            .ok_or(StoreError::Missing(product.id))?;
        *row = product.clone();
        Ok(row.clone())
    }

    async fn destroy(&self, product: &Product) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner
            .rows
            .remove(&product.id)
            .map(|_| ())
            .ok_or(StoreError::Missing(product.id))
    }
}
