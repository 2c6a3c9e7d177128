//! # Product Persistence
//!
//! The store interface consumed by the request handlers, plus two
//! implementations:
//!
//! - [`PgProductStore`] - PostgreSQL via `sqlx`
//! - [`InMemoryProductStore`] - process-local, used without a database URL
//!   and by tests
//!
//! Handlers follow a fetch-modify-persist pattern: `find_by_id`, mutate the
//! returned [`Product`], then `save` or `destroy` it explicitly.

mod errors;
mod memory;
mod model;
mod postgres;

pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryProductStore;
pub use model::{NewProduct, Product, ProductOrder, ProductUpdate};
pub use postgres::PgProductStore;

use async_trait::async_trait;

/// Product storage trait
///
/// Every call is async; a request's task suspends on it while other
/// requests proceed.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Short backend name, reported by the health check
    fn backend(&self) -> &'static str;

    /// Fetch every product in the given order
    async fn find_all(&self, order: ProductOrder) -> StoreResult<Vec<Product>>;

    /// Fetch a product by id
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Product>>;

    /// Insert a product, assigning a fresh id and `availability = true`
    async fn create(&self, product: NewProduct) -> StoreResult<Product>;

    /// Persist every field of an existing product
    async fn save(&self, product: &Product) -> StoreResult<Product>;

    /// Permanently remove a product
    async fn destroy(&self, product: &Product) -> StoreResult<()>;
}
