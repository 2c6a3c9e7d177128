//! Product router.
//!
//! Each route is bound to its method, path and handler; the handler's
//! [`Validated`](super::validation::Validated) argument carries the route's
//! validation chain and error gate, so both run before the handler body.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use super::handler::{
    create_product, delete_product, get_product, list_products, toggle_availability,
    update_product, ProductState,
};

/// Create product routes, mounted under `/api/products`
pub fn product_routes(state: Arc<ProductState>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(state)
}
