//! # Product Handlers
//!
//! One handler per operation. Each runs after its route's validation chain
//! has passed, performs one persistence operation and maps the outcome to a
//! response.
//!
//! Operations on an existing product always look it up first; a missing id
//! ends with 404 before anything is written.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::persistence::{Product, ProductOrder, ProductStore};

use super::errors::{ApiError, ApiResult};
use super::response::DataResponse;
use super::rules::{CreateInput, ProductId, UpdateInput};
use super::validation::Validated;

/// Product state shared across handlers
pub struct ProductState {
    pub store: Arc<dyn ProductStore>,
}

impl ProductState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

type SharedState = State<Arc<ProductState>>;

async fn find_product(state: &ProductState, id: i64) -> ApiResult<Product> {
    match state.store.find_by_id(id).await? {
        Some(product) => Ok(product),
        None => {
            tracing::debug!(id, "product not found");
            Err(ApiError::NotFound)
        }
    }
}

/// `GET /` - every product, most expensive first
pub async fn list_products(
    State(state): SharedState,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let products = state.store.find_all(ProductOrder::PriceDesc).await?;
    Ok(Json(DataResponse::new(products)))
}

/// `GET /:id`
pub async fn get_product(
    State(state): SharedState,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let product = find_product(&state, id).await?;
    Ok(Json(DataResponse::new(product)))
}

/// `POST /`
pub async fn create_product(
    State(state): SharedState,
    Validated(CreateInput(new_product)): Validated<CreateInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Product>>)> {
    let product = state.store.create(new_product).await?;
    tracing::info!(id = product.id, name = %product.name, "product created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(product))))
}

/// `PUT /:id` - replace name, price and availability
pub async fn update_product(
    State(state): SharedState,
    Validated(UpdateInput { id, update }): Validated<UpdateInput>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let mut product = find_product(&state, id).await?;
    product.apply(update);

    let saved = state.store.save(&product).await?;
    tracing::info!(id, "product updated");

    Ok(Json(DataResponse::new(saved)))
}

/// `PATCH /:id` - flip availability
pub async fn toggle_availability(
    State(state): SharedState,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let mut product = find_product(&state, id).await?;
    product.toggle_availability();

    let saved = state.store.save(&product).await?;
    tracing::info!(id, availability = saved.availability, "product availability toggled");

    Ok(Json(DataResponse::new(saved)))
}

/// `DELETE /:id`
pub async fn delete_product(
    State(state): SharedState,
    Validated(ProductId(id)): Validated<ProductId>,
) -> ApiResult<Json<DataResponse<&'static str>>> {
    let product = find_product(&state, id).await?;
    state.store.destroy(&product).await?;
    tracing::info!(id, "product deleted");

    Ok(Json(DataResponse::deleted()))
}
