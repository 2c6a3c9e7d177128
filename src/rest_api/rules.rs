//! Validation chains for the product routes and the typed inputs they
//! produce.

use crate::persistence::{NewProduct, ProductUpdate};

use super::validation::{RequestInput, RouteInput, Rule, ValidationChain};

pub const INVALID_ID: &str = "Invalid ID";
pub const EMPTY_NAME: &str = "Product name cannot be empty";
pub const INVALID_VALUE: &str = "Invalid value";
pub const EMPTY_PRICE: &str = "Product price cannot be empty";
pub const INVALID_PRICE: &str = "Invalid price";
pub const INVALID_AVAILABILITY: &str = "Invalid availability value";

fn id_checks(chain: ValidationChain) -> ValidationChain {
    chain.param("id", Rule::IsInt, INVALID_ID)
}

fn product_checks(chain: ValidationChain) -> ValidationChain {
    chain
        .body("name", Rule::NotEmpty, EMPTY_NAME)
        .body("price", Rule::IsNumeric, INVALID_VALUE)
        .body("price", Rule::NotEmpty, EMPTY_PRICE)
        .body("price", Rule::Positive, INVALID_PRICE)
}

/// `/:id` path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl RouteInput for ProductId {
    fn chain() -> ValidationChain {
        id_checks(ValidationChain::new())
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        input.param_int("id").map(ProductId)
    }
}

/// Create body: `{ name, price }`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInput(pub NewProduct);

impl RouteInput for CreateInput {
    fn chain() -> ValidationChain {
        product_checks(ValidationChain::new())
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        Some(CreateInput(NewProduct {
            name: input.body_text("name")?,
            price: input.body_number("price")?,
        }))
    }
}

/// Full update: `/:id` plus `{ name, price, availability }`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInput {
    pub id: i64,
    pub update: ProductUpdate,
}

impl RouteInput for UpdateInput {
    fn chain() -> ValidationChain {
        product_checks(id_checks(ValidationChain::new())).body(
            "availability",
            Rule::IsBoolean,
            INVALID_AVAILABILITY,
        )
    }

    fn from_input(input: &RequestInput) -> Option<Self> {
        Some(UpdateInput {
            id: input.param_int("id")?,
            update: ProductUpdate {
                name: input.body_text("name")?,
                price: input.body_number("price")?,
                availability: input.body_bool("availability")?,
            },
        })
    }
}
