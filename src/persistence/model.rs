//! Product record and the inputs used to create or overwrite one.

use serde::{Deserialize, Serialize, Serializer};

/// A persisted product row.
///
/// Handlers own a copy of this for the duration of one request; the store
/// owns the canonical row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub availability: bool,
}

impl Product {
    /// Overwrite every mutable field from a full update.
    pub fn apply(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.price = update.price;
        self.availability = update.availability;
    }

    /// Flip availability, leaving all other fields untouched.
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}

/// Fields accepted on creation. Availability always starts out `true`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Fields replaced wholesale by a full update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Sort order for listing products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrder {
    PriceDesc,
}

impl ProductOrder {
    /// SQL `ORDER BY` clause for this ordering.
    pub fn sql(&self) -> &'static str {
        match self {
            ProductOrder::PriceDesc => "price DESC, id ASC",
        }
    }
}

// Whole prices go out as JSON integers (300, not 300.0).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}
