use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog entry as stored in the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Relative path under the static directory, e.g. `img/1700000000_x.png`.
    pub image_path: Option<String>,
    /// Optional external link shown alongside the product.
    pub url: Option<String>,
}

/// Fields of a product create/edit form, before any row exists.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    /// Raw price string as submitted; parsed (and validated) by the storage
    /// layer so a bad value never reaches the table.
    pub price: String,
    pub url: Option<String>,
    pub image_path: Option<String>,
}
