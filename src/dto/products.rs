use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// JSON create payload (`POST /api/products`). Fields are optional so that
/// missing ones surface as a validation error, not a deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub discount: Option<f64>,
}

/// JSON partial update (`PUT /api/products/{id}`). Absent fields are left
/// untouched; `category_id` distinguishes "absent" from an explicit null.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub category_id: Option<Option<i32>>,
    pub description: Option<String>,
    pub discount: Option<f64>,
}

/// Admin form payload. The form submits everything as text; the price is
/// parsed and validated server-side.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image_url: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub description: String,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
