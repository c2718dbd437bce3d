use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: i32,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}
