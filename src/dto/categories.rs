use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}
