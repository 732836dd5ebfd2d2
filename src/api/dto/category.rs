//! Category DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Category;

/// A course category as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "cat-design",
    "name": "Design",
    "description": "Visual and product design",
    "created_at": "2025-03-01T09:00:00Z"
}))]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at.to_jiff(),
        }
    }
}
