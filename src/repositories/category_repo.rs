//! Category repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::Category;

const FETCH_CATEGORIES: &str = "fetch categories";

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category, ordered by name ascending.
    async fn list_ordered_by_name(&self) -> AppResult<Vec<Category>>;
}

#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: AsyncDbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_ordered_by_name(&self) -> AppResult<Vec<Category>> {
        use crate::schema::categories::dsl::*;

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseErrorConverter::convert_pool_error(e, FETCH_CATEGORIES))?;

        categories
            .order((name.asc(), id.asc()))
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, FETCH_CATEGORIES))
    }
}
