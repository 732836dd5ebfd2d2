//! Public catalog reads: categories and published courses.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Category, CourseRecord};
use crate::repositories::{CategoryRepository, CourseRepository};

#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            categories,
            courses,
        }
    }

    /// All categories, sorted by name.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.list_ordered_by_name().await
    }

    /// A published course by id.
    ///
    /// # Returns
    /// The course if it exists and is published, or `NotFound` otherwise.
    /// Drafts and archived courses are indistinguishable from missing ids.
    pub async fn get_published_course(&self, id: &str) -> AppResult<CourseRecord> {
        self.courses
            .find_published(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course", "id", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseStatus;
    use crate::repositories::testing::{InMemoryStore, category, course};

    fn service(store: InMemoryStore) -> CatalogService {
        let store = Arc::new(store);
        CatalogService::new(store.clone(), store)
    }

    #[tokio::test]
    async fn test_categories_sorted_by_name() {
        let service = service(
            InMemoryStore::new()
                .with_category(category("3", "Web"))
                .with_category(category("1", "Art"))
                .with_category(category("2", "Music")),
        );

        let names: Vec<String> = service
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Art", "Music", "Web"]);
    }

    #[tokio::test]
    async fn test_unpublished_course_is_not_found() {
        let service = service(
            InMemoryStore::new()
                .with_category(category("cat", "Art"))
                .with_course(course("c1", "cat", CourseStatus::Published))
                .with_course(course("c2", "cat", CourseStatus::Draft))
                .with_course(course("c3", "cat", CourseStatus::Archived))
                .with_enrollment("u1", "c1")
                .with_enrollment("u2", "c1"),
        );

        let found = service.get_published_course("c1").await.unwrap();
        assert_eq!(found.course.id, "c1");
        assert_eq!(found.category.id, "cat");
        assert_eq!(found.enrollment_count, 2);

        for id in ["c2", "c3", "missing"] {
            match service.get_published_course(id).await {
                Err(AppError::NotFound { entity, value, .. }) => {
                    assert_eq!(entity, "Course");
                    assert_eq!(value, id);
                }
                other => panic!("Expected NotFound for {}, got {:?}", id, other),
            }
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let service = service(InMemoryStore::new().failing("connection refused"));
        let err = service.list_categories().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch categories");
        assert_eq!(err.diagnostic().as_deref(), Some("connection refused"));
    }
}
