//! Course DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::CategoryResponse;
use crate::models::{Course, CourseRecord, CourseStatus};

/// Course fields shared by the course detail and certificate payloads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: CourseStatus,
    pub category_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
    pub category: CategoryResponse,
}

impl CourseSummary {
    pub fn new(course: Course, category: CategoryResponse) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            thumbnail_url: course.thumbnail_url,
            status: course.status,
            category_id: course.category_id,
            created_at: course.created_at.to_jiff(),
            updated_at: course.updated_at.to_jiff(),
            category,
        }
    }
}

/// A published course with its category and enrollment count.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "c1",
    "title": "Intro to Rust",
    "description": "Ownership, borrowing and traits",
    "thumbnail_url": null,
    "status": "PUBLISHED",
    "category_id": "cat-dev",
    "created_at": "2025-03-01T09:00:00Z",
    "updated_at": "2025-03-02T09:00:00Z",
    "category": {
        "id": "cat-dev",
        "name": "Development",
        "description": null,
        "created_at": "2025-03-01T09:00:00Z"
    },
    "enrollment_count": 42
}))]
pub struct CourseResponse {
    #[serde(flatten)]
    pub course: CourseSummary,
    pub enrollment_count: i64,
}

impl From<CourseRecord> for CourseResponse {
    fn from(record: CourseRecord) -> Self {
        Self {
            course: CourseSummary::new(record.course, record.category.into()),
            enrollment_count: record.enrollment_count,
        }
    }
}
