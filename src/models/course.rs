use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::Category;

/// Publication state of a course. Only `Published` courses are visible
/// through the read endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, utoipa::ToSchema)]
#[db_enum(existing_type_path = "crate::schema::sql_types::CourseStatus")]
#[db_enum(value_style = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn is_visible(&self) -> bool {
        matches!(self, CourseStatus::Published)
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Draft => write!(f, "DRAFT"),
            CourseStatus::Published => write!(f, "PUBLISHED"),
            CourseStatus::Archived => write!(f, "ARCHIVED"),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(belongs_to(Category))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: CourseStatus,
    pub category_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A published course with its category and enrollment count.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub course: Course,
    pub category: Category,
    pub enrollment_count: i64,
}
