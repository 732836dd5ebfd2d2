//! Course repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Category, Course, CourseRecord, CourseStatus};
use crate::schema::{categories, courses, enrollments};

const FETCH_COURSE: &str = "fetch course";

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// The course with `course_id` if, and only if, it is published.
    ///
    /// A draft or archived course yields `None`, exactly like a missing id.
    async fn find_published(&self, course_id: &str) -> AppResult<Option<CourseRecord>>;
}

#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: AsyncDbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_published(&self, course_id: &str) -> AppResult<Option<CourseRecord>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseErrorConverter::convert_pool_error(e, FETCH_COURSE))?;

        let found = courses::table
            .inner_join(categories::table)
            .filter(courses::id.eq(course_id))
            .filter(courses::status.eq(CourseStatus::Published))
            .select((Course::as_select(), Category::as_select()))
            .first::<(Course, Category)>(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, FETCH_COURSE))?;

        let Some((course, category)) = found else {
            return Ok(None);
        };

        let enrollment_count = enrollments::table
            .filter(enrollments::course_id.eq(&course.id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, FETCH_COURSE))?;

        Ok(Some(CourseRecord {
            course,
            category,
            enrollment_count,
        }))
    }
}
