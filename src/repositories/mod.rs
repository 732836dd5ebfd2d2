//! Repository layer for read-only data access.
//!
//! Each repository is a trait so services can be exercised against
//! in-memory stores; the diesel implementations share one async pool.

mod category_repo;
mod certificate_repo;
mod course_repo;
#[cfg(test)]
pub(crate) mod testing;

pub use category_repo::{CategoryRepository, DieselCategoryRepository};
pub use certificate_repo::{CertificateRepository, DieselCertificateRepository};
pub use course_repo::{CourseRepository, DieselCourseRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl Repositories {
    /// Creates the diesel-backed repositories over `pool`.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            certificates: Arc::new(DieselCertificateRepository::new(pool.clone())),
            courses: Arc::new(DieselCourseRepository::new(pool)),
        }
    }

    /// Assembles repositories from arbitrary implementations.
    pub fn from_parts(
        categories: Arc<dyn CategoryRepository>,
        certificates: Arc<dyn CertificateRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self {
            categories,
            certificates,
            courses,
        }
    }
}
