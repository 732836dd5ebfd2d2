//! In-memory repositories for service and router tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;

use super::{CategoryRepository, CertificateRepository, CourseRepository};
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Category, Certificate, CertificateRecord, Course, CourseRecord, CourseStatus};

pub fn at(second: i64) -> jiff_diesel::Timestamp {
    jiff_diesel::Timestamp::from(jiff::Timestamp::from_second(second).expect("valid timestamp"))
}

/// A pool pointing at a closed port; checkouts time out quickly.
pub fn detached_pool() -> AsyncDbPool {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(
        "postgres://academy@127.0.0.1:1/academy",
    );
    Pool::builder()
        .connection_timeout(Duration::from_millis(200))
        .build_unchecked(manager)
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: at(1_700_000_000),
    }
}

pub fn course(id: &str, category_id: &str, status: CourseStatus) -> Course {
    Course {
        id: id.to_string(),
        title: format!("Course {}", id),
        description: Some("Learn things".to_string()),
        thumbnail_url: None,
        status,
        category_id: category_id.to_string(),
        created_at: at(1_700_000_000),
        updated_at: at(1_700_000_100),
    }
}

pub fn certificate(id: &str, user_id: &str, course_id: &str, issued_second: i64) -> Certificate {
    Certificate {
        id: id.to_string(),
        user_id: user_id.to_string(),
        course_id: course_id.to_string(),
        issued_at: at(issued_second),
    }
}

#[derive(Default)]
struct StoreState {
    categories: Vec<Category>,
    courses: Vec<Course>,
    certificates: Vec<Certificate>,
    /// (user_id, course_id)
    enrollments: Vec<(String, String)>,
    failure: Option<String>,
}

/// One store backing all three repository traits, with the same ordering,
/// scoping and visibility rules as the diesel queries.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, category: Category) -> Self {
        self.state.lock().expect("state lock").categories.push(category);
        self
    }

    pub fn with_course(self, course: Course) -> Self {
        self.state.lock().expect("state lock").courses.push(course);
        self
    }

    pub fn with_certificate(self, certificate: Certificate) -> Self {
        self.state
            .lock()
            .expect("state lock")
            .certificates
            .push(certificate);
        self
    }

    pub fn with_enrollment(self, user_id: &str, course_id: &str) -> Self {
        self.state
            .lock()
            .expect("state lock")
            .enrollments
            .push((user_id.to_string(), course_id.to_string()));
        self
    }

    /// Every later read fails with a database error carrying `message`.
    pub fn failing(self, message: &str) -> Self {
        self.state.lock().expect("state lock").failure = Some(message.to_string());
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn begin_read(&self, operation: &str) -> AppResult<std::sync::MutexGuard<'_, StoreState>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let state = self.state.lock().expect("state lock");
        if let Some(message) = &state.failure {
            return Err(AppError::database(operation, anyhow::anyhow!("{}", message)));
        }
        Ok(state)
    }

    fn category_of(state: &StoreState, course: &Course) -> Option<Category> {
        state
            .categories
            .iter()
            .find(|c| c.id == course.category_id)
            .cloned()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_ordered_by_name(&self) -> AppResult<Vec<Category>> {
        let state = self.begin_read("fetch categories")?;
        let mut categories = state.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(categories)
    }
}

#[async_trait]
impl CertificateRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CertificateRecord>> {
        let state = self.begin_read("fetch certificates")?;
        let mut records: Vec<CertificateRecord> = state
            .certificates
            .iter()
            .filter(|cert| cert.user_id == user_id)
            .filter_map(|cert| {
                let course = state.courses.iter().find(|c| c.id == cert.course_id)?;
                let category = Self::category_of(&state, course)?;
                Some(CertificateRecord {
                    certificate: cert.clone(),
                    course: course.clone(),
                    category,
                })
            })
            .collect();
        records.sort_by(|a, b| {
            b.certificate
                .issued_at
                .to_jiff()
                .cmp(&a.certificate.issued_at.to_jiff())
                .then_with(|| a.certificate.id.cmp(&b.certificate.id))
        });
        Ok(records)
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_published(&self, course_id: &str) -> AppResult<Option<CourseRecord>> {
        let state = self.begin_read("fetch course")?;
        let Some(course) = state
            .courses
            .iter()
            .find(|c| c.id == course_id && c.status.is_visible())
        else {
            return Ok(None);
        };
        let Some(category) = Self::category_of(&state, course) else {
            return Ok(None);
        };
        let enrollment_count = state
            .enrollments
            .iter()
            .filter(|(_, enrolled)| enrolled == course_id)
            .count() as i64;

        Ok(Some(CourseRecord {
            course: course.clone(),
            category,
            enrollment_count,
        }))
    }
}
