//! Certificate repository.
//!
//! Certificates are always read scoped to one owner and joined with their
//! course and the course's category in a single query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Category, Certificate, CertificateRecord, Course};
use crate::schema::{categories, certificates, courses};

const FETCH_CERTIFICATES: &str = "fetch certificates";

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Certificates owned by `user_id`, newest `issued_at` first.
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CertificateRecord>>;
}

#[derive(Clone)]
pub struct DieselCertificateRepository {
    pool: AsyncDbPool,
}

impl DieselCertificateRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CertificateRepository for DieselCertificateRepository {
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CertificateRecord>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| DatabaseErrorConverter::convert_pool_error(e, FETCH_CERTIFICATES))?;

        let rows = certificates::table
            .inner_join(courses::table.inner_join(categories::table))
            .filter(certificates::user_id.eq(user_id))
            .order((certificates::issued_at.desc(), certificates::id.asc()))
            .select((
                Certificate::as_select(),
                Course::as_select(),
                Category::as_select(),
            ))
            .load::<(Certificate, Course, Category)>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, FETCH_CERTIFICATES))?;

        Ok(rows.into_iter().map(CertificateRecord::from).collect())
    }
}
