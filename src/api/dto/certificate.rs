//! Certificate DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use super::CourseSummary;
use crate::models::CertificateRecord;

/// A certificate held by the caller, with the course it was issued for.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CertificateResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    #[schema(value_type = String, format = DateTime)]
    pub issued_at: jiff::Timestamp,
    pub course: CourseSummary,
}

impl From<CertificateRecord> for CertificateResponse {
    fn from(record: CertificateRecord) -> Self {
        let CertificateRecord {
            certificate,
            course,
            category,
        } = record;

        Self {
            id: certificate.id,
            user_id: certificate.user_id,
            course_id: certificate.course_id,
            issued_at: certificate.issued_at.to_jiff(),
            course: CourseSummary::new(course, category.into()),
        }
    }
}
