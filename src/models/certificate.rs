use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::models::{Category, Course};

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq)]
#[diesel(table_name = crate::schema::certificates)]
#[diesel(belongs_to(Course))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub issued_at: Timestamp,
}

/// A certificate joined with the course it was issued for and that
/// course's category.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateRecord {
    pub certificate: Certificate,
    pub course: Course,
    pub category: Category,
}

impl From<(Certificate, Course, Category)> for CertificateRecord {
    fn from((certificate, course, category): (Certificate, Course, Category)) -> Self {
        Self {
            certificate,
            course,
            category,
        }
    }
}
