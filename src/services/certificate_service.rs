//! Certificates of the signed-in user.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::CertificateRecord;
use crate::repositories::CertificateRepository;

#[derive(Clone)]
pub struct CertificateService {
    repo: Arc<dyn CertificateRepository>,
}

impl CertificateService {
    pub fn new(repo: Arc<dyn CertificateRepository>) -> Self {
        Self { repo }
    }

    /// Certificates owned by `user_id`, newest first. Never returns another
    /// user's certificate.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<CertificateRecord>> {
        self.repo.list_for_user(user_id).await
    }
}
