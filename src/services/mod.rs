//! Service layer for business logic operations.
//!
//! Services apply the read rules (visibility, ownership scoping) on top of
//! the repositories and translate empty results into domain errors.

mod catalog_service;
mod certificate_service;
pub mod session;

pub use catalog_service::CatalogService;
pub use certificate_service::CertificateService;
pub use session::{JwtSessionProvider, Session, SessionProvider};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since repositories sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
    pub certificates: CertificateService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            catalog: CatalogService::new(repos.categories, repos.courses),
            certificates: CertificateService::new(repos.certificates),
        }
    }
}
