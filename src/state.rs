//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::Environment;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::{Services, SessionProvider};

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since services, the pool and the session provider all
/// sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool, for health checks
    pub db_pool: AsyncDbPool,
    /// Resolves the caller's session on protected routes
    pub sessions: Arc<dyn SessionProvider>,
    /// Deployment environment, fixed at startup
    pub environment: Environment,
}

impl AppState {
    /// Creates a new AppState backed by diesel repositories over `pool`.
    pub fn new(
        pool: AsyncDbPool,
        sessions: Arc<dyn SessionProvider>,
        environment: Environment,
    ) -> Self {
        let repos = Repositories::new(pool.clone());
        Self::from_parts(Services::new(repos), pool, sessions, environment)
    }

    /// Assembles state from already-built parts.
    pub fn from_parts(
        services: Services,
        db_pool: AsyncDbPool,
        sessions: Arc<dyn SessionProvider>,
        environment: Environment,
    ) -> Self {
        Self {
            services,
            db_pool,
            sessions,
            environment,
        }
    }
}
