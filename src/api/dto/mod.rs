//! Data Transfer Objects for API responses.
//!
//! DTOs are organized by domain:
//! - `category`, `course`, `certificate` - catalog payloads
//! - `health` - health check payloads
//! - `error` - common error response

mod category;
mod certificate;
mod course;
mod error;
mod health;

pub use category::CategoryResponse;
pub use certificate::CertificateResponse;
pub use course::{CourseResponse, CourseSummary};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
