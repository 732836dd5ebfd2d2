mod category;
mod certificate;
mod course;

pub use category::Category;
pub use certificate::{Certificate, CertificateRecord};
pub use course::{Course, CourseRecord, CourseStatus};
