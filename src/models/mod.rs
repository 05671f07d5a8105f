pub mod auth;
pub mod category;
pub mod course;
pub mod enrollment;
pub mod resource;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
pub use category::{Category, CategoryDraft};
pub use course::{Course, CourseDraft};
pub use enrollment::{Enrollment, EnrollmentDraft};
pub use resource::{FieldValue, ReportColumn, Resource};
pub use user::{User, UserDraft};
