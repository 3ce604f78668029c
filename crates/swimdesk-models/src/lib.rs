//! # SwimDesk Models
//!
//! Domain models and DTOs exchanged with the SwimDesk backend.
//!
//! The client treats entities as typed pass-through: fields are optional
//! unless the client itself depends on them, and no business rules are
//! enforced here beyond DTO validation before a create/update request.
//!
//! # Modules
//!
//! - [`common`]: Audit fields and media references shared by every entity
//! - [`users`]: User profiles, the normalized session user, login DTOs
//! - [`students`]: Student entities and DTOs
//! - [`instructors`]: Instructor entities and DTOs
//! - [`courses`]: Course entities and DTOs
//! - [`messages`]: Conversations and chat messages
//! - [`applications`]: Course applications and status updates
//! - [`news`]: News items
//! - [`media`]: Media lookups
//!
//! # Example
//!
//! ```ignore
//! use swimdesk_models::{CreateStudentDto, Student};
//! use validator::Validate;
//!
//! let dto = CreateStudentDto::new("Nok", "Srisuk", "nok@example.com", "secret123");
//! dto.validate()?;
//! ```

pub mod applications;
pub mod common;
pub mod courses;
pub mod instructors;
pub mod media;
pub mod messages;
pub mod news;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use applications::{
    Application, ApplicationStatus, CreateApplicationDto, UpdateApplicationStatusDto,
};
pub use common::{AuditFields, MediaRef};
pub use courses::{Course, CourseSchedule, CreateCourseDto, UpdateCourseDto};
pub use instructors::{CreateInstructorDto, Instructor, UpdateInstructorDto};
pub use media::Media;
pub use messages::{ChatMessage, Conversation, ConversationWithUsers, OutgoingMessage};
pub use news::{CreateNewsDto, NewsItem, UpdateNewsDto};
pub use students::{CreateStudentDto, Student, UpdateStudentDto};
pub use users::{LoginRequest, LoginResponse, SessionUser, UserProfile};
