//! Per-resource API services.
//!
//! Each module exposes a unit struct with associated async functions taking
//! the shared [`ApiClient`](crate::client::ApiClient) and the caller's
//! [`RequestAuth`](crate::client::RequestAuth).

pub mod applications;
pub mod auth;
pub mod courses;
pub mod instructors;
pub mod media;
pub mod messages;
pub mod news;
pub mod students;
pub mod users;

pub use self::applications::ApplicationService;
pub use self::auth::AuthService;
pub use self::courses::CourseService;
pub use self::instructors::InstructorService;
pub use self::media::MediaService;
pub use self::messages::MessageService;
pub use self::news::NewsService;
pub use self::students::StudentService;
pub use self::users::UserService;
