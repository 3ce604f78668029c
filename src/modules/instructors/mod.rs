pub mod service;

pub use service::InstructorService;
