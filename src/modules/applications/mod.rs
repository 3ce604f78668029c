pub mod service;

pub use service::ApplicationService;
