pub mod service;

pub use service::NewsService;
