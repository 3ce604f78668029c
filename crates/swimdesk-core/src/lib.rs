//! # SwimDesk Core
//!
//! Core types, errors, and utilities shared by every SwimDesk client crate.
//!
//! This crate provides foundational types used throughout the client:
//!
//! - [`envelope`]: Named unwrap strategies for the backend's nested response envelope
//! - [`errors`]: Client error types with localized, caller-visible messages
//! - [`i18n`]: Display-language message catalogue
//! - [`pagination`]: List query parameters and page metadata
//! - [`serde`]: Lenient serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use swimdesk_core::envelope::{Shape, unwrap_list};
//! use swimdesk_core::pagination::ListQuery;
//!
//! let students: Vec<Student> = unwrap_list(&body, Shape::PagedList);
//! let query = ListQuery::default().with_search("somchai");
//! ```

pub mod envelope;
pub mod errors;
pub mod i18n;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use envelope::{Shape, unwrap_list, unwrap_one, unwrap_page};
pub use errors::{ClientError, StorageError};
pub use i18n::{Language, MessageKey};
pub use pagination::{ListQuery, Page, PageMeta};
