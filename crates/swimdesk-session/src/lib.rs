//! # SwimDesk Session
//!
//! Client-side persisted state: the authenticated session and the selected
//! tenant (branch).
//!
//! This crate provides:
//! - [`store`]: Key/value storage backends (JSON file, in-memory)
//! - [`keys`]: The fixed storage key names
//! - [`session`]: [`SessionStore`], token + user with validity checks
//! - [`tenant`]: [`TenantContext`], the selected tenant id
//!
//! Both stores share one backend but are cleared independently: switching
//! branch clears only the tenant, logging out clears both.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use swimdesk_session::{FileStore, SessionStore, TenantContext};
//!
//! let storage = Arc::new(FileStore::open("swimdesk-state.json")?);
//! let sessions = SessionStore::new(storage.clone(), policy);
//! let tenants = TenantContext::new(storage);
//!
//! sessions.set_session(&token, profile)?;
//! tenants.set_tenant("branch-01")?;
//! ```

pub mod keys;
pub mod session;
pub mod store;
pub mod tenant;

pub use session::SessionStore;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tenant::TenantContext;
