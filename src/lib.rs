//! # SwimDesk
//!
//! Client SDK and operator CLI for the SwimDesk swimming-school backend.
//!
//! ## Overview
//!
//! The backend is multi-tenant (one tenant per branch) and answers in a
//! nested envelope. This crate is the layer between a user agent and that
//! backend:
//!
//! - **Sessions**: token + normalized user persisted across restarts, with
//!   expiry and app-version cutoff checks
//! - **Tenant context**: the selected branch, sent as `x-tenant-id`
//! - **API services**: typed, authenticated calls per resource
//! - **Route guard**: navigation decisions from session validity and role
//! - **Realtime**: notification socket with mock mode and an offline queue
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── swimdesk-core/     # Envelope unwrapping, errors, pagination, i18n
//! ├── swimdesk-config/   # Environment-driven configuration
//! ├── swimdesk-auth/     # Token inspection, roles, route guard
//! ├── swimdesk-models/   # Entities and DTOs
//! └── swimdesk-session/  # Session store and tenant context
//! src/
//! ├── client.rs          # Shared HTTP pipeline (ApiClient)
//! ├── state.rs           # AppContext wiring
//! ├── middleware/        # Navigator and periodic session watch
//! ├── modules/           # Per-resource services
//! ├── realtime/          # Notification client and transports
//! └── cli/               # `swimdesk` binary commands
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use swimdesk::{AppContext, modules::StudentService};
//! use swimdesk_config::ClientConfig;
//! use swimdesk_core::ListQuery;
//!
//! let ctx = AppContext::open(ClientConfig::from_env())?;
//! ctx.login("manager@example.com", "secret").await?;
//! ctx.tenants.set_tenant("branch-01")?;
//!
//! let page = StudentService::list_students(&ctx.api, &ctx.auth(), &ListQuery::default()).await?;
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! API_URL=https://api.swimdesk.app
//! APP_LANGUAGE=th
//! SOCKET_SERVER_URL=https://realtime.swimdesk.app
//! SESSION_MIN_ISSUED_AT=2025-01-01
//! SWIMDESK_STATE_FILE=/var/lib/swimdesk/state.json
//! ```

pub mod cli;
pub mod client;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod realtime;
pub mod state;

pub use client::{ApiClient, Credentials, RequestAuth};
pub use state::AppContext;

// Re-export workspace crates for convenience
pub use swimdesk_auth;
pub use swimdesk_config;
pub use swimdesk_core;
pub use swimdesk_models;
pub use swimdesk_session;
