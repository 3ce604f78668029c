//! # SwimDesk Auth
//!
//! Client-side token inspection, role normalization, and navigation guarding.
//!
//! This crate provides:
//!
//! - [`claims`]: JWT payload fields the client relies on
//! - [`jwt`]: Unverified payload decoding and token validity checks
//! - [`roles`]: The closed [`Role`] enum and its normalization from user profiles
//! - [`guard`]: Pure route guard deciding allow/redirect for a navigation
//!
//! # Token Validity
//!
//! The client cannot verify token signatures; that is the backend's job.
//! It only reads the payload to decide whether a session is worth using:
//!
//! - `exp` must be present and in the future
//! - `iat` must be present and not older than the configured app-version cutoff
//!
//! # Example
//!
//! ```ignore
//! use swimdesk_auth::{TokenPolicy, token_status};
//!
//! let policy = TokenPolicy::from(&session_config);
//! if token_status(Some(&token), &policy, Utc::now()).is_valid() {
//!     // use the token
//! }
//! ```

pub mod claims;
pub mod guard;
pub mod jwt;
pub mod roles;

// Re-export commonly used types at crate root
pub use claims::TokenClaims;
pub use guard::{GuardDecision, RouteGuard, Section, SessionView};
pub use jwt::{TokenPolicy, TokenStatus, decode_unverified, token_status};
pub use roles::Role;
