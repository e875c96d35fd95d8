//! # hearth-core
//!
//! Shared types for the Hearth marketplace messaging core: the [`HearthError`]
//! taxonomy, the [`AuthContext`] identity accessor, listing domain enums, and
//! tracing initialization. Backend-agnostic; used by hearth-store and
//! hearth-messaging.

pub mod auth;
pub mod error;
pub mod logger;
pub mod types;

pub use auth::AuthContext;
pub use error::{HearthError, Result};
pub use logger::init_tracing;
pub use types::{ListingStatus, PropertyType};
