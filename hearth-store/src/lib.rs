//! Store crate: SQLite persistence and change feed for the marketplace
//! messaging core.
//!
//! ## Modules
//!
//! - [`error`] – Store error types
//! - [`models`] – MessageRecord, ListingRecord, ProfileRecord, MessageContextRow
//! - [`message_repo`] – MessageRepository (messages table + feed publication)
//! - [`listing_repo`] – ListingRepository (listings table)
//! - [`profile_repo`] – ProfileRepository (profiles table)
//! - [`change_feed`] – row-level insert/update notifications
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`store`] – Store facade wiring one pool, the repositories, and one feed

mod change_feed;
mod error;
mod listing_repo;
mod message_repo;
mod models;
mod profile_repo;
mod sqlite_pool;
mod store;


pub use change_feed::{ChangeFeed, ChangeOp, MessageChange, SubscriptionFilter};
pub use error::StoreError;
pub use listing_repo::ListingRepository;
pub use message_repo::MessageRepository;
pub use models::{ListingRecord, MessageContextRow, MessageRecord, ProfileRecord};
pub use profile_repo::ProfileRepository;
pub use sqlite_pool::SqlitePoolManager;
pub use store::Store;
