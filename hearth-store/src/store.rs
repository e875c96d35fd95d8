//! Store facade: wires one pool, the three repositories, and one change feed.
//! Isolates assembly from callers; every consumer of the data layer goes
//! through this.

use crate::change_feed::ChangeFeed;
use crate::error::StoreError;
use crate::listing_repo::ListingRepository;
use crate::message_repo::MessageRepository;
use crate::profile_repo::ProfileRepository;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct Store {
    pub messages: MessageRepository,
    pub listings: ListingRepository,
    pub profiles: ProfileRepository,
    feed: ChangeFeed,
}

impl Store {
    /// Connects to the database and initializes every table.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let feed = ChangeFeed::new();

        let messages = MessageRepository::new(pool_manager.clone(), feed.clone()).await?;
        let listings = ListingRepository::new(pool_manager.clone()).await?;
        let profiles = ProfileRepository::new(pool_manager).await?;

        Ok(Self {
            messages,
            listings,
            profiles,
            feed,
        })
    }

    /// The feed repositories publish row changes on.
    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
