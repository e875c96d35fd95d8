//! Shared fixture for the messaging integration tests: an in-memory store
//! seeded with two sellers, one buyer, and two listings.

use hearth_core::AuthContext;
use hearth_messaging::MessagingService;
use hearth_store::{ListingRecord, ProfileRecord, Store};

pub struct Fixture {
    pub store: Store,
    pub service: MessagingService,
    pub craftsman: ListingRecord,
    pub loft: ListingRecord,
}

pub async fn fixture() -> Fixture {
    let store = Store::connect("sqlite::memory:")
        .await
        .expect("Failed to connect store");

    for (id, name, email) in [
        ("buyer-1", "Avery Buyer", "avery@example.com"),
        ("seller-1", "Sam Seller", "sam@example.com"),
        ("seller-2", "Priya Seller", "priya@example.com"),
    ] {
        store
            .profiles
            .save(&ProfileRecord::new(id, name, email))
            .await
            .expect("save profile");
    }

    let craftsman = ListingRecord::new(
        "seller-1",
        "Sunny Craftsman",
        "Three bedrooms near the park",
        450_000,
        "Portland",
        "OR",
        "house",
        3,
        2,
        1600,
    );
    let loft = ListingRecord::new(
        "seller-2",
        "Downtown Loft",
        "Open floor plan, city views",
        610_000,
        "Seattle",
        "WA",
        "condo",
        1,
        1,
        900,
    );
    store.listings.save(&craftsman).await.expect("save listing");
    store.listings.save(&loft).await.expect("save listing");

    let service = MessagingService::new(store.clone());

    Fixture {
        store,
        service,
        craftsman,
        loft,
    }
}

pub fn auth(user: &str) -> AuthContext {
    AuthContext::authenticated(user)
}
