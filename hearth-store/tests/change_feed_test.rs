//! Integration tests for feed publication: every successful write emits a
//! row-level change, using a temp-file SQLite database.

use tempfile::TempDir;

use hearth_store::{ChangeOp, ListingRecord, MessageRecord, ProfileRecord, Store};

async fn store_on_disk(dir: &TempDir) -> Store {
    let db_path = dir.path().join("hearth-test.db");
    let url = format!("sqlite://{}", db_path.display());
    Store::connect(&url).await.expect("Failed to connect store")
}

async fn seed(store: &Store) -> ListingRecord {
    store
        .profiles
        .save(&ProfileRecord::new("buyer-1", "Avery Buyer", "avery@example.com"))
        .await
        .expect("save profile");
    store
        .profiles
        .save(&ProfileRecord::new("seller-1", "Sam Seller", "sam@example.com"))
        .await
        .expect("save profile");

    let listing = ListingRecord::new(
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
    store.listings.save(&listing).await.expect("save listing");
    listing
}

#[tokio::test]
async fn test_save_publishes_an_insert_change() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_on_disk(&dir).await;
    let listing = seed(&store).await;

    let mut events = store.feed().subscribe();

    let message = MessageRecord::new(&listing.id, "buyer-1", "seller-1", "hello");
    store.messages.save(&message).await.expect("save");

    let change = events.recv().await.expect("change should arrive");
    assert_eq!(change.op, ChangeOp::Insert);
    assert_eq!(change.row.id, message.id);
    assert!(!change.row.is_read);
}

#[tokio::test]
async fn test_mark_thread_read_publishes_one_update_per_row() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_on_disk(&dir).await;
    let listing = seed(&store).await;

    for content in ["one", "two"] {
        let message = MessageRecord::new(&listing.id, "buyer-1", "seller-1", content);
        store.messages.save(&message).await.expect("save");
    }

    let mut events = store.feed().subscribe();

    let flipped = store
        .messages
        .mark_thread_read(&listing.id, "seller-1")
        .await
        .expect("mark read");
    assert_eq!(flipped, 2);

    for _ in 0..2 {
        let change = events.recv().await.expect("change should arrive");
        assert_eq!(change.op, ChangeOp::Update);
        assert!(change.row.is_read);
        assert_eq!(change.row.receiver_id, "seller-1");
    }

    // Idempotent re-run publishes nothing.
    let again = store
        .messages
        .mark_thread_read(&listing.id, "seller-1")
        .await
        .expect("mark read twice");
    assert_eq!(again, 0);
    assert!(events.try_recv().is_err());
}
