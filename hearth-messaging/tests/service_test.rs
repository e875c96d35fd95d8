//! Integration tests for [`hearth_messaging::MessagingService`].
//!
//! Covers the conversation list, read-flag bookkeeping, the thread view, and
//! the send paths over an in-memory SQLite store.

mod common;

use chrono::{Duration, Utc};

use common::{auth, fixture};
use hearth_core::{AuthContext, HearthError};
use hearth_store::MessageRecord;

#[tokio::test]
async fn test_every_operation_requires_a_viewer() {
    let fx = fixture().await;
    let anon = AuthContext::anonymous();

    assert!(matches!(
        fx.service.list_conversations(&anon).await,
        Err(HearthError::AuthRequired)
    ));
    assert!(matches!(
        fx.service.mark_conversation_read(&anon, &fx.craftsman.id).await,
        Err(HearthError::AuthRequired)
    ));
    assert!(matches!(
        fx.service.fetch_thread(&anon, &fx.craftsman.id).await,
        Err(HearthError::AuthRequired)
    ));
    assert!(matches!(
        fx.service
            .send_message(&anon, &fx.craftsman.id, "seller-1", "hi")
            .await,
        Err(HearthError::AuthRequired)
    ));
    assert!(matches!(
        fx.service.unread_total(&anon).await,
        Err(HearthError::AuthRequired)
    ));
    assert!(matches!(
        fx.service.subscribe_to_changes(&anon),
        Err(HearthError::AuthRequired)
    ));
}

#[tokio::test]
async fn test_one_conversation_per_listing_most_recent_first() {
    let fx = fixture().await;
    let base = Utc::now() - Duration::hours(2);

    // Older activity on the craftsman, newer on the loft.
    for (i, content) in ["hello", "still there?"].iter().enumerate() {
        let msg = MessageRecord::new(&fx.craftsman.id, "buyer-1", "seller-1", *content)
            .with_created_at(base + Duration::minutes(i as i64));
        fx.store.messages.save(&msg).await.expect("save");
    }
    let msg = MessageRecord::new(&fx.loft.id, "buyer-1", "seller-2", "tour this week?")
        .with_created_at(base + Duration::hours(1));
    fx.store.messages.save(&msg).await.expect("save");

    let conversations = fx
        .service
        .list_conversations(&auth("buyer-1"))
        .await
        .expect("list");

    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].listing_id, fx.loft.id);
    assert_eq!(conversations[0].listing_title, "Downtown Loft");
    assert_eq!(conversations[0].other_user_name, "Priya Seller");
    assert_eq!(conversations[0].last_message, "tour this week?");
    assert_eq!(conversations[1].listing_id, fx.craftsman.id);
    assert_eq!(conversations[1].last_message, "still there?");
}

#[tokio::test]
async fn test_mark_conversation_read_clears_badge_idempotently() {
    let fx = fixture().await;
    let seller = auth("seller-1");

    for content in ["first", "second"] {
        let msg = MessageRecord::new(&fx.craftsman.id, "buyer-1", "seller-1", content);
        fx.store.messages.save(&msg).await.expect("save");
    }

    let before = fx.service.list_conversations(&seller).await.expect("list");
    assert_eq!(before[0].unread_count, 2);

    let flipped = fx
        .service
        .mark_conversation_read(&seller, &fx.craftsman.id)
        .await
        .expect("mark read");
    assert_eq!(flipped, 2);

    let after = fx.service.list_conversations(&seller).await.expect("list");
    assert_eq!(after[0].unread_count, 0);

    let again = fx
        .service
        .mark_conversation_read(&seller, &fx.craftsman.id)
        .await
        .expect("mark read twice");
    assert_eq!(again, 0);

    let still = fx.service.list_conversations(&seller).await.expect("list");
    assert_eq!(still[0].unread_count, 0);
}

#[tokio::test]
async fn test_send_then_refetch_shows_message_last() {
    let fx = fixture().await;
    let buyer = auth("buyer-1");
    let base = Utc::now() - Duration::minutes(30);

    let opener = MessageRecord::new(&fx.craftsman.id, "seller-1", "buyer-1", "any questions?")
        .with_created_at(base);
    fx.store.messages.save(&opener).await.expect("save");

    let sent = fx
        .service
        .send_message(&buyer, &fx.craftsman.id, "seller-1", "yes, about the roof")
        .await
        .expect("send");

    let thread = fx
        .service
        .fetch_thread(&buyer, &fx.craftsman.id)
        .await
        .expect("fetch thread");

    assert_eq!(thread.len(), 2);
    assert_eq!(thread.last().unwrap().id, sent.id);
    assert_eq!(thread.last().unwrap().content, "yes, about the roof");
    assert_eq!(thread.last().unwrap().sender_name, "Avery Buyer");
}

#[tokio::test]
async fn test_send_trims_content_and_rejects_empty() {
    let fx = fixture().await;
    let buyer = auth("buyer-1");

    let sent = fx
        .service
        .send_message(&buyer, &fx.craftsman.id, "seller-1", "  hello there  ")
        .await
        .expect("send");
    assert_eq!(sent.content, "hello there");

    assert!(matches!(
        fx.service
            .send_message(&buyer, &fx.craftsman.id, "seller-1", "   ")
            .await,
        Err(HearthError::EmptyMessage)
    ));

    // Nothing was written for the rejected send.
    let thread = fx
        .service
        .fetch_thread(&buyer, &fx.craftsman.id)
        .await
        .expect("fetch thread");
    assert_eq!(thread.len(), 1);
}

#[tokio::test]
async fn test_contact_seller_resolves_the_listing_seller() {
    let fx = fixture().await;
    let buyer = auth("buyer-1");

    let sent = fx
        .service
        .contact_seller(&buyer, &fx.loft.id, "is the loft still available?")
        .await
        .expect("contact");

    assert_eq!(sent.receiver_id, "seller-2");
    assert_eq!(sent.sender_id, "buyer-1");

    assert!(matches!(
        fx.service.contact_seller(&buyer, "no-such-listing", "hi").await,
        Err(HearthError::DataFetch(_))
    ));

    let seller = auth("seller-2");
    assert!(matches!(
        fx.service.contact_seller(&seller, &fx.loft.id, "hi me").await,
        Err(HearthError::WriteFailed(_))
    ));
}

#[tokio::test]
async fn test_open_thread_clears_unread_and_returns_history() {
    let fx = fixture().await;
    let seller = auth("seller-1");
    let base = Utc::now() - Duration::minutes(10);

    for i in 0..3 {
        let msg = MessageRecord::new(&fx.craftsman.id, "buyer-1", "seller-1", format!("q{i}"))
            .with_created_at(base + Duration::minutes(i));
        fx.store.messages.save(&msg).await.expect("save");
    }

    let thread = fx
        .service
        .open_thread(&seller, &fx.craftsman.id)
        .await
        .expect("open thread");

    assert_eq!(thread.len(), 3);
    assert_eq!(thread[0].content, "q0");
    assert_eq!(
        fx.service.unread_total(&seller).await.expect("unread"),
        0
    );
}

#[tokio::test]
async fn test_unread_total_spans_listings() {
    let fx = fixture().await;

    // seller-1 owns both the craftsman thread and a thread on the loft they
    // started as a buyer.
    let msg = MessageRecord::new(&fx.craftsman.id, "buyer-1", "seller-1", "ping");
    fx.store.messages.save(&msg).await.expect("save");
    let msg = MessageRecord::new(&fx.loft.id, "seller-2", "seller-1", "pong");
    fx.store.messages.save(&msg).await.expect("save");

    assert_eq!(
        fx.service
            .unread_total(&auth("seller-1"))
            .await
            .expect("unread"),
        2
    );
    assert_eq!(
        fx.service
            .unread_total(&auth("buyer-1"))
            .await
            .expect("unread"),
        0
    );
}
