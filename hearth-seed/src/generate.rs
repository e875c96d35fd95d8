//! Deterministic demo data: two sellers, two buyers, three listings, and a
//! scripted message history mixing read and unread traffic in both
//! directions.

use chrono::{Duration, Utc};

use hearth_core::{ListingStatus, PropertyType};
use hearth_store::{ListingRecord, MessageRecord, ProfileRecord};

pub const BUYER_AVERY: &str = "u-avery";
pub const BUYER_NOOR: &str = "u-noor";
pub const SELLER_SAM: &str = "u-sam";
pub const SELLER_PRIYA: &str = "u-priya";

pub fn profiles() -> Vec<ProfileRecord> {
    vec![
        ProfileRecord::new(BUYER_AVERY, "Avery Chen", "avery@example.com"),
        ProfileRecord::new(BUYER_NOOR, "Noor Haddad", "noor@example.com"),
        ProfileRecord::new(SELLER_SAM, "Sam Ortega", "sam@example.com"),
        ProfileRecord::new(SELLER_PRIYA, "Priya Patel", "priya@example.com"),
    ]
}

pub fn listings() -> Vec<ListingRecord> {
    let mut craftsman = ListingRecord::new(
        SELLER_SAM,
        "Sunny Craftsman",
        "Three bedrooms near Laurelhurst Park, new roof.",
        450_000,
        "Portland",
        "OR",
        PropertyType::House.as_str(),
        3,
        2,
        1600,
    );
    craftsman.id = "l-craftsman".to_string();

    let mut loft = ListingRecord::new(
        SELLER_PRIYA,
        "Downtown Loft",
        "Open floor plan, floor-to-ceiling windows.",
        610_000,
        "Seattle",
        "WA",
        PropertyType::Condo.as_str(),
        1,
        1,
        900,
    );
    loft.id = "l-loft".to_string();

    let mut bungalow = ListingRecord::new(
        SELLER_SAM,
        "Creekside Bungalow",
        "Quiet street, big yard, needs some love.",
        320_000,
        "Portland",
        "OR",
        PropertyType::House.as_str(),
        2,
        1,
        1100,
    );
    bungalow.id = "l-bungalow".to_string();
    bungalow.status = ListingStatus::Pending.as_str().to_string();

    vec![craftsman, loft, bungalow]
}

/// Message script: each entry is (listing, sender, receiver, content,
/// minutes before now, already read).
pub fn messages() -> Vec<MessageRecord> {
    let script: Vec<(&str, &str, &str, &str, i64, bool)> = vec![
        // Avery and Sam about the craftsman: settled history, one fresh
        // unread for Sam.
        ("l-craftsman", BUYER_AVERY, SELLER_SAM, "Hi! Is the craftsman still available?", 2880, true),
        ("l-craftsman", SELLER_SAM, BUYER_AVERY, "It is. Open house on Saturday.", 2850, true),
        ("l-craftsman", BUYER_AVERY, SELLER_SAM, "Great, could we come earlier for a private tour?", 45, false),
        // Noor and Sam about the bungalow: two unread for Sam.
        ("l-bungalow", BUYER_NOOR, SELLER_SAM, "What does \"needs some love\" mean exactly?", 120, false),
        ("l-bungalow", BUYER_NOOR, SELLER_SAM, "Also, is the creek in the flood zone?", 115, false),
        // Avery and Priya about the loft: Priya answered, Avery has one
        // unread.
        ("l-loft", BUYER_AVERY, SELLER_PRIYA, "Does the HOA allow rentals?", 1440, true),
        ("l-loft", SELLER_PRIYA, BUYER_AVERY, "Minimum 6-month leases, yes.", 30, false),
    ];

    let now = Utc::now();
    script
        .into_iter()
        .map(|(listing, sender, receiver, content, minutes_ago, read)| {
            let record = MessageRecord::new(listing, sender, receiver, content)
                .with_created_at(now - Duration::minutes(minutes_ago));
            if read {
                record.read()
            } else {
                record
            }
        })
        .collect()
}
