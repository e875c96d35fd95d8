//! Binary: load env, connect to the database, insert the demo data.

mod generate;

use anyhow::{Context, Result};

use hearth_store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://hearth.db".to_string());
    let store = Store::connect(&database_url)
        .await
        .context("Connect to the database (check DATABASE_URL)")?;

    let profiles = generate::profiles();
    for profile in &profiles {
        store.profiles.save(profile).await?;
    }

    let listings = generate::listings();
    for listing in &listings {
        store.listings.save(listing).await?;
    }

    let messages = generate::messages();
    for message in &messages {
        store.messages.save(message).await?;
    }

    println!(
        "Seeded {} profiles, {} listings, {} messages into {}.",
        profiles.len(),
        listings.len(),
        messages.len(),
        database_url
    );
    println!("Try: HEARTH_USER={} hearth conversations", generate::SELLER_SAM);

    Ok(())
}
