//! hearth CLI: browse conversations, open threads, send messages, watch the
//! list live. Config from env and optional CLI args.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use hearth_core::{init_tracing, AuthContext, HearthError};
use hearth_messaging::{Conversation, LiveConversations, MessagingService, ThreadMessage};
use hearth_store::Store;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "hearth")]
#[command(about = "Marketplace messaging CLI: conversations, thread, send, watch", long_about = None)]
#[command(version)]
struct Cli {
    /// Act as this user id (overrides HEARTH_USER).
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the viewer's conversations with unread badges.
    Conversations,
    /// Open a listing's thread (clears unread flags) and print it.
    Thread { listing_id: String },
    /// Send a message into a listing's thread.
    Send {
        listing_id: String,
        receiver_id: String,
        message: Vec<String>,
    },
    /// First contact: message a listing's seller.
    Contact {
        listing_id: String,
        message: Vec<String>,
    },
    /// Print the total unread badge count.
    Unread,
    /// Watch the conversation list live until Ctrl-C.
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.user.clone())?;
    init_tracing(&config.log_file)?;

    let store = Store::connect(&config.database_url)
        .await
        .context("Connect to the database (check DATABASE_URL)")?;
    let service = MessagingService::new(store.clone());
    let auth = config.auth_context();

    run(store, service, auth, cli.command).await.map_err(|e| match e {
        HearthError::AuthRequired => {
            anyhow::anyhow!("Not signed in. Set HEARTH_USER or pass --user <id>.")
        }
        other => anyhow::Error::new(other),
    })
}

async fn run(
    store: Store,
    service: MessagingService,
    auth: AuthContext,
    command: Commands,
) -> hearth_core::Result<()> {
    match command {
        Commands::Conversations => {
            let conversations = service.list_conversations(&auth).await?;
            print_conversations(&conversations);
        }
        Commands::Thread { listing_id } => {
            handle_thread(&store, &service, &auth, &listing_id).await?
        }
        Commands::Send {
            listing_id,
            receiver_id,
            message,
        } => {
            let sent = service
                .send_message(&auth, &listing_id, &receiver_id, &message.join(" "))
                .await?;
            println!("Sent {} to {}.", sent.id, sent.receiver_id);
        }
        Commands::Contact {
            listing_id,
            message,
        } => {
            let sent = service
                .contact_seller(&auth, &listing_id, &message.join(" "))
                .await?;
            println!("Sent {} to the seller ({}).", sent.id, sent.receiver_id);
        }
        Commands::Unread => {
            let count = service.unread_total(&auth).await?;
            println!("{count} unread message(s).");
        }
        Commands::Watch => handle_watch(service, auth).await?,
    }
    Ok(())
}

async fn handle_thread(
    store: &Store,
    service: &MessagingService,
    auth: &AuthContext,
    listing_id: &str,
) -> hearth_core::Result<()> {
    let viewer = auth.viewer()?.to_string();
    let thread = service.open_thread(auth, listing_id).await?;

    if thread.is_empty() {
        println!("No messages in this thread.");
        return Ok(());
    }

    print_thread_header(store, &thread[0], &viewer, listing_id).await;
    for message in &thread {
        print_thread_message(message, &viewer);
    }
    Ok(())
}

/// Header like the thread view's: listing title plus who the chat is with.
/// Lookups that fail degrade to placeholders; the thread still prints.
async fn print_thread_header(
    store: &Store,
    first: &ThreadMessage,
    viewer: &str,
    listing_id: &str,
) {
    let title = match store.listings.get(listing_id).await {
        Ok(Some(listing)) => listing.title,
        _ => "Unknown".to_string(),
    };

    let other_id = if first.sender_id == viewer {
        &first.receiver_id
    } else {
        &first.sender_id
    };
    let other_name = match store.profiles.display_name(other_id).await {
        Ok(Some(name)) => name,
        _ => "Unknown".to_string(),
    };

    println!("{title}\nChat with {other_name}\n");
}

async fn handle_watch(service: MessagingService, auth: AuthContext) -> hearth_core::Result<()> {
    let live = LiveConversations::spawn(service, auth).await?;
    let mut rx = live.subscribe();

    println!("Watching for changes; Ctrl-C to stop.\n");
    print_conversations(&live.current());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watch");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                println!();
                print_conversations(&rx.borrow().clone());
            }
        }
    }

    Ok(())
}

fn print_conversations(conversations: &[Conversation]) {
    if conversations.is_empty() {
        println!("No messages yet.");
        return;
    }

    for conv in conversations {
        let badge = if conv.unread_count > 0 {
            format!(" [{} unread]", conv.unread_count)
        } else {
            String::new()
        };
        let price = conv
            .listing_price
            .map(|p| format!(" (${p})"))
            .unwrap_or_default();
        println!(
            "{}{} - {}{}\n    {}: {}\n    {}  listing {}",
            conv.listing_title,
            price,
            conv.other_user_name,
            badge,
            conv.last_message_time.format("%Y-%m-%d %H:%M"),
            conv.last_message,
            conv.listing_city.as_deref().unwrap_or("-"),
            conv.listing_id,
        );
    }
}

fn print_thread_message(message: &ThreadMessage, viewer: &str) {
    let who = if message.sender_id == viewer {
        "me".to_string()
    } else {
        message.sender_name.clone()
    };
    println!(
        "[{}] {}: {}",
        message.created_at.format("%Y-%m-%d %H:%M"),
        who,
        message.content
    );
}
