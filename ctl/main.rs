#![forbid(unsafe_code)]

//! `mattermost-netlify-ctl` — operator CLI companion for `mattermost-netlify`.
//!
//! Generates secrets for the service configuration and inspects the local
//! subscription store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use mattermost_netlify::crypto::generate_secret;
use mattermost_netlify::persistence::db;
use mattermost_netlify::persistence::kv::KvStore;
use mattermost_netlify::persistence::subscription_repo::SubscriptionRepo;

#[derive(Debug, Parser)]
#[command(
    name = "mattermost-netlify-ctl",
    about = "Operator CLI for the mattermost-netlify service",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a random 32-byte base64 key for `NETLIFY_ENCRYPTION_KEY` or
    /// `NETLIFY_WEBHOOK_SECRET`.
    GenerateSecret,

    /// List the channels subscribed to a site's build notifications.
    Subscriptions {
        /// Path to the service database.
        #[arg(long)]
        db: PathBuf,
        /// Netlify site ID.
        site_id: String,
    },
}

fn main() {
    let args = Cli::parse();

    match args.command {
        Command::GenerateSecret => println!("{}", generate_secret()),
        Command::Subscriptions { db, site_id } => {
            if let Err(err) = print_subscriptions(&db, &site_id) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn print_subscriptions(
    db_path: &Path,
    site_id: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let channels = runtime.block_on(async {
        let pool = Arc::new(db::connect(db_path).await?);
        let channels = SubscriptionRepo::new(KvStore::new(Arc::clone(&pool)))
            .channels(site_id)
            .await;
        pool.close().await;
        channels
    })?;

    if channels.is_empty() {
        println!("No channels subscribed to {site_id}");
    } else {
        for channel in channels {
            println!("{channel}");
        }
    }
    Ok(())
}
