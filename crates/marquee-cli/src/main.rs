//! `marquee` — admin command line for the Marquee request store.
//!
//! The chat front ends own day-to-day interaction; this binary covers the
//! same operations from a shell, against the same backing file.
//!
//! # Usage
//!
//! ```
//! marquee list --open
//! marquee add u123 discord "Dune" 2021 film
//! MARQUEE_STORE_PATH=/srv/marquee/requests.json marquee delete 4
//! ```
//!
//! Exits non-zero when an id is absent or an input is rejected, so shell
//! scripts can branch on the outcome.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use marquee_core::{
  record::{NewRequest, RequestRecord, RequestStatus},
  store::RequestStore,
};
use marquee_store_json::{DEFAULT_STORE_FILENAME, JsonStore};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "marquee", about = "Admin CLI for the Marquee request store")]
struct Cli {
  /// Backing store file; overrides MARQUEE_STORE_PATH.
  #[arg(short, long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Create an empty backing file if none exists.
  Init,
  /// Submit a new request.
  Add {
    user_id:  String,
    platform: String,
    title:    String,
    year:     u32,
    category: String,
  },
  /// Print all requests, or only the still-open ones.
  List {
    #[arg(long)]
    open: bool,
  },
  /// Print one request by id.
  Show { id: u64 },
  /// Case-insensitive title search.
  Search { text: String },
  /// Print all requests submitted by one user.
  User {
    user_id: String,
    /// Print only today's submission count against the daily quota.
    #[arg(long)]
    today: bool,
  },
  /// Overwrite a request's status.
  SetStatus { id: u64, status: String },
  /// Record a request's result ("", "available", or "unavailable").
  SetResult { id: u64, code: String },
  /// Delete a request; the survivors are renumbered 1..N.
  Delete { id: u64 },
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Environment-level configuration (`MARQUEE_STORE_PATH`).
#[derive(Debug, Deserialize)]
struct Settings {
  store_path: PathBuf,
}

fn load_settings() -> anyhow::Result<Settings> {
  let settings = config::Config::builder()
    .set_default("store_path", DEFAULT_STORE_FILENAME)?
    .add_source(config::Environment::with_prefix("MARQUEE"))
    .build()
    .context("failed to read environment configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise Settings")
}

// ─── Main ─────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let store_path = match cli.store {
    Some(path) => path,
    None => load_settings()?.store_path,
  };
  let store = JsonStore::open(store_path);

  match cli.command {
    Command::Init => {
      store.init().await?;
      println!("store ready at {}", store.path().display());
    }

    Command::Add { user_id, platform, title, year, category } => {
      let input = NewRequest::new(user_id, platform, title, year, category);
      let record = store.create(input).await.context("failed to save request")?;
      println!("created #{}", record.id);
      print_record(&record);
    }

    Command::List { open } => {
      let records = if open {
        store.list_open().await?
      } else {
        store.list_all().await?
      };
      if records.is_empty() {
        println!("no requests");
      }
      for record in &records {
        print_record(record);
      }
    }

    Command::Show { id } => {
      match marquee_queries::get_by_id(&store, id).await? {
        Some(record) => print_record(&record),
        None => bail!("no request with id {id}"),
      }
    }

    Command::Search { text } => {
      let records = store.list_all().await?;
      let hits = marquee_queries::search_title(&records, &text);
      if hits.is_empty() {
        println!("no matches");
      }
      for record in hits.iter().take(marquee_queries::limits::MAX_ADMIN_RESULTS) {
        print_record(record);
      }
    }

    Command::User { user_id, today } => {
      if today {
        let count =
          marquee_queries::count_created_today_by_user(&store, &user_id).await?;
        println!(
          "{user_id}: {count}/{} requests today",
          marquee_queries::limits::DAILY_REQUESTS_PER_USER
        );
        return Ok(());
      }
      let records = marquee_queries::list_by_user(&store, &user_id).await?;
      if records.is_empty() {
        println!("no requests from {user_id}");
      }
      for record in &records {
        print_record(record);
      }
    }

    Command::SetStatus { id, status } => {
      let status = RequestStatus::from(status);
      if !store.set_status(id, status.clone()).await? {
        bail!("no request with id {id}");
      }
      println!("#{id} status -> {status}");
    }

    Command::SetResult { id, code } => {
      if !store.set_result(id, &code).await? {
        bail!("rejected: unknown id {id} or result code {code:?}");
      }
      println!("#{id} result -> {code:?}");
    }

    Command::Delete { id } => {
      if !store.delete(id).await? {
        bail!("no request with id {id}");
      }
      println!("deleted #{id}; remaining requests renumbered");
    }
  }

  Ok(())
}

fn print_record(record: &RequestRecord) {
  let RequestRecord { id, user_id, platform, title, year, category, status, created_at, result } =
    record;
  let result = if result.is_empty() { "-".to_owned() } else { result.to_string() };
  println!(
    "#{id} [{status}] {title} ({year}, {category}) by {user_id}@{platform} at {created_at} result={result}"
  );
}
