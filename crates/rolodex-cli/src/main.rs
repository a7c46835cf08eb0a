//! `rolodex` — command-line client for the Rolodex contacts API.
//!
//! # Usage
//!
//! ```text
//! rolodex list
//! rolodex create --first-name Ada --last-name Lovelace --email ada@x.com --phone +33123456789
//! rolodex update 1 --city London
//! rolodex search smith
//! rolodex --url http://contacts.internal:8080 city Paris
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use client::ApiClient;
use rolodex_core::contact::{ContactId, ContactPayload};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolodex", about = "Command-line client for the Rolodex contacts API")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the rolodex server (default: http://localhost:8080).
  #[arg(long, env = "ROLODEX_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List every contact.
  List,
  /// Show one contact.
  Get { id: ContactId },
  /// Create a contact.
  Create(Fields),
  /// Update a contact; fields not given keep their current value.
  Update {
    id:     ContactId,
    #[command(flatten)]
    fields: Fields,
  },
  /// Delete a contact.
  Delete { id: ContactId },
  /// Find contacts whose first or last name contains NAME.
  Search { name: String },
  /// List contacts in exactly this city.
  City { city: String },
}

/// Contact fields settable from the command line.
#[derive(ClapArgs, Debug, Default)]
struct Fields {
  #[arg(long)]
  first_name:  Option<String>,
  #[arg(long)]
  last_name:   Option<String>,
  #[arg(long)]
  email:       Option<String>,
  #[arg(long)]
  phone:       Option<String>,
  #[arg(long)]
  address:     Option<String>,
  #[arg(long)]
  city:        Option<String>,
  #[arg(long)]
  postal_code: Option<String>,
}

impl Fields {
  /// Overlay the given flags onto `base`. An empty string clears an optional
  /// field.
  fn apply(self, base: ContactPayload) -> ContactPayload {
    ContactPayload {
      first_name:  self.first_name.or(base.first_name),
      last_name:   self.last_name.or(base.last_name),
      email:       self.email.or(base.email),
      phone:       self.phone.or(base.phone),
      address:     self.address.or(base.address),
      city:        self.city.or(base.city),
      postal_code: self.postal_code.or(base.postal_code),
    }
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // stdout carries the JSON output, so logs go to stderr.
  tracing_subscriber::fmt()
    .with_env_filter(log_filter())
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag / env overrides config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());

  tracing::debug!(%base_url, "using server");
  let client = ApiClient::new(base_url)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::List => print_json(&client.list().await?),
    Command::Get { id } => print_json(&client.get(id).await?),
    Command::Create(fields) => {
      let payload = fields.apply(ContactPayload::default());
      print_json(&client.create(&payload).await?)
    }
    Command::Update { id, fields } => {
      let current = client.get(id).await?;
      let payload = fields.apply(current.into());
      print_json(&client.update(id, &payload).await?)
    }
    Command::Delete { id } => {
      println!("{}", client.delete(id).await?);
      Ok(())
    }
    Command::Search { name } => print_json(&client.search(&name).await?),
    Command::City { city } => print_json(&client.by_city(&city).await?),
  }
}

/// Warnings only unless `RUST_LOG` asks for more.
fn log_filter() -> EnvFilter {
  EnvFilter::builder()
    .with_default_directive(LevelFilter::WARN.into())
    .from_env_lossy()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("serialising output")?);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn update_flags_overlay_current_values() {
    let base = ContactPayload {
      first_name: Some("Ada".into()),
      last_name: Some("Lovelace".into()),
      email: Some("ada@x.com".into()),
      phone: Some("1234567".into()),
      city: Some("Paris".into()),
      ..Default::default()
    };
    let fields = Fields {
      city: Some("London".into()),
      postal_code: Some("".into()),
      ..Default::default()
    };

    let merged = fields.apply(base);
    assert_eq!(merged.first_name.as_deref(), Some("Ada"));
    assert_eq!(merged.city.as_deref(), Some("London"));
    assert_eq!(merged.postal_code.as_deref(), Some(""));
  }

  #[test]
  fn default_log_filter_is_quiet() {
    // Only meaningful when the test runner has no RUST_LOG of its own.
    if std::env::var_os("RUST_LOG").is_none() {
      assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::WARN));
    }
  }

  #[test]
  fn parses_update_subcommand() {
    let args = Args::try_parse_from(["rolodex", "update", "3", "--city", "Lyon"]).unwrap();
    match args.command {
      Command::Update { id, fields } => {
        assert_eq!(id, 3);
        assert_eq!(fields.city.as_deref(), Some("Lyon"));
        assert!(fields.email.is_none());
      }
      other => panic!("unexpected command: {other:?}"),
    }
  }
}
