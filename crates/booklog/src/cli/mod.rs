//! CLI command definitions.

pub mod entries;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use booklog_core::book::{EntryId, SortKey};

use crate::config::Config;

pub use entries::EntryFields;

/// Keep a log of the books you read.
#[derive(Debug, Parser)]
#[command(name = "booklog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the hosted table. Without it booklog runs local-only.
    #[arg(long, env = "BOOKLOG_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// API key for the hosted table.
    #[arg(long, env = "BOOKLOG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Remote table name.
    #[arg(long, env = "BOOKLOG_TABLE")]
    pub table: Option<String>,

    /// Directory of the local cache.
    #[arg(long, env = "BOOKLOG_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    /// Do not copy local-only entries to the remote at startup.
    #[arg(long)]
    pub skip_migration: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Lays the flags given on the command line over `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.remote_url {
            config.remote_url = Some(url.clone()).filter(|u| !u.trim().is_empty());
        }
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        if let Some(table) = &self.table {
            config.table = table.clone();
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = dir.clone();
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// CLI sort key (with clap ValueEnum).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    #[default]
    Title,
    /// Author last name.
    Author,
}

impl From<SortBy> for SortKey {
    fn from(s: SortBy) -> Self {
        match s {
            SortBy::Title => SortKey::Title,
            SortBy::Author => SortKey::Author,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every book.
    List {
        #[arg(long, value_enum, default_value_t = SortBy::Title)]
        sort: SortBy,
    },
    /// List favorite books.
    Favorites {
        #[arg(long, value_enum, default_value_t = SortBy::Title)]
        sort: SortBy,
    },
    /// Log a new book.
    Add(EntryFields),
    /// Replace every field of a logged book.
    Edit {
        /// Entry ID.
        id: EntryId,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete a logged book.
    Delete {
        /// Entry ID.
        id: EntryId,
    },
    /// Books read per genre.
    Genres,
    /// Map markers and the box to zoom to.
    Map,
    /// Book positions on a time scale image of the given size.
    TimeScale {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
    /// Coordinates already recorded for an author.
    Autofill {
        author: String,
    },
    /// Copy local-only entries to the remote.
    Migrate,
}
