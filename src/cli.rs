// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the shrike command-line interface.
//!
//! Three subcommands: `load` to fetch-or-cache a language's backends and
//! print category summaries, `query` to match a pattern against entry
//! tokens the way the autocomplete widget would, and `cache` to inspect or
//! clear stored snapshots.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shrike",
    about = "Typeahead index processor for documentation manuals",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that performs a load.
#[derive(Args)]
pub struct LoadArgs {
    /// Base URL of the documentation site (e.g. https://www.php.net)
    #[arg(long)]
    pub base_url: String,

    /// Language to load, with a single fallback to "en" on fetch failure
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Maximum entries shown per category
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Bypass the snapshot cache for this invocation
    #[arg(long)]
    pub no_cache: bool,

    /// Cache directory override
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a language's search backends and print category summaries
    Load {
        #[command(flatten)]
        args: LoadArgs,
    },

    /// Load a language and match a pattern against entry tokens
    Query {
        #[command(flatten)]
        args: LoadArgs,

        /// Pattern matched case-insensitively against token prefixes
        pattern: String,
    },

    /// Inspect or clear cached snapshots
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show snapshot age, freshness and entry counts for a language
    Inspect {
        /// Language whose snapshot to inspect
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Cache directory override
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Remove the cached snapshot for a language
    Clear {
        /// Language whose snapshot to remove
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Cache directory override
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}
