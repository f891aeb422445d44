//! Command-line interface parsing for the mega menu CLI
//!
//! This module handles parsing of CLI arguments using clap: connection
//! overrides shared by every command, and the subcommands for fetching,
//! publishing and cache inspection.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ProviderConfig;

/// Mega Menu CLI - fetch, inspect and publish navigation data
#[derive(Parser, Debug)]
#[command(name = "meganav")]
#[command(about = "Fetch, inspect and publish mega menu navigation data")]
#[command(version)]
pub struct Cli {
    /// Document store root URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Server-relative folder holding the menu file
    #[arg(long, value_name = "PATH")]
    pub folder: Option<String>,

    /// Menu file name within the folder
    #[arg(long, value_name = "NAME")]
    pub file: Option<String>,

    /// List name enabling the list-backed source
    #[arg(long, value_name = "LIST")]
    pub list: Option<String>,

    /// Cache TTL in minutes
    #[arg(long, value_name = "MINUTES")]
    pub cache_ttl: Option<i64>,

    /// Cache directory override
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands; `show` runs when none is given
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the menu, preferring the local cache
    Show {
        /// Print raw JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Fetch the menu from the store, bypassing the cache
    Refresh {
        /// Print raw JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Publish a local menu file to the document store
    Upload {
        /// Menu source text or JSON file to publish
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Show the state of the local cache slot
    CacheStatus,
    /// Delete the local cache slot
    CacheClear,
}

impl Cli {
    /// Applies CLI overrides on top of an environment-derived configuration
    pub fn apply_overrides(&self, config: &mut ProviderConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(folder) = &self.folder {
            config.folder_path = folder.clone();
        }
        if let Some(file) = &self.file {
            config.file_name = file.clone();
        }
        if let Some(list) = &self.list {
            config.list_name = Some(list.clone());
        }
        if let Some(cache_ttl) = self.cache_ttl {
            config.cache_ttl_minutes = cache_ttl;
        }
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = Some(cache_dir.clone());
        }
    }
}
