//! Mega Menu CLI - fetch, inspect and publish navigation data
//!
//! A command line tool over the menu provider: shows the current menu
//! (cache-first), refreshes it from the document store, publishes edited
//! menus back, and inspects the local cache slot.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meganav::cli::{Cli, Command};
use meganav::config::ProviderConfig;
use meganav::data::{recover_menu_data, MenuData, RecoverError};
use meganav::provider::MenuProvider;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so `show --json` output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meganav=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ProviderConfig::from_env();
    cli.apply_overrides(&mut config);
    let provider = MenuProvider::from_config(&config);

    match cli.command.unwrap_or(Command::Show { json: false }) {
        Command::Show { json } => {
            print_menu(&provider.get_menu_data().await, json);
            ExitCode::SUCCESS
        }
        Command::Refresh { json } => {
            print_menu(&provider.refresh().await, json);
            ExitCode::SUCCESS
        }
        Command::Upload { file } => {
            let text = match std::fs::read_to_string(&file) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            let menu = match parse_menu_input(&text) {
                Ok(menu) => menu,
                Err(e) => {
                    eprintln!("Failed to parse {}: {}", file.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            match provider.upload_menu_data(&menu).await {
                Ok(()) => {
                    println!("Upload succeeded; local cache invalidated");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Upload failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Command::CacheStatus => {
            match provider.cached() {
                Some(cached) => {
                    println!(
                        "Cached menu: {} entries, cached at {}, expires at {}",
                        cached.data.navigation.len(),
                        cached.cached_at,
                        cached.expires_at
                    );
                }
                None => println!("Cache is empty"),
            }
            ExitCode::SUCCESS
        }
        Command::CacheClear => {
            provider.clear_cache();
            println!("Cache cleared");
            ExitCode::SUCCESS
        }
    }
}

/// Parses a local menu file for upload
///
/// Accepts the source-text declaration format; a file that is plain JSON
/// (no declaration) is accepted as a convenience.
fn parse_menu_input(text: &str) -> Result<MenuData, RecoverError> {
    match recover_menu_data(text) {
        Ok(menu) => Ok(menu),
        Err(RecoverError::Parse(_)) => serde_json::from_str(text).map_err(|e| {
            RecoverError::Parse(format!("neither a menu declaration nor JSON: {}", e))
        }),
        Err(e) => Err(e),
    }
}

/// Prints a menu as pretty JSON or an indented tree
fn print_menu(menu: &MenuData, json: bool) {
    if json {
        match serde_json::to_string_pretty(menu) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to render menu as JSON: {}", e),
        }
        return;
    }

    for item in &menu.navigation {
        if item.href.is_empty() {
            println!("{}", item.title);
        } else {
            println!("{}  ->  {}", item.title, item.href);
        }
        if let Some(mega) = &item.mega_menu {
            for column in &mega.columns {
                if !column.title.is_empty() {
                    println!("  [{}]", column.title);
                }
                for link in &column.items {
                    println!("    {}  ->  {}", link.title, link.href);
                }
            }
        }
    }
}
