//! Local configuration commands

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_config;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::storage::SqliteStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView {
    config_file: PathBuf,
    config_file_exists: bool,
    api_host: String,
    request_timeout_secs: u64,
    session_store: Option<PathBuf>,
    watch_interval_ms: u64,
}

/// Run the config show command
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = resolve_config(opts)?;

    let session_store = match opts.store_ref() {
        Some(store) => Some(PathBuf::from(store)),
        None => config
            .session_store
            .clone()
            .or_else(|| SqliteStore::default_path().ok()),
    };

    let view = ConfigView {
        config_file_exists: path.exists(),
        config_file: path,
        api_host: config.api_host(),
        request_timeout_secs: config.request_timeout_secs,
        session_store,
        watch_interval_ms: config.watch_interval_ms,
    };

    if opts.is_json() {
        return output::print_json(&view);
    }

    println!("{}\n", "Shopkeep Configuration".bold());
    if view.config_file_exists {
        println!("Config file: {}", view.config_file.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            view.config_file.display().to_string().cyan(),
            "(not created, using defaults)".dimmed()
        );
    }
    println!("API host: {}", view.api_host);
    println!("Request timeout: {}s", view.request_timeout_secs);
    if let Some(store) = &view.session_store {
        println!("Session database: {}", store.display());
    }
    println!("Watch interval: {}ms", view.watch_interval_ms);
    println!();
    Ok(())
}

/// Run the config set-host command
pub fn set_host(opts: &GlobalOptions, url: &str) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;

    config.api_host = Some(url.trim_end_matches('/').to_string());
    config.validate()?;
    config.save_to(&path)?;

    if opts.is_json() {
        return output::print_json(&serde_json::json!({
            "apiHost": config.api_host(),
            "configFile": path,
        }));
    }

    println!(
        "{} API host set to {} in {}",
        "✓".green(),
        config.api_host().cyan(),
        path.display()
    );
    Ok(())
}
