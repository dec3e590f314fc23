//! Command execution context
//!
//! Loads the config, opens the session database and starts the auth provider
//! so command handlers start from a ready session.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::cli::args::GlobalOptions;
use crate::client::StorefrontClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;
use crate::storage::SqliteStore;

/// Context for command execution
pub struct CommandContext {
    /// Loaded configuration with CLI overrides applied
    pub config: Config,
    /// Session database, shared with the provider
    pub backend: Arc<SqliteStore>,
    /// API client, shared with the provider
    pub client: Arc<StorefrontClient>,
    /// Auth provider, already past its initial load
    pub provider: AuthProvider<StorefrontClient>,
}

impl CommandContext {
    /// Create a fully initialized context.
    ///
    /// # Errors
    /// Returns error if the config is invalid or the session database cannot
    /// be opened.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = resolve_config(opts)?;

        let path = session_path(opts, &config)?;
        log::debug!("Using session database at {}", path.display());
        let backend = Arc::new(SqliteStore::open_at(&path)?);

        let client = Arc::new(StorefrontClient::new(
            config.api_host(),
            config.request_timeout(),
        )?);

        let session = SessionStore::new(backend.clone());
        let provider = AuthProvider::start(Arc::clone(&client), session).await;

        Ok(Self {
            config,
            backend,
            client,
            provider,
        })
    }
}

/// Load the config file and apply CLI overrides
pub fn resolve_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_at(opts.config_ref())?;

    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
        config.validate()?;
    }

    Ok(config)
}

/// Session database location: `--store`, then config, then the data dir
fn session_path(opts: &GlobalOptions, config: &Config) -> Result<PathBuf> {
    if let Some(path) = opts.store_ref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &config.session_store {
        return Ok(path.clone());
    }
    Ok(SqliteStore::default_path()?)
}
