//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

use crate::client::models::Role;

pub mod args;
pub mod auth;
pub mod config;
pub mod context;
pub mod product;
pub mod progress;
pub mod status;
pub mod store;

pub use args::OutputFormat;
pub use context::CommandContext;

/// Shopkeep - seller companion for the storefront platform
#[derive(Parser, Debug)]
#[command(name = "shopkeep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "SHOPKEEP_FORMAT",
        default_value = "pretty",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SHOPKEEP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override session database location
    #[arg(long, global = true, env = "SHOPKEEP_STORE", hide_env = true)]
    pub store: Option<String>,

    /// Override storefront API host
    #[arg(long, global = true, env = "SHOPKEEP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SHOPKEEP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to your seller account
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Signup {
        /// Display name
        #[arg(long)]
        name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account role
        #[arg(long, value_enum, default_value = "store-owner")]
        role: Role,

        /// Account password (prompted with confirmation when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and remove the stored session
    Logout,

    /// Show the stored session
    Status {
        /// Keep running and print every change made by other processes
        #[arg(long)]
        follow: bool,
    },

    /// Manage your store
    #[command(subcommand)]
    Store(StoreCommands),

    /// Manage your products
    #[command(subcommand)]
    Product(ProductCommands),

    /// Show or change local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Display version information
    Version,
}

/// Store management subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Create the store for the signed-in account
    Create(StoreCreateArgs),
}

/// Store creation form
#[derive(Debug, Clone, Args)]
pub struct StoreCreateArgs {
    /// Store name
    #[arg(long)]
    pub name: String,

    /// Main kind of goods sold
    #[arg(long)]
    pub main_good: String,

    #[arg(long)]
    pub city: String,

    #[arg(long)]
    pub state: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// Store description
    #[arg(long)]
    pub descr: String,
}

/// Product management subcommands
#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Add a product to your store
    Add(ProductAddArgs),
}

/// Product form
#[derive(Debug, Clone, Args)]
pub struct ProductAddArgs {
    /// Price, a non-negative number
    #[arg(long, allow_hyphen_values = true)]
    pub price: String,

    /// Discount percentage, 0 to 100
    #[arg(long, allow_hyphen_values = true)]
    pub discount: Option<String>,

    /// Product description
    #[arg(long)]
    pub descr: String,

    /// Hosted image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,

    /// Save the storefront API host
    SetHost {
        /// Base URL, e.g. https://api.example.com
        url: String,
    },
}
