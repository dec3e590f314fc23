//! Shopkeep CLI - seller companion for the storefront platform

use clap::Parser;

mod auth;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod session;
mod storage;
mod validation;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, ConfigCommands, ProductCommands, StoreCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { email, password } => cli::auth::login(&opts, email, password).await,
        Commands::Signup {
            name,
            email,
            role,
            password,
        } => cli::auth::signup(&opts, name, email, role, password).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Status { follow } => cli::status::run(&opts, follow).await,
        Commands::Store(StoreCommands::Create(args)) => cli::store::create(&opts, args).await,
        Commands::Product(ProductCommands::Add(args)) => cli::product::add(&opts, args).await,
        Commands::Config(ConfigCommands::Show) => cli::config::show(&opts),
        Commands::Config(ConfigCommands::SetHost { url }) => cli::config::set_host(&opts, &url),
        Commands::Version => {
            println!("shopkeep version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// `RUST_LOG` wins over `--debug`
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
