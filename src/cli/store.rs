//! Store creation command

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::progress::spinner;
use crate::cli::{CommandContext, StoreCreateArgs};
use crate::client::models::{Address, StoreProfile};
use crate::error::Result;
use crate::output;

impl From<StoreCreateArgs> for StoreProfile {
    fn from(args: StoreCreateArgs) -> Self {
        StoreProfile {
            name: args.name,
            main_good: args.main_good,
            address: Address {
                city: args.city,
                address: args.address,
                state: args.state,
            },
            descr: args.descr,
        }
    }
}

/// Run the store create command
pub async fn create(opts: &GlobalOptions, args: StoreCreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let profile = StoreProfile::from(args);

    let pb = spinner("Creating store...", opts.is_json());
    let result = ctx.provider.create_store(&profile).await;
    pb.finish_and_clear();
    let store = result?;

    if opts.is_json() {
        return output::print_json(&store);
    }

    println!("{} Store created: {}", "✓".green(), store.name.bold());
    println!("  ID: {}", store.id);
    println!(
        "  Address: {}, {}, {}",
        store.address.address, store.address.city, store.address.state
    );
    println!("\n  → Add products with '{}'", "shopkeep product add".cyan());
    Ok(())
}
