//! Product commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::progress::spinner;
use crate::cli::{CommandContext, ProductAddArgs};
use crate::client::CatalogApi;
use crate::error::{AuthError, Error, Result};
use crate::output;
use crate::validation;

/// Run the product add command against the signed-in seller's store
pub async fn add(opts: &GlobalOptions, args: ProductAddArgs) -> Result<()> {
    let product = validation::parse_product(
        &args.price,
        args.discount.as_deref(),
        &args.descr,
        &args.images,
    )?;

    let ctx = CommandContext::new(opts).await?;
    let session = ctx.provider.session();

    if !session.is_authenticated() {
        return Err(AuthError::NotAuthenticated.into());
    }
    let token = session.access_token().ok_or(AuthError::NotAuthenticated)?;
    let store_id = session.store_id().ok_or(Error::MissingStore)?;

    if session.is_access_token_expired() {
        log::warn!("Access token has expired, the request may be rejected");
    }

    let pb = spinner("Adding product...", opts.is_json());
    let result = ctx.client.create_product(&token, &store_id, &product).await;
    pb.finish_and_clear();
    let created = result.inspect_err(|e| log::warn!("Product creation failed: {}", e.detail()))?;

    if opts.is_json() {
        return output::print_json(&created);
    }

    println!("{} Product added: {}", "✓".green(), product.descr.bold());
    println!("  Price: {}", product.price);
    if product.discount > 0 {
        println!("  Discount: {}%", product.discount);
    }
    if !product.imgs.is_empty() {
        println!("  Images: {}", product.imgs.len());
    }
    Ok(())
}
