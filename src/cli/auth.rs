//! Login, signup and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use serde::Serialize;

use crate::auth::Landing;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::progress::spinner;
use crate::client::models::{Credentials, Role, SignupProfile};
use crate::error::Result;
use crate::output;

/// JSON result of a successful login or signup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedIn {
    landing: &'static str,
    user_id: Option<String>,
    store_id: Option<String>,
    store_name: Option<String>,
}

/// Run the login command, prompting for anything not given as a flag
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(email) => email,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    let pb = spinner("Signing in...", opts.is_json());
    let result = ctx.provider.login(&Credentials { email, password }).await;
    pb.finish_and_clear();

    report(opts, &ctx, result?)
}

/// Run the signup command
pub async fn signup(
    opts: &GlobalOptions,
    name: String,
    email: String,
    role: Role,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let (password, confirm_password) = match password {
        Some(password) => (password.clone(), password),
        None => {
            let theme = ColorfulTheme::default();
            let password: String = Password::with_theme(&theme)
                .with_prompt("Password")
                .interact()?;
            let confirm: String = Password::with_theme(&theme)
                .with_prompt("Confirm password")
                .interact()?;
            (password, confirm)
        }
    };

    let profile = SignupProfile {
        username: name,
        email,
        password,
        confirm_password,
        role,
    };

    let pb = spinner("Creating account...", opts.is_json());
    let result = ctx.provider.signup(&profile).await;
    pb.finish_and_clear();

    report(opts, &ctx, result?)
}

/// Run the logout command
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let was_signed_in = ctx.provider.state().is_authenticated();

    ctx.provider.logout();

    if opts.is_json() {
        return output::print_json(&serde_json::json!({ "signedOut": was_signed_in }));
    }

    if was_signed_in {
        println!("{} Signed out", "✓".green());
    } else {
        println!("{} Not signed in", "○".dimmed());
    }
    Ok(())
}

fn report(opts: &GlobalOptions, ctx: &CommandContext, landing: Landing) -> Result<()> {
    let session = ctx.provider.session();

    if opts.is_json() {
        return output::print_json(&SignedIn {
            landing: landing.path(),
            user_id: session.user_id(),
            store_id: session.store_id(),
            store_name: session.store_name(),
        });
    }

    match session.user_id() {
        Some(id) => println!("{} Signed in as {}", "✓".green(), id.bold()),
        None => println!("{} Signed in", "✓".green()),
    }

    match landing {
        Landing::Dashboard => {
            if let Some(name) = session.store_name() {
                println!("  Store: {}", name.cyan());
            }
        }
        Landing::CreateStore | Landing::StoreDashboard => {
            println!(
                "  → Next, create your store with '{}'",
                "shopkeep store create".cyan()
            );
        }
        Landing::CustomerDashboard => {
            println!("  Customer account ready");
        }
    }
    Ok(())
}
