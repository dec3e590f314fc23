//! Status command implementation

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::auth::AuthState;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::output;
use crate::session::{CREATE_STORE_RESPONSE_KEY, SIGNUP_RESPONSE_KEY, SessionStore};

/// Point-in-time view of the stored session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionSummary {
    state: &'static str,
    authenticated: bool,
    user_id: Option<String>,
    user_created_at: Option<DateTime<Utc>>,
    store_id: Option<String>,
    store_name: Option<String>,
    store_city: Option<String>,
    has_access_token: bool,
    has_refresh_token: bool,
    access_expiration: Option<DateTime<Utc>>,
    access_expired: bool,
    access_minutes_left: i64,
    refresh_expiration: Option<DateTime<Utc>>,
    refresh_expired: bool,
    needs_refresh: bool,
    last_signup_response: Option<serde_json::Value>,
    last_store_response: Option<serde_json::Value>,
}

impl SessionSummary {
    fn collect(state: &AuthState, session: &SessionStore) -> Self {
        let store = session.store();
        Self {
            state: state.name(),
            authenticated: session.is_authenticated(),
            user_id: session.user_id(),
            user_created_at: session.user().and_then(|u| u.created_at),
            store_id: session.store_id(),
            store_name: session.store_name(),
            store_city: store
                .map(|s| s.address.city)
                .filter(|city| !city.is_empty()),
            has_access_token: session.access_token().is_some(),
            has_refresh_token: session.refresh_token().is_some(),
            access_expiration: session.access_expiration(),
            access_expired: session.is_access_token_expired(),
            access_minutes_left: session.access_token_time_left(),
            refresh_expiration: session.refresh_expiration(),
            refresh_expired: session.is_refresh_token_expired(),
            needs_refresh: session.needs_refresh(),
            last_signup_response: session.cached_response(SIGNUP_RESPONSE_KEY),
            last_store_response: session.cached_response(CREATE_STORE_RESPONSE_KEY),
        }
    }
}

/// Run the status command, optionally following changes from other processes
pub async fn run(opts: &GlobalOptions, follow: bool) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    print_summary(opts, &ctx, &ctx.provider.state())?;
    if !follow {
        return Ok(());
    }

    let watcher = ctx.backend.spawn_watcher(ctx.config.watch_interval());
    let mut rx = ctx.provider.subscribe();
    rx.mark_unchanged();

    if !opts.is_json() {
        println!("{}", "Watching for session changes (Ctrl-C to stop)".dimmed());
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                print_summary(opts, &ctx, &state)?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    watcher.stop();
    ctx.provider.shutdown();
    Ok(())
}

fn print_summary(opts: &GlobalOptions, ctx: &CommandContext, state: &AuthState) -> Result<()> {
    let summary = SessionSummary::collect(state, ctx.provider.session());

    if opts.is_json() {
        return output::print_json(&summary);
    }

    println!("{}\n", "Shopkeep Session Status".bold());
    println!("API host: {}", ctx.config.api_host().cyan());
    println!(
        "Session database: {}",
        ctx.backend.path().display().to_string().cyan()
    );
    println!();

    if !summary.authenticated {
        println!("{} Not signed in", "✗".red());
        println!("  → Run '{}' to sign in", "shopkeep login".cyan());
        println!();
        return Ok(());
    }

    match &summary.user_id {
        Some(id) => println!("{} Signed in as {}", "✓".green(), id.bold()),
        None => println!("{} Signed in", "✓".green()),
    }
    if let Some(created) = summary.user_created_at {
        println!("  Member since {}", created.format("%Y-%m-%d").to_string().dimmed());
    }

    match (&summary.store_name, &summary.store_id) {
        (Some(name), Some(id)) => {
            print!("{} Store: {} ({})", "✓".green(), name.bold(), id.dimmed());
            match &summary.store_city {
                Some(city) => println!(" in {}", city),
                None => println!(),
            }
        }
        _ => {
            println!("{} No store yet", "○".dimmed());
            println!("  → Run '{}' to create one", "shopkeep store create".cyan());
        }
    }

    if summary.access_expired {
        if summary.needs_refresh {
            println!(
                "{} Access token expired (refresh token still valid)",
                "⚠".yellow()
            );
        } else {
            println!("{} Access token expired", "⚠".yellow());
        }
    } else if let Some(expires) = summary.access_expiration {
        println!(
            "{} Access token valid ({} min left, expires {})",
            "✓".green(),
            summary.access_minutes_left,
            expires.to_rfc3339()
        );
    }

    if let Some(expires) = summary.refresh_expiration {
        println!(
            "{} Refresh token valid until {}",
            "✓".green(),
            expires.to_rfc3339()
        );
    }

    if !summary.has_access_token || !summary.has_refresh_token {
        println!("{} Session is missing a token", "⚠".yellow());
    }

    if let Some(message) = summary
        .last_store_response
        .as_ref()
        .and_then(|body| body["message"].as_str())
    {
        println!("  Last store update: {}", message.dimmed());
    }

    println!();
    Ok(())
}
