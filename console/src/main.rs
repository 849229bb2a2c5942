//! dnsrelay Console - webhook administration client.
//!
//! This binary drives the dnsrelay backend's administration API: first-run
//! password setup, login, the webhook setup wizard, and webhook management.
//!
//! # Commands
//!
//! - `dnsrelay-console run`: Start the interactive console
//! - `dnsrelay-console status`: Print the backend status snapshot as JSON
//! - `dnsrelay-console logout`: Invalidate the backend session
//!
//! # Environment Variables
//!
//! See the [`dnsrelay_console::config`] module for available options.

use std::io::IsTerminal;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dnsrelay_console::boot;
use dnsrelay_console::config::Config;
use dnsrelay_console::router::GuiFlag;
use dnsrelay_console::tui::{self, install_panic_hook, RunOutcome};
use dnsrelay_console::ApiClient;

/// dnsrelay Console - webhook administration client.
///
/// Configures Slack and Microsoft Teams push-notification webhooks against a
/// dnsrelay backend, gated behind the shared administrator credential.
#[derive(Parser, Debug)]
#[command(name = "dnsrelay-console")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    DNSRELAY_SERVER_URL             Backend base URL (required)
    DNSRELAY_POLL_INTERVAL_SECS     Verification poll interval (default: 3)
    DNSRELAY_REQUEST_TIMEOUT_SECS   HTTP request timeout (default: 30)

EXAMPLES:
    # Start the interactive console
    export DNSRELAY_SERVER_URL=https://relay.example.com
    dnsrelay-console run

    # One-shot status check
    dnsrelay-console status
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive console.
    Run,

    /// Print the backend status snapshot as JSON and exit.
    Status,

    /// Invalidate the backend session and exit.
    Logout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match cli.command {
        Command::Run => runtime.block_on(run_console()),
        Command::Status => runtime.block_on(run_status()),
        Command::Logout => runtime.block_on(run_logout()),
    }
}

/// Runs the interactive console, restarting from scratch after a logout.
async fn run_console() -> Result<()> {
    init_logging();

    if !std::io::stdout().is_terminal() {
        bail!("'run' needs a terminal; use 'dnsrelay-console status' for scripting");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(server_url = %config.server_url, "Starting dnsrelay console");

    install_panic_hook();

    // A logout is a full client reset: every cached snapshot, session
    // credential, and wizard state is rebuilt from bootstrap.
    loop {
        match tui::run(&config).await? {
            RunOutcome::Exit => break,
            RunOutcome::Restart => {
                info!("session ended; restarting from bootstrap");
                continue;
            }
        }
    }

    Ok(())
}

/// Prints the status snapshot for scripting and debugging.
async fn run_status() -> Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let api = ApiClient::from_config(&config);

    let booted = boot::bootstrap(&api).await;
    if booted.gui == GuiFlag::Disabled {
        bail!("the administration console is disabled on this backend");
    }

    match booted.store.snapshot() {
        Some(snapshot) => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
            Ok(())
        }
        None => bail!("status unavailable from {}", config.server_url),
    }
}

/// Invalidates the backend session.
async fn run_logout() -> Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let api = ApiClient::from_config(&config);

    let booted = boot::bootstrap(&api).await;
    api.logout(&booted.session)
        .await
        .context("Failed to log out")?;

    println!("Logged out.");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}
