//! Landing CLI - submit the Persist.Live landing page forms from a terminal.
//!
//! Commands:
//! - `landing waitlist` - Join the waitlist
//! - `landing contact` - Send a contact message
//! - `landing config` - Show or create the configuration file

mod commands;
mod context;
mod output;
mod terminal;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ConfigArgs, ContactArgs, WaitlistArgs};

/// Landing CLI - talk to the Persist.Live landing page backend
#[derive(Parser)]
#[command(name = "landing")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, overriding config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the waitlist
    Waitlist(WaitlistArgs),

    /// Send a message through the contact form
    Contact(ContactArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let loaded = context::Context::load(
        cli.config.as_deref(),
        cli.base_url.as_deref(),
        output.clone(),
    );
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Ok(false) means the command ran but the submission did not succeed.
    let result = match cli.command {
        Commands::Waitlist(args) => commands::submit::waitlist(args, &ctx)
            .await
            .map(|outcome| outcome.is_success()),
        Commands::Contact(args) => commands::submit::contact(args, &ctx)
            .await
            .map(|outcome| outcome.is_success()),
        Commands::Config(args) => commands::config::run(args, &ctx).await.map(|()| true),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
