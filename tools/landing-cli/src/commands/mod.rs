//! CLI command implementations.

pub mod config;
pub mod submit;

use clap::{Args, Subcommand};

/// Arguments for the waitlist command.
#[derive(Args)]
pub struct WaitlistArgs {
    /// Email address (prompted for when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Your name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Profession, as offered on the page.
    #[arg(short, long)]
    pub profession: Option<String>,

    /// Notify me when the iOS app ships.
    #[arg(long)]
    pub notify_ios: bool,

    /// I'm interested in an Android app.
    #[arg(long)]
    pub interested_android: bool,
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    /// Your name (prompted for when omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Reply-to email address (prompted for when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Message body (prompted for when omitted).
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default `landing.toml` in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
