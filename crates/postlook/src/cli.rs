//! Clap derive structures for the `postlook` CLI.

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// postlook -- Dutch postal-address lookup from the command line
#[derive(Debug, Parser)]
#[command(
    name = "postlook",
    version,
    about = "Resolve Dutch addresses from postcode and street number",
    long_about = "Drives the same lookup flow a checkout form would: validates\n\
        the postcode / street number / suffix triple, queries the configured\n\
        relay endpoint, and prints the resolved street, city, and province.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Relay endpoint URL (overrides the config file)
    #[arg(long, short = 'e', env = "POSTLOOK_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Country code to simulate on the form
    #[arg(long, env = "POSTLOOK_COUNTRY", default_value = "NL", global = true)]
    pub country: String,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an address through the relay endpoint
    Lookup(LookupArgs),

    /// Check the query fields against the Dutch format rules (offline)
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Dutch postcode (e.g. 2611KL)
    pub postcode: String,

    /// Street number (1-5 digits)
    pub street_number: String,

    /// Street number suffix (optional)
    #[arg(default_value = "")]
    pub suffix: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Dutch postcode (e.g. 2611KL)
    pub postcode: String,

    /// Street number (1-5 digits)
    #[arg(default_value = "")]
    pub street_number: String,

    /// Street number suffix (optional)
    #[arg(default_value = "")]
    pub suffix: String,
}
