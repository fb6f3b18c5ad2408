//! CLI command definitions for the `gurume` binary.

pub mod favorites;
pub mod query;
pub mod search;

use clap::{Parser, Subcommand};

use gurume_types::query::Radius;

/// LINE bot that finds restaurants near you.
#[derive(Parser)]
#[command(name = "gurume", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the LINE webhook server.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Run a nearby restaurant search and print the results as JSON.
    Search {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// One of 100, 250, 500, 1000, 2000, 5000 metres.
        #[arg(long, default_value = "500")]
        radius: Radius,

        /// Repeat to add several keywords.
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// Print a user's stored favorites as JSON.
    Favorites {
        /// Platform user id (not the hashed key).
        user_id: String,

        /// Delete the list after printing it.
        #[arg(long)]
        clear: bool,
    },

    /// Print a user's pending search query as JSON.
    Query {
        /// Platform user id (not the hashed key).
        user_id: String,

        /// Delete the query after printing it.
        #[arg(long)]
        clear: bool,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "info,gurume_core=debug,gurume_infra=debug,gurume_api=debug",
            _ => "trace",
        }
    }
}
