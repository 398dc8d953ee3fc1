//! Folio CLI - portfolio comment feed.
//!
//! Provides commands for:
//! - `comments list`: Fetch and show the comment feed
//! - `comments delete-all`: Remove every comment
//! - `comments post`: Submit a new comment
//! - `auth`: Show who is logged in

mod commands;
mod error;
mod output;
mod view;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommentsCommand, GlobalArgs};
use output::Output;

/// Folio - portfolio comment feed client.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Comment feed commands.
    #[command(subcommand)]
    Comments(CommentsCommand),
    /// Show login status.
    Auth,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = log_filter(cli.global.verbose, std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Comments(cmd) => cmd.execute(&cli.global),
        Commands::Auth => commands::auth::execute(&cli.global),
    };

    if let Err(err) = result {
        output.failure(&err);
        std::process::exit(1);
    }
}

/// Log filter: `--verbose` forces INFO, otherwise `RUST_LOG`, defaulting to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
