//! prostats CLI - yearly statistics for professional Dota 2 matches.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::stats::StatsArgs;

#[derive(Parser)]
#[command(name = "prostats")]
#[command(about = "Yearly pro match statistics from the OpenDota feed", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics for one calendar year (UTC)
    Stats(StatsArgs),

    /// Print the web page URL of a match
    Link {
        /// Match identifier
        match_id: u64,
    },
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `-v` count.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be set when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    init_logging(cli.verbose, cli.quiet);

    match command {
        Commands::Stats(args) => commands::stats::stats(args, cli.quiet).await,
        Commands::Link { match_id } => {
            commands::link::print_link(match_id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["prostats", "link", "42", "-vv", "-q"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Link { match_id: 42 })));
    }

    #[test]
    fn stats_rejects_years_before_pro_history() {
        assert!(Cli::try_parse_from(["prostats", "stats", "--year", "2010"]).is_err());
        assert!(Cli::try_parse_from(["prostats", "stats", "--year", "2011"]).is_ok());
    }

    #[test]
    fn stats_format_accepts_known_names_only() {
        assert!(Cli::try_parse_from(["prostats", "stats", "--format", "json"]).is_ok());
        assert!(Cli::try_parse_from(["prostats", "stats", "-f", "TXT"]).is_ok());
        assert!(Cli::try_parse_from(["prostats", "stats", "--format", "csv"]).is_err());
    }
}
