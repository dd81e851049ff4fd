//! Point d'entrée CLI pour subsidy-map

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod counts;
mod export;
mod report;

use cli::Commands;

/// Agréger les comptes de demandes de subvention VE sur les frontières
/// administratives coréennes
#[derive(Parser)]
#[command(name = "subsidy-map")]
#[command(author, version)]
#[command(about = "Aggregate EV subsidy application counts onto Korean administrative boundaries")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Aggregate {
            boundaries,
            counts,
            output,
            scheme,
            period,
            report,
        } => {
            cli::cmd_aggregate(
                &boundaries,
                &counts,
                output.as_deref(),
                &scheme,
                &period,
                report.as_deref(),
            )?;
        }
        Commands::Inspect { boundaries } => {
            cli::cmd_inspect(&boundaries)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
