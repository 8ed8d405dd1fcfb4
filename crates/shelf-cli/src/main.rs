#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "shelf: a filterable product catalog browser",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (pretty, text, json).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, env, and TTY detection.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "List products with optional filters",
        long_about = "List catalog products, filtered by owner, search text, and categories.",
        after_help = "EXAMPLES:\n    # Full catalog\n    shelf list\n\n    # Filter by owner and search text\n    shelf list --owner Anna --search brea\n\n    # Multi-select categories\n    shelf list --category Drinks --category Grocery\n\n    # Emit machine-readable output\n    shelf list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "List catalog owners",
        after_help = "EXAMPLES:\n    # All owners\n    shelf owners\n\n    # Emit machine-readable output\n    shelf owners --json"
    )]
    Owners(cmd::owners::OwnersArgs),

    #[command(
        about = "List categories with their owners",
        after_help = "EXAMPLES:\n    # All categories\n    shelf categories\n\n    # Emit machine-readable output\n    shelf categories --json"
    )]
    Categories(cmd::categories::CategoriesArgs),

    #[command(
        about = "Browse the catalog interactively",
        long_about = "Open a full-screen terminal UI with live search, owner and category filters."
    )]
    Browse,

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    shelf completions bash\n\n    # Generate zsh completions\n    shelf completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SHELF_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "shelf=debug,info"
        } else {
            "shelf=info,warn"
        })
    });

    let format = env::var("SHELF_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let command_result = match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output),
        Commands::Owners(ref args) => cmd::owners::run_owners(args, output),
        Commands::Categories(ref args) => cmd::categories::run_categories(args, output),
        Commands::Browse => tui::browse::run_browse_tui(),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    if let Err(err) = command_result {
        let cli_err = err
            .downcast_ref::<shelf_core::ShelfError>()
            .map_or_else(|| CliError::new(err.to_string()), CliError::from);
        output::render_error(output, &cli_err)?;
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_list_with_filters() {
        let cli = Cli::parse_from([
            "shelf", "list", "--owner", "Anna", "--search", "brea", "--category", "Drinks",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.owner.as_deref(), Some("Anna"));
                assert_eq!(args.search.as_deref(), Some("brea"));
                assert_eq!(args.category, vec!["Drinks".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_json_flag_forces_json_mode() {
        let cli = Cli::parse_from(["shelf", "--json", "owners"]);
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn cli_format_flag_wins_over_json() {
        let cli = Cli::parse_from(["shelf", "--json", "--format", "text", "owners"]);
        assert_eq!(cli.output_mode(), OutputMode::Text);
    }
}
