//! Gujin CLI - Command-line interface
//!
//! Resolves ancient Chinese place names and drives a headless map session
//! from the terminal.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;

#[derive(Parser)]
#[command(name = "gujin")]
#[command(version = gujin::VERSION)]
#[command(about = "Ancient Chinese place name lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single ancient place name and print the result
    Query(commands::query::QueryArgs),
    /// Interactive search session with a synchronized headless map
    Session(commands::session::SessionArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _logging_guard = match gujin::logging::init_logging(
        gujin::logging::default_log_dir(),
        gujin::logging::default_log_file(),
    ) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let outcome = match cli.command {
        Commands::Query(args) => commands::query::run(args).await,
        Commands::Session(args) => commands::session::run(args).await,
    };

    if let Err(e) = outcome {
        e.exit();
    }
}
