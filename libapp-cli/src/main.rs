//! Libapp CLI - Command-line interface for the library catalog

mod commands;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use libapp_core::{AppConfig, CatalogService, ConfigOverrides, LibraryError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for a missing or unknown command, and for operational failures
const EXIT_FAILURE: u8 = 1;
const EXIT_ALREADY_EXISTS: u8 = 2;
const EXIT_UNAVAILABLE: u8 = 3;
const EXIT_NOT_FOUND: u8 = 4;

/// Accept only paths naming an existing file
fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("file {} does not exist", s))
    }
}

#[derive(Parser)]
#[command(name = "libapp")]
#[command(author, version, about = "Simple Library Manager", long_about = None)]
struct Cli {
    /// Optional configuration file with overrides (JSON format)
    #[arg(long, global = true, value_parser = existing_file)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new book
    Add {
        isbn: String,
        title: String,
        author: String,
    },

    /// List books in the catalog
    List {
        /// Only show available books
        #[arg(long)]
        available: bool,
    },

    /// Borrow a book
    Borrow { isbn: String, borrower: String },

    /// Return a borrowed book
    Return { isbn: String },

    /// Search for books by title
    Search { fragment: String },

    /// Find books by author
    Author { author: String },

    /// Show books per author
    Summary,

    /// Replace the catalog with a JSON array of {isbn, title, author}
    Import {
        #[arg(value_parser = existing_file)]
        file: PathBuf,
    },

    /// Clear the catalog
    Reset,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            let _ = err.print();
            return ExitCode::from(EXIT_FAILURE);
        }
        Err(err) => err.exit(),
    };

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose {
        "libapp_cli=debug,libapp_core=debug"
    } else {
        "libapp_cli=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(EXIT_FAILURE);
    };

    match run(cli.config.as_deref(), command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(config_file: Option<&Path>, command: Commands) -> Result<()> {
    let mut service = open_service(config_file)?;

    match command {
        Commands::Add {
            isbn,
            title,
            author,
        } => commands::add(&mut service, &isbn, &title, &author),

        Commands::List { available } => commands::list(&service, available),

        Commands::Borrow { isbn, borrower } => commands::borrow(&mut service, &isbn, &borrower),

        Commands::Return { isbn } => commands::return_book(&mut service, &isbn),

        Commands::Search { fragment } => commands::search(&service, &fragment),

        Commands::Author { author } => commands::author(&service, &author),

        Commands::Summary => commands::summary(&service),

        Commands::Import { file } => commands::import(&mut service, &file),

        Commands::Reset => commands::reset(&mut service),
    }
}

/// Environment configuration, with file overrides layered on top
fn open_service(config_file: Option<&Path>) -> Result<CatalogService> {
    let mut config = AppConfig::from_env();
    if let Some(path) = config_file {
        let overrides = ConfigOverrides::from_file(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        config = config.with_overrides(overrides);
    }

    tracing::debug!(
        data_file = %config.data_file.display(),
        autosave = config.autosave,
        "Opening catalog"
    );
    CatalogService::open(&config)
        .with_context(|| format!("Failed to open catalog {}", config.data_file.display()))
}

/// Map a failed command onto the process exit status
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<LibraryError>() {
        Some(LibraryError::AlreadyExists(_)) => EXIT_ALREADY_EXISTS,
        Some(LibraryError::Unavailable(_)) => EXIT_UNAVAILABLE,
        Some(LibraryError::NotFound(_)) => EXIT_NOT_FOUND,
        Some(LibraryError::Storage(_)) | None => EXIT_FAILURE,
    }
}
