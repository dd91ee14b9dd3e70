//! CLI binary entry point for contentful-cosmic-import

use clap::{Parser, Subcommand};
use contentful_cosmic_importer::cli::commands::import::{ImportArgs, handle_import};
use contentful_cosmic_importer::cli::commands::preview::handle_preview;
use contentful_cosmic_importer::import::ImportObserver;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contentful-cosmic-import")]
#[command(about = "Import a Contentful space export into a Cosmic bucket")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create object types, media and objects from an export
    Import {
        /// Contentful export JSON file
        export: PathBuf,
        /// Configuration file (default: ./.cosmic-import.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Bucket slug (overrides config and environment)
        #[arg(short, long)]
        bucket: Option<String>,
        /// Bucket read key
        #[arg(long)]
        read_key: Option<String>,
        /// Bucket write key
        #[arg(long)]
        write_key: Option<String>,
    },
    /// Print the converted object types and objects without importing
    Preview {
        /// Contentful export JSON file
        export: PathBuf,
    },
}

/// Prints progress to stdout and failures to stderr as they happen.
struct ConsoleObserver;

impl ImportObserver for ConsoleObserver {
    fn on_progress(&self, label: &str) {
        println!("{}", label);
    }

    fn on_message(&self, message: &str) {
        eprintln!("  ! {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            export,
            config,
            bucket,
            read_key,
            write_key,
        } => {
            let args = ImportArgs {
                export,
                config,
                bucket,
                read_key,
                write_key,
            };
            let report = handle_import(&args, &ConsoleObserver).await?;

            println!(
                "Imported {} object types, {} media and {} objects",
                report.object_types_created, report.media_uploaded, report.objects_created
            );
            if !report.messages.is_empty() {
                println!("{} items were skipped:", report.messages.len());
                for message in &report.messages {
                    println!("  - {}", message);
                }
            }
        }
        Commands::Preview { export } => {
            println!("{}", handle_preview(&export)?);
        }
    }

    Ok(())
}
