use clap::{Parser, Subcommand};
use release_index::index::IndexFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "release-index")]
#[command(about = "Build a version-ordered index of published releases")]
#[command(version)]
struct Cli {
    /// Log fetch progress (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every release and write the index file
    Fetch {
        /// Releases metadata endpoint
        #[arg(short, long)]
        url: Option<String>,
        /// Index file to write
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Index layout
        #[arg(short, long, value_enum)]
        format: Option<IndexFormat>,
        /// Releases requested per page
        #[arg(long)]
        page_size: Option<usize>,
        /// Config file (defaults to the platform config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Inspect or create configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Config file (defaults to the platform config directory)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show the default config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Fetch {
            url,
            output,
            format,
            page_size,
            config,
        } => {
            cli::fetch::run(cli::fetch::FetchOptions {
                url,
                output,
                format,
                page_size,
                config,
            })
            .await
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { config } => cli::config::show(config.as_deref()),
            ConfigCommands::Path => cli::config::path(),
            ConfigCommands::Init { force } => cli::config::init(force),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // A partial catalog is never written, so any failure fails the run.
            eprintln!("\n❌ Error: {}", e);
            if let Some(status) = e.status() {
                eprintln!("   The releases API answered with HTTP {}.", status);
            }
            if e.is_fetch_error() {
                eprintln!("   No index was written.");
            }
            ExitCode::FAILURE
        }
    }
}
