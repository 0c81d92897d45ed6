//! foam-streams - Main Entry Point
//!
//! Command-line front end; the actual implementation is in the
//! `foam_streams` library.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use foam_streams::logging::init_logging;
use foam_streams::validation::resolve_today;
use foam_streams::{Config, FoamWorkspace};
use std::path::PathBuf;

/// Work stream pages and daily notes for a Foam knowledge base
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Commit written files when the Foam workspace is a git repository
    #[arg(long, global = true)]
    sync_git: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan all-streams.md and write the stream data file
    Extract {
        /// Path to the Foam workspace
        base: PathBuf,

        /// Stream data file (default: <BASE>/all-streams-data.toml)
        #[arg(long)]
        stream_data: Option<PathBuf>,
    },

    /// Regenerate stream, project and quick-links pages from the stream data file
    Render {
        /// Path to the Foam workspace
        base: PathBuf,

        /// Stream data file (default: <BASE>/all-streams-data.toml)
        #[arg(long)]
        stream_data: Option<PathBuf>,

        /// Date used for quick links, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Extract then render
    Update {
        /// Path to the Foam workspace
        base: PathBuf,

        /// Stream data file (default: <BASE>/all-streams-data.toml)
        #[arg(long)]
        stream_data: Option<PathBuf>,

        /// Date used for quick links, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Create today's daily note and meetings note
    AddDay {
        /// Path to the Foam workspace
        base: PathBuf,

        /// Daily note template with {TODAY} and {LAST_DAY} placeholders
        #[arg(long)]
        template: PathBuf,

        /// Date of the note to create, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
    },
}

fn workspace(base: PathBuf, stream_data: Option<PathBuf>, sync_git: bool) -> FoamWorkspace {
    let mut config = Config::new(base).with_sync_git(sync_git);
    if let Some(path) = stream_data {
        config = config.with_stream_data_path(path);
    }
    FoamWorkspace::new(config)
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    init_logging(args.verbose);

    let message = match args.command {
        Command::Extract { base, stream_data } => {
            workspace(base, stream_data, args.sync_git).handle_extract()?
        }
        Command::Render {
            base,
            stream_data,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            workspace(base, stream_data, args.sync_git).handle_render(&today)?
        }
        Command::Update {
            base,
            stream_data,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            workspace(base, stream_data, args.sync_git).handle_update(&today)?
        }
        Command::AddDay {
            base,
            template,
            today,
        } => {
            let today = resolve_today(today.as_deref())?;
            let config = Config::new(base)
                .with_template_path(template)
                .with_sync_git(args.sync_git);
            FoamWorkspace::new(config).handle_add_day(&today)?.to_string()
        }
    };

    println!("{}", message);
    println!("Done.");
    Ok(())
}
