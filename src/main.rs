//! CLI tool that renames PDFs after the title and author in their metadata.

use clap::Parser;
use pdftitlerename::{BatchRenamer, RenameConfig, SanitizeMode};
use std::path::PathBuf;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Batch rename PDF files based on their metadata/XMP title and author.
#[derive(Parser, Debug)]
#[command(name = "pdf-title-rename", version, about)]
struct Args {
    /// Directory containing the PDF files to rename
    directory: PathBuf,

    /// Prefix each filename with the author's surname
    #[arg(short, long)]
    author: bool,

    /// Move renamed files into this directory
    #[arg(short, long, value_name = "DIR")]
    destination: Option<PathBuf>,

    /// Also strip punctuation from the title part of the filename
    #[arg(long)]
    sanitize_title: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = RenameConfig {
        use_author: args.author,
        destination: args.destination,
        sanitize: if args.sanitize_title {
            SanitizeMode::Both
        } else {
            SanitizeMode::AuthorOnly
        },
    };
    let renamer = BatchRenamer::new(config);

    match renamer.run(&args.directory) {
        Ok(report) => {
            println!("{report}");
            if renamer.config().destination.is_some() {
                println!(" - Filed: {}", report.filed);
            }
        }
        Err(e) => {
            error!("Cannot process '{}': {e}", args.directory.display());
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();
}
