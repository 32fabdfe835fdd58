use anyhow::{Context, Result};
use bookfinder::downloader::DEFAULT_OUT_DIR;
use bookfinder::{FindRequest, Finder, FinderConfig, FinderError, Mode, Outcome, SearchQuery, Source};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookfinder")]
#[command(about = "Search public book catalogs and download EPUBs from Project Gutenberg")]
#[command(version = "0.1.0")]
struct Args {
    /// Book title to search for
    #[arg(short = 't', long = "title")]
    title: Option<String>,

    /// Author name to search for
    #[arg(short = 'a', long = "author")]
    author: Option<String>,

    /// Catalog(s) to search
    #[arg(long = "source", value_enum, default_value_t = Source::All)]
    source: Source,

    /// Download a book by Project Gutenberg ID, or by result index when searching
    #[arg(long = "download", value_name = "ID")]
    download: Option<u64>,

    /// Output directory used to save downloaded books
    #[arg(short = 'o', long = "out-dir", default_value = DEFAULT_OUT_DIR)]
    out_dir: String,

    /// Request timeout in seconds (HTTP client default when omitted)
    #[arg(long = "timeout", value_parser = parse_timeout)]
    timeout: Option<f64>,
}

fn parse_timeout(s: &str) -> Result<f64, String> {
    let value = s.parse::<f64>().map_err(|_| "Not a number.")?;
    if value < 0.0 {
        return Err("Must be zero or positive number.".to_string());
    }
    Ok(value)
}

async fn run(args: Args) -> Result<Outcome> {
    let request = FindRequest {
        query: SearchQuery::new(args.title, args.author),
        source: args.source,
        download: args.download,
    };

    // Usage errors are reported before any client is built or request sent.
    if let Err(FinderError::Usage(message)) = Mode::resolve(&request) {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, message)
            .exit();
    }

    let config = FinderConfig {
        out_dir: PathBuf::from(args.out_dir),
        timeout: args.timeout.map(Duration::from_secs_f64),
        ..FinderConfig::default()
    };

    let finder = Finder::new(config).context("Failed to set up catalog clients")?;
    Ok(finder.run(&request).await?)
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::from_default_env()
        .add_directive("bookfinder=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => debug!("Finished: {:?}", outcome),
        Err(e) => {
            error!("{}", format!("Error: {:#}", e).red());
            process::exit(1);
        }
    }
}
