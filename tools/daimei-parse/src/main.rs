//! Release title parser CLI
//!
//! Parses anime release titles given as arguments, or one per line on stdin,
//! and prints the episode range, subtitle languages and resolution.
//!
//! Usage:
//!   daimei-parse "[Group] Show - 05 [1080p][CHS]"
//!   ls /media/anime | daimei-parse --format json --parallel

use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use daimei_core::{ParsedTitle, ParserConfig, TitleParser};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `episode | languages | resolution | input`
    Text,
    /// One JSON object per line
    Json,
}

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "daimei-parse")]
#[command(about = "Extract episode, subtitle and resolution metadata from release titles")]
#[command(version)]
struct Cli {
    /// Titles to parse; read from stdin when omitted
    titles: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Extra marker that makes bracketed numbers specials (repeatable)
    #[arg(short = 's', long = "special-marker", env = "DAIMEI_SPECIAL_MARKERS", value_delimiter = ',')]
    special_markers: Vec<String>,

    /// Run extractors and batches on the rayon pool
    #[arg(short, long)]
    parallel: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// JSON line emitted per title
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    input: &'a str,
    episode_range: String,
    subtitle_languages: String,
    resolution: Option<String>,
}

impl<'a> From<&'a ParsedTitle> for ParseOutput<'a> {
    fn from(parsed: &'a ParsedTitle) -> Self {
        Self {
            input: &parsed.input,
            episode_range: parsed.episode_range.to_string(),
            subtitle_languages: parsed.subtitle_languages.to_string(),
            resolution: parsed.resolution.map(|r| r.to_string()),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_titles(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let stdin = io::stdin();
    let mut titles = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read title from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            titles.push(line.to_string());
        }
    }
    Ok(titles)
}

fn render_text(parsed: &ParsedTitle) -> String {
    let resolution = parsed
        .resolution
        .map_or_else(|| "none".to_string(), |r| r.to_string());
    format!(
        "{} | {} | {} | {}",
        parsed.episode_range, parsed.subtitle_languages, resolution, parsed.input
    )
}

fn write_results(results: &[ParsedTitle], format: Format) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for parsed in results {
        let line = match format {
            Format::Text => render_text(parsed),
            Format::Json => serde_json::to_string(&ParseOutput::from(parsed))
                .context("Failed to serialize parse result")?,
        };
        writeln!(out, "{line}").context("Failed to write output")?;
    }

    out.flush().context("Failed to flush output")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli
        .special_markers
        .iter()
        .fold(ParserConfig::new(), |config, marker| config.with_special_marker(marker.as_str()))
        .with_parallel_extractors(cli.parallel);
    debug!(?config, "parser configuration");

    let parser = TitleParser::new(config).context("Invalid parser configuration")?;
    let titles = read_titles(cli.titles)?;
    info!(count = titles.len(), "parsing titles");

    let results = if cli.parallel {
        parser.parse_batch(&titles)
    } else {
        titles.iter().map(|title| parser.parse(title)).collect()
    };

    write_results(&results, cli.format)
}
