use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pubmed_affiliations::config::{find_config_file, load_config};
use pubmed_affiliations::models::{PaperRecord, SearchQuery};
use pubmed_affiliations::sources::PubMedSource;
use pubmed_affiliations::ui;
use pubmed_affiliations::utils::save_to_csv;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch PubMed papers for a query and flag authors with pharma/biotech affiliations
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch PubMed papers and flag pharmaceutical/biotech author affiliations", long_about = None)]
struct Cli {
    /// PubMed query (full PubMed query syntax is supported)
    query: String,

    /// Maximum number of papers to fetch
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    max_results: Option<u32>,

    /// CSV file to write (default: output.csv)
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Also print the results to stdout
    #[arg(long, short, value_enum)]
    print: Option<OutputFormat>,

    /// Enable debug logging (repeat for more: -d, -dd)
    #[arg(long, short, action = clap::ArgAction::Count)]
    debug: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Output format for the stdout preview
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table on a terminal, JSON otherwise
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

fn init_tracing(debug: u8, quiet: bool) {
    let log_level = match debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("pubmed_affiliations={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn output_papers(papers: &[PaperRecord], format: OutputFormat) -> Result<()> {
    let actual_format = if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    match actual_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(papers).context("Failed to serialize papers")?;
            println!("{}", json);
        }
        OutputFormat::Plain => print!("{}", ui::papers_plain(papers)),
        OutputFormat::Table | OutputFormat::Auto => println!("{}", ui::papers_table(papers)),
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    let max_results = cli
        .max_results
        .map(|n| n as usize)
        .unwrap_or(config.pubmed.default_max_results);
    let output_path = cli.file.unwrap_or(config.output.default_path);

    let source = PubMedSource::from_config(&config.pubmed)?;
    let query = SearchQuery::new(&cli.query).max_results(max_results);

    let started = Instant::now();
    let papers = source
        .fetch_papers(&query)
        .await
        .with_context(|| format!("PubMed query failed: {}", cli.query))?;

    if !cli.quiet {
        if papers.is_empty() {
            ui::print_no_results(&cli.query);
        } else {
            ui::print_search_header(&cli.query, papers.len(), started.elapsed());
        }
    }

    if let Some(format) = cli.print {
        output_papers(&papers, format)?;
    }

    save_to_csv(&papers, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if !cli.quiet {
        ui::print_saved(&output_path, papers.len());
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.quiet);

    if let Err(err) = run(cli).await {
        ui::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
