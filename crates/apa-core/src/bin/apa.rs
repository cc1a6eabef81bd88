//! apa command-line tool
//!
//! Parse, cite, format and validate APA 7 references. JSON goes in and out;
//! logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use apa_core::{
    citation_for, format_reference_list, validate_coherence, ApaConfig, Citation,
    CoherenceIssue, CoherenceReport, CoherenceSummary, Encoding, ParsedReference,
    ReferenceListEntry, ReferenceParser, Result,
};

#[derive(Parser)]
#[command(name = "apa")]
#[command(about = "APA 7 reference parsing, formatting and coherence checks")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one free-text reference into JSON
    Parse {
        /// Reference text (reads stdin when omitted)
        text: Option<String>,
    },

    /// Render in-text citations for a JSON array of references
    Cite {
        /// JSON file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Render a sorted reference list for a JSON array of references
    Format {
        /// Output encoding: text, html or latex
        #[arg(short, long)]
        encoding: Option<String>,

        /// JSON file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Check citations against a reference list
    Validate {
        /// JSON file with `citations` and `references` (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct ValidateInput {
    #[serde(default)]
    citations: Vec<Citation>,
    #[serde(default)]
    references: Vec<ReferenceListEntry>,
}

#[derive(Serialize)]
struct ValidateOutput {
    report: CoherenceReport,
    summary: CoherenceSummary,
    issues: Vec<CoherenceIssue>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { text } => {
            let text = match text {
                Some(text) => text,
                None => read_input(None)?,
            };
            let parser = ReferenceParser::new(config.parser);
            let reference = parser.parse(&text)?;
            println!("{}", serde_json::to_string_pretty(&reference)?);
        }

        Commands::Cite { file } => {
            let references: Vec<ParsedReference> =
                serde_json::from_str(&read_input(file.as_deref())?)?;
            let citations: Vec<Citation> = references.iter().map(citation_for).collect();
            println!("{}", serde_json::to_string_pretty(&citations)?);
        }

        Commands::Format { encoding, file } => {
            let encoding = match encoding {
                Some(name) => name.parse::<Encoding>()?,
                None => config.output.encoding,
            };
            let references: Vec<ParsedReference> =
                serde_json::from_str(&read_input(file.as_deref())?)?;
            println!("{}", format_reference_list(&references, encoding)?);
        }

        Commands::Validate { file } => {
            let input: ValidateInput = serde_json::from_str(&read_input(file.as_deref())?)?;
            let report = validate_coherence(&input.citations, &input.references);
            let summary = report.summary(input.citations.len(), input.references.len());
            let issues = report.issues();

            if !summary.is_coherent() {
                tracing::info!(issues = issues.len(), "citations and references disagree");
            }

            let output = ValidateOutput {
                report,
                summary,
                issues,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ApaConfig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(ApaConfig::from_toml(&contents)?)
        }
        None => Ok(ApaConfig::default()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
