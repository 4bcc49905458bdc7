use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexlab::{AlignmentTable, ContractionTable, ProbabilityMatrix, Scanner, State, Token, data, plural};

const DEMO_SENTENCE: &str = "It's a sunny day in the U.S.A. I love ice-cream! He isn't going.";
const DEMO_WORDS: [&str; 9] = [
    "boys", "toys", "ponies", "skies", "puppies", "boies", "ponys", "toies", "cats",
];

#[derive(Debug, Parser)]
#[command(name = "lexlab", version, about = "Tokenizer, y-plural acceptor and word-alignment demos")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split text into tokens, expanding contractions
    Tokenize(TokenizeArgs),
    /// Check words against the y-pluralization acceptor
    Plural(PluralArgs),
    /// Print co-occurrence translation probabilities for a parallel corpus
    Align(AlignArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
struct TokenizeArgs {
    /// Texts to tokenize (default: a demo sentence)
    text: Vec<String>,

    /// JSON object of extra contractions, e.g. {"ain't": ["am", "not"]}
    #[arg(short, long, value_name = "FILE")]
    contractions: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct PluralArgs {
    /// Words to check (default: the demo word list)
    words: Vec<String>,

    /// Show the state entered after every character
    #[arg(short, long)]
    trace: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct AlignArgs {
    /// JSON array of [source, target] sentence pairs (default: demo corpus)
    #[arg(short, long, value_name = "FILE")]
    corpus: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct TokenizeReport<'a> {
    text: &'a str,
    tokens: Vec<Token>,
}

#[derive(Serialize)]
struct PluralReport<'a> {
    word: &'a str,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<(char, State)>>,
}

#[derive(Serialize)]
struct AlignReport {
    target_given_source: ProbabilityMatrix,
    source_given_target: ProbabilityMatrix,
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_tokenize(args: &TokenizeArgs) -> Result<()> {
    let mut table = ContractionTable::builtin().context("loading built-in contractions")?;
    if let Some(path) = &args.contractions {
        let extra = data::read_contractions(path)?;
        info!(path = %path.display(), entries = extra.len(), "extra contractions loaded");
        table.extend(extra);
    }
    let scanner = Scanner::with_contractions(table)?;

    let texts: Vec<&str> = if args.text.is_empty() {
        vec![DEMO_SENTENCE]
    } else {
        args.text.iter().map(String::as_str).collect()
    };

    match args.format {
        OutputFormat::Text => {
            for text in texts {
                println!("{:?}", scanner.tokenize(text));
            }
        }
        OutputFormat::Json => {
            let reports: Vec<TokenizeReport> = texts
                .into_iter()
                .map(|text| TokenizeReport { text, tokens: scanner.scan(text) })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

fn run_plural(args: &PluralArgs) -> Result<()> {
    let words: Vec<&str> = if args.words.is_empty() {
        DEMO_WORDS.to_vec()
    } else {
        args.words.iter().map(String::as_str).collect()
    };

    match args.format {
        OutputFormat::Text => {
            for word in words {
                let verdict = if plural::accepts(word) { "ACCEPTED" } else { "REJECTED" };
                println!("Processing '{}': {}", word, verdict);
                if args.trace {
                    for (ch, state) in plural::trace(word) {
                        println!("  {} -> {:?}", ch, state);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let reports: Vec<PluralReport> = words
                .into_iter()
                .map(|word| PluralReport {
                    word,
                    accepted: plural::accepts(word),
                    trace: args.trace.then(|| plural::trace(word)),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

fn run_align(args: &AlignArgs) -> Result<()> {
    let table = match &args.corpus {
        Some(path) => {
            let pairs = data::read_alignment_corpus(path)?;
            AlignmentTable::from_pairs(&pairs)
        }
        None => AlignmentTable::builtin().context("loading built-in corpus")?,
    };

    let report = AlignReport {
        target_given_source: table.target_given_source_matrix(),
        source_given_target: table.source_given_target_matrix(),
    };

    match args.format {
        OutputFormat::Text => {
            println!("--- Translation Probabilities P(f|e) ---");
            print!("{}", report.target_given_source);
            println!();
            println!("--- Translation Probabilities P(e|f) ---");
            print!("{}", report.source_given_target);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Tokenize(args) => run_tokenize(args),
        Commands::Plural(args) => run_plural(args),
        Commands::Align(args) => run_align(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lexlab", "plural", "boys", "-vv", "--trace"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Plural(args) => {
                assert_eq!(args.words, vec!["boys"]);
                assert!(args.trace);
            }
            other => panic!("expected plural, got {:?}", other),
        }
    }
}
