//! Command line argument parsing for the bayes CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerConfig;

/// bayes - Train and query a Naive Bayes text classifier
#[derive(Parser, Debug, Clone)]
#[command(name = "bayes")]
#[command(about = "Train and query a Naive Bayes text classifier")]
#[command(version = crate::VERSION)]
#[command(long_about = None)]
pub struct BayesArgs {
    /// Verbosity level (repeat for more output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BayesArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }

    /// Default log level for the verbosity; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Learn one document under a category
    Learn(LearnArgs),

    /// Print the most likely category for a text
    Categorize(CategorizeArgs),

    /// Print the raw log score of every category for a text
    Probabilities(CategorizeArgs),

    /// Show model statistics
    Stats(StatsArgs),
}

/// Arguments for learning a document
#[derive(Parser, Debug, Clone)]
pub struct LearnArgs {
    /// Path to the model snapshot (created if missing)
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Category label of the document
    #[arg(short, long)]
    pub category: String,

    /// Document text
    #[arg(short, long, required_unless_present = "input", conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the document text from a file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Tokenizer of a newly created model (ignored for existing models)
    #[arg(long, value_enum, default_value = "regex")]
    pub tokenizer: TokenizerChoice,
}

/// Arguments for categorizing a text
#[derive(Parser, Debug, Clone)]
pub struct CategorizeArgs {
    /// Path to the model snapshot
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for model statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the model snapshot
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,
}

/// Built-in tokenizers selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenizerChoice {
    /// Runs of Unicode word characters (default)
    Regex,
    /// Split on whitespace
    Whitespace,
    /// Unicode word boundaries
    UnicodeWord,
    /// Single characters
    Character,
}

impl TokenizerChoice {
    /// The tokenizer config, or `None` for the default tokenizer.
    pub fn config(self) -> Option<TokenizerConfig> {
        match self {
            TokenizerChoice::Regex => None,
            TokenizerChoice::Whitespace => Some(TokenizerConfig::Whitespace),
            TokenizerChoice::UnicodeWord => Some(TokenizerConfig::UnicodeWord),
            TokenizerChoice::Character => Some(TokenizerConfig::Ngram {
                min_gram: 1,
                max_gram: 1,
            }),
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
