use crate::keywords::{KeywordExtractor, DEFAULT_TOP_N};
use crate::models::DistilBertVariant;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sentiscope",
    about = "Sentiment analysis dashboard with keyword extraction and CSV/JSON/PDF export",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for logs
    #[arg(long, default_value = "text", global = true)]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze texts given as arguments, from a file, or piped on stdin
    Analyze {
        /// Texts to analyze, one document per argument
        texts: Vec<String>,

        /// Read texts from a file instead: a .csv with a 'text' column, or
        /// plain text with one document per non-blank line
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: AnalyzerOptions,

        /// Write a CSV export to this path
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Write a JSON export to this path
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        /// Write a PDF report to this path
        #[arg(long, value_name = "PATH")]
        pdf: Option<PathBuf>,
    },

    /// Analyze blocks of lines read from stdin, one analysis per blank-line-
    /// terminated block
    Interactive {
        #[command(flatten)]
        options: AnalyzerOptions,
    },

    /// Show information about Sentiscope
    Info,
}

/// Options shared by the one-shot and interactive commands.
#[derive(Args, Debug, Clone)]
pub struct AnalyzerOptions {
    /// Pretrained checkpoint to classify with
    #[arg(long, value_enum, default_value = "sst-english")]
    pub model: ModelChoice,

    /// Keyword extraction policy
    #[arg(long, value_enum, default_value = "statistical")]
    pub keywords: KeywordMode,

    /// Number of keywords kept by the statistical policy
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Force CPU inference even if CUDA is available
    #[arg(long)]
    pub cpu: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    /// English SST-2 checkpoint (POSITIVE/NEGATIVE)
    SstEnglish,
    /// Multilingual checkpoint (also emits NEUTRAL)
    Multilingual,
}

impl From<ModelChoice> for DistilBertVariant {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::SstEnglish => DistilBertVariant::SstEnglish,
            ModelChoice::Multilingual => DistilBertVariant::MultilingualSentiment,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMode {
    /// Per-document term-frequency ranking with stopwords removed
    Statistical,
    /// Fixed sentiment word-list lookup
    Lexicon,
}

impl KeywordMode {
    pub fn extractor(self, top_n: usize) -> KeywordExtractor {
        match self {
            KeywordMode::Statistical => KeywordExtractor::statistical(top_n),
            KeywordMode::Lexicon => KeywordExtractor::lexicon(),
        }
    }
}
