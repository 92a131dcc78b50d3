use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::classify::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "authorship-eval",
    version,
    about = "LLM authorship attribution evaluation pipeline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restrict the raw blog corpus to the most prolific authors and split it.
    Prepare(PrepareArgs),
    /// Build one candidate set per test example.
    Sample(SampleArgs),
    /// Ask the generation service to attribute every candidate set.
    Classify(ClassifyArgs),
    /// Parse raw model output and report classification metrics.
    Score(ScoreArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    #[arg(long)]
    pub blogtext: PathBuf,

    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = 5)]
    pub num_authors: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    #[arg(long)]
    pub train: PathBuf,

    #[arg(long)]
    pub test: PathBuf,

    #[arg(long, default_value = "data/candidate_sets.json")]
    pub output: PathBuf,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(long, default_value = "data/candidate_sets.json")]
    pub candidate_sets: PathBuf,

    #[arg(long, default_value = "data/llm_results.csv")]
    pub output: PathBuf,

    #[arg(long, default_value = "gemini-2.0-flash-lite")]
    pub model: String,

    #[arg(long)]
    pub prompt_template: Option<PathBuf>,

    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, default_value_t = 10)]
    pub max_retries: u32,

    #[arg(long, default_value_t = 1000)]
    pub initial_backoff_ms: u64,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ParseMode {
    #[default]
    Strict,
    FirstInteger,
}

impl ParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::FirstInteger => "first-integer",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[arg(long, default_value = "data/llm_results.csv")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = ParseMode::Strict)]
    pub parse_mode: ParseMode,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}
