use crate::adapters::gemini::{API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::core::batch::DEFAULT_FILE_PATTERN;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Clone, Parser)]
#[command(name = "fruit-etl")]
#[command(about = "Researches fruit species with a generative model and saves the answers in JSON batches")]
pub struct CliConfig {
    /// JSON array of species records
    #[arg(long, default_value = "species.json")]
    pub species_file: String,

    /// Directory the batch files are written to
    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Number of fruits per batch file
    #[arg(long, default_value = "3")]
    pub batch_size: usize,

    /// Batch file name; `{index}` is replaced by the 1-based batch number
    #[arg(long, default_value = DEFAULT_FILE_PATTERN)]
    pub file_pattern: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout for the model call
    #[arg(long, default_value = "120")]
    pub timeout_seconds: u64,

    /// Ask the model for numbered citations as well
    #[arg(long)]
    pub with_references: bool,

    /// Load settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show the planned batches without calling the model or writing files
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl ConfigProvider for CliConfig {
    fn species_file(&self) -> &str {
        &self.species_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn file_pattern(&self) -> &str {
        &self.file_pattern
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn include_references(&self) -> bool {
        self.with_references
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
