use crate::adapters::gemini::{API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::core::batch::DEFAULT_FILE_PATTERN;
use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_species_file")]
    pub species_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub name: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Usually `"${GOOGLE_API_KEY}"`; falls back to that variable when omitted.
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub include_references: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
}

fn default_species_file() -> String {
    "species.json".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_batch_size() -> usize {
    3
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            species_file: default_species_file(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_base_url: default_api_base_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            include_references: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            batch_size: default_batch_size(),
            file_pattern: default_file_pattern(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if config.model.api_key.is_none() {
            config.model.api_key = std::env::var(API_KEY_ENV).ok();
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${GOOGLE_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn species_file(&self) -> &str {
        &self.input.species_file
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn batch_size(&self) -> usize {
        self.output.batch_size
    }

    fn file_pattern(&self) -> &str {
        &self.output.file_pattern
    }

    fn model_name(&self) -> &str {
        &self.model.name
    }

    fn api_base_url(&self) -> &str {
        &self.model.api_base_url
    }

    fn api_key(&self) -> Option<&str> {
        self.model.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.model.timeout_seconds
    }

    fn include_references(&self) -> bool {
        self.model.include_references
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        super::validate_provider(self)
    }
}
