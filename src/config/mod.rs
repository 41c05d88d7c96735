#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_api_key, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url,
};

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("species_file", config.species_file())?;
    validate_path("output_path", config.output_path())?;
    validate_positive_number("batch_size", config.batch_size(), 1)?;
    validate_non_empty_string("model", config.model_name())?;
    validate_url("api_base_url", config.api_base_url())?;
    validate_positive_number("timeout_seconds", config.timeout_seconds() as usize, 1)?;

    if !config.file_pattern().contains("{index}") {
        return Err(EtlError::InvalidConfigValueError {
            field: "file_pattern".to_string(),
            value: config.file_pattern().to_string(),
            reason: "Pattern must contain {index} so batch files do not overwrite each other"
                .to_string(),
        });
    }

    validate_api_key("api_key", config.api_key())
}
