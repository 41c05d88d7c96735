pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, LogFormat};
pub use crate::config::toml_config::TomlConfig;

pub use crate::adapters::{gemini::GeminiClient, storage::LocalStorage};
pub use crate::core::{
    batch::BatchWriter,
    etl::{EtlEngine, RunReport},
    pipeline::FruitPipeline,
    retriever::{InformationRetriever, RetrievalOutcome},
};
pub use crate::domain::model::{FruitQueryResult, SpeciesRecord};
pub use crate::utils::error::{EtlError, Result};
