pub mod batch;
pub mod etl;
pub mod pipeline;
pub mod retriever;
pub mod species;

pub use crate::domain::model::{FruitQueryResult, SpeciesCollection, SpeciesRecord};
pub use crate::domain::ports::{ConfigProvider, GenerativeModel, Pipeline, Storage};
pub use crate::utils::error::Result;
