use crate::core::batch::BatchWriter;
use crate::core::retriever::{InformationRetriever, RetrievalOutcome};
use crate::core::species::{extract_common_names, CommonNameIndex};
use crate::domain::model::{FruitQueryResult, SpeciesCollection};
use crate::domain::ports::{GenerativeModel, Pipeline, Storage};
use crate::utils::error::Result;

/// Researches fruits from a loaded species collection and writes the answers in batches.
pub struct FruitPipeline<S: Storage, M: GenerativeModel> {
    species: SpeciesCollection,
    index: CommonNameIndex,
    retriever: InformationRetriever<M>,
    writer: BatchWriter<S>,
    batch_size: usize,
}

impl<S: Storage, M: GenerativeModel> FruitPipeline<S, M> {
    pub fn new(
        species: SpeciesCollection,
        retriever: InformationRetriever<M>,
        writer: BatchWriter<S>,
        batch_size: usize,
    ) -> Self {
        let index = CommonNameIndex::build(&species);
        tracing::debug!("Indexed {} distinct vernacular names", index.len());
        Self {
            species,
            index,
            retriever,
            writer,
            batch_size: batch_size.max(1),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, M: GenerativeModel> Pipeline for FruitPipeline<S, M> {
    async fn extract(&self) -> Result<Vec<String>> {
        let names = extract_common_names(&self.species);
        tracing::info!(
            "🍎 Extracted {} common names from {} species",
            names.len(),
            self.species.len()
        );
        Ok(names)
    }

    async fn transform(&self, group: &[String]) -> Vec<FruitQueryResult> {
        let mut results = Vec::with_capacity(group.len());

        for name in group {
            let Some(species) = self.index.get(name, &self.species) else {
                tracing::info!("No species found for '{}'", name);
                continue;
            };

            let scientific_name = species.scientific_name_or_default();
            tracing::info!("🔎 Researching '{}' ({})...", name, scientific_name);

            match self.retriever.retrieve(scientific_name, name).await {
                RetrievalOutcome::Found(result) => {
                    tracing::debug!(
                        "Model answered for '{}' as {:?} ({:?})",
                        name,
                        result.fruit(),
                        result.scientific_name()
                    );
                    results.push(result);
                }
                RetrievalOutcome::Failed(_) => {
                    tracing::info!("No result for '{}'", name);
                }
            }
        }

        results
    }

    async fn load(&self, results: &[FruitQueryResult], batch_index: usize) -> Result<String> {
        self.writer.write_batch(results, batch_index).await
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}
