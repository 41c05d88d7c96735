use crate::core::batch::partition;
use crate::core::Pipeline;
use crate::utils::error::Result;

/// What a run did. Item and batch failures are counted here instead of aborting the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub names_extracted: usize,
    pub groups_processed: usize,
    pub items_succeeded: usize,
    pub items_skipped: usize,
    pub batches_written: Vec<String>,
    pub batches_failed: Vec<usize>,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Groups are processed strictly in order; nothing is carried from one group to the next.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting fruit research run");

        let names = self.pipeline.extract().await?;
        let groups = partition(&names, self.pipeline.batch_size());

        let mut report = RunReport {
            names_extracted: names.len(),
            ..Default::default()
        };
        tracing::info!(
            "📋 {} names in {} groups of up to {}",
            names.len(),
            groups.len(),
            self.pipeline.batch_size()
        );

        for (i, group) in groups.into_iter().enumerate() {
            let batch_index = i + 1;
            tracing::debug!("Processing group {}: {:?}", batch_index, group);

            let results = self.pipeline.transform(group).await;
            report.groups_processed += 1;
            report.items_succeeded += results.len();
            report.items_skipped += group.len() - results.len();

            if results.is_empty() {
                tracing::info!("Group {} produced no results, nothing written", batch_index);
                continue;
            }

            match self.pipeline.load(&results, batch_index).await {
                Ok(path) => report.batches_written.push(path),
                Err(e) => {
                    tracing::error!(
                        "❌ Failed to write batch {}: {} (Suggestion: {})",
                        batch_index,
                        e,
                        e.recovery_suggestion()
                    );
                    report.batches_failed.push(batch_index);
                }
            }
        }

        tracing::info!(
            "✅ Run finished: {} researched, {} skipped, {} batches written, {} batches failed",
            report.items_succeeded,
            report.items_skipped,
            report.batches_written.len(),
            report.batches_failed.len()
        );

        Ok(report)
    }
}
