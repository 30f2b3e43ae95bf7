use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order and returns the written
    /// paths. Files written before a failing write are left in place.
    pub async fn run(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        tracing::info!("Starting funscript split");

        tracing::info!("Extracting input document...");
        let document = self.pipeline.extract().await?;
        tracing::info!("Extracted {} top-level keys", document.entries.len());

        tracing::info!("Building funscripts...");
        let result = self.pipeline.transform(document).await?;
        if !result.missing_keys.is_empty() {
            tracing::warn!(
                "Missing keys written as null actions: {}",
                result.missing_keys.join(", ")
            );
        }

        tracing::info!("Writing {} funscripts...", result.scripts.len());
        let written = self.pipeline.load(result).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        tracing::info!("Finished in {:?}", started.elapsed());
        Ok(written)
    }
}
