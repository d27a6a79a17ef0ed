use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReconEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReconEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs one extract → transform → load pass and returns the rendered report.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting reconciliation...");

        // Extract
        let workbook = self.pipeline.extract().await?;
        tracing::info!("Loaded workbook with {} sheet(s)", workbook.len());

        // Transform
        let report = self.pipeline.transform(workbook).await?;
        tracing::info!(
            "Compared {} room(s), overall status {}",
            report.rooms.len(),
            report.status
        );

        // Load
        let rendered = self.pipeline.load(report).await?;
        tracing::debug!("Rendered report ({} bytes)", rendered.len());

        Ok(rendered)
    }
}
