use crate::adapters::xlsx::decode_workbook;
use crate::core::analyze::analyze_workbook;
use crate::core::report::ReportFormatter;
use crate::core::{ConfigProvider, Pipeline, ReconReport, Storage};
use crate::domain::sheet::Workbook;
use crate::utils::error::Result;

/// Reads one workbook, reconciles its two sheets and renders the report in
/// the configured format. Nothing is written back to storage.
pub struct WorkbookPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> WorkbookPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for WorkbookPipeline<S, C> {
    async fn extract(&self) -> Result<Workbook> {
        let source = self.config.workbook_source();
        let bytes = self.storage.read_file(source).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), source);
        decode_workbook(bytes)
    }

    async fn transform(&self, workbook: Workbook) -> Result<ReconReport> {
        analyze_workbook(&workbook, self.config.layout())
    }

    async fn load(&self, report: ReconReport) -> Result<String> {
        ReportFormatter::render(&report, self.config.output_format())
    }
}
