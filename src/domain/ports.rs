use crate::config::layout::ReconLayout;
use crate::domain::model::ReconReport;
use crate::domain::sheet::{Column, SheetRange, Workbook};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to a 2-D grid with a declared occupied range.
pub trait CellGrid {
    fn occupied_range(&self) -> Option<SheetRange>;
    fn cell(&self, column: Column, row: u32) -> Option<&str>;
}

/// Where workbook bytes come from. Reading is the only await point of a run.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    fn workbook_source(&self) -> &str;
    fn layout(&self) -> &ReconLayout;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Workbook>;
    async fn transform(&self, workbook: Workbook) -> Result<ReconReport>;
    async fn load(&self, report: ReconReport) -> Result<String>;
}
