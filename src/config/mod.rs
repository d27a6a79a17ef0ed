#[cfg(feature = "cli")]
pub mod cli;
pub mod layout;

use crate::domain::ports::{ConfigProvider, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_source, Validate};
use layout::ReconLayout;

/// Fully resolved settings for one reconciliation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workbook: String,
    pub layout: ReconLayout,
    pub format: OutputFormat,
}

impl RunConfig {
    pub fn new(workbook: impl Into<String>) -> Self {
        Self {
            workbook: workbook.into(),
            layout: ReconLayout::default(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_layout(mut self, layout: ReconLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl ConfigProvider for RunConfig {
    fn workbook_source(&self) -> &str {
        &self.workbook
    }

    fn layout(&self) -> &ReconLayout {
        &self.layout
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_source("workbook", &self.workbook)?;
        self.layout.validate()
    }
}
