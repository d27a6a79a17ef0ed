pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{decode_workbook, HttpStorage, LocalStorage, WorkbookStorage};
pub use app::pipelines::WorkbookPipeline;
pub use config::{layout::ReconLayout, RunConfig};
pub use core::{
    analyze::analyze_workbook, engine::ReconEngine, parser::TableParser,
    reconcile::ReconciliationEngine, report::ReportFormatter, session::ReconSession,
    validate::validate,
};
pub use utils::error::{ReconError, Result};
