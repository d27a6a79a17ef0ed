pub mod workbook_pipeline;

pub use workbook_pipeline::WorkbookPipeline;
