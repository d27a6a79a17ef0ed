// Adapters layer: concrete implementations for external systems (workbook decoding, storage).

pub mod storage;
pub mod xlsx;

pub use storage::{HttpStorage, LocalStorage, WorkbookStorage};
pub use xlsx::decode_workbook;
