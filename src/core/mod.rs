pub mod analyze;
pub mod engine;
pub mod parser;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod validate;

pub use crate::domain::model::{Hierarchy, ReconReport, Reconciliation, RoomOutcome, RoomReport};
pub use crate::domain::ports::{CellGrid, ConfigProvider, OutputFormat, Pipeline, Storage};
pub use crate::utils::error::Result;
