//! REIA Core Library
//!
//! Domain model, formatting helpers, and the session snapshot store for the
//! Real-Estate Investment Analyzer client.

pub mod error;
pub mod format;
pub mod report;
pub mod snapshot;

pub use error::{ReiaError, ReiaResult};
pub use report::{Analysis, AnalysisReport};
pub use snapshot::SnapshotStore;
