//! Report module - summarizing cleaning results

pub mod quality;
pub mod removal_report;
pub mod summary;

pub use quality::*;
pub use removal_report::*;
pub use summary::*;
