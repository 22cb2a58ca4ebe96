//! parkclean: Parking Citation Cleaning Library
//!
//! Normalizes raw parking-citation records into an analysis-ready table
//! through a fixed sequence of stages, tracking every removed row and why.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
