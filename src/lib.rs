//! autolysis: quick exploratory analysis of a CSV file
//!
//! Loads a dataset, keeps the columns whose distinct-value ratio makes them
//! worth looking at, renders up to two charts and writes a Markdown report.

pub mod cli;
pub mod config;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod utils;

pub use config::AnalysisConfig;
