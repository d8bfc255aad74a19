//! Report module - Markdown report and console profile

pub mod profile;
pub mod readme;

pub use profile::*;
pub use readme::*;
