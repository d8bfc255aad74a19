//! Pipeline module - loading, column selection and the end-to-end run

pub mod analysis;
pub mod loader;
pub mod selector;

pub use analysis::*;
pub use loader::*;
pub use selector::*;
