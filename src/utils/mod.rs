//! Utility modules

pub mod json_storage;
pub mod memory_storage;
pub mod parse;
pub mod validation;

pub use json_storage::*;
pub use memory_storage::*;
pub use parse::*;
pub use validation::*;
