//! Invoice lifecycle and search

pub mod book;
pub mod filter;

pub use book::*;
pub use filter::*;
