//! Tax arithmetic and amount formatting

pub mod gst;
pub mod words;

pub use gst::*;
pub use words::*;
