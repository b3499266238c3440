//! Data models

pub mod status;
pub mod prediction;

pub use status::*;
pub use prediction::*;
