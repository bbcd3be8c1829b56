//! AnvilGUI Core - Fundamental types and utilities

mod error;
mod types;
mod idgen;
mod version;

pub use error::*;
pub use types::*;
pub use idgen::*;
pub use version::*;
