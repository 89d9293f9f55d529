//! Declarative command tables
//!
//! This module handles parsing of argq.yml command tables, their
//! validation, and turning them into command trees.

pub mod build;
pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use build::*;
pub use parse::*;
pub use schema::*;
pub use types::*;
