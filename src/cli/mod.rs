//! The argq binary
//!
//! This module parses the binary's own command line with the library,
//! loads a command table and reports what a command line means under it.

pub mod app;

// Re-export main types
pub use app::*;
