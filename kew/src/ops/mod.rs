//! Core operations.
//!
//! Business logic for kew commands, separated from CLI argument parsing
//! and output rendering.

pub mod dump;

pub use dump::{Document, DumpOptions, dump};
