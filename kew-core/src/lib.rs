//! Core utilities and types for the kew Go literal generator.
//!
//! This crate provides the small building blocks shared by the dumper and
//! the command-line tool: indentation settings, Go literal spelling and
//! generated-file writing.

mod file;
mod go;
mod indent;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult, GENERATED_HEADER};
// Go source spelling
pub use go::{GO_KEYWORDS, is_identifier, quote, quote_bytes, raw_string};
pub use indent::{Indent, MAX_SPACES, ParseIndentError};
