//! Decodes JSON, YAML and TOML documents into [`kew_value::Value`] graphs.
//!
//! Documents come out shaped the way a Go program decoding into
//! `interface {}` would see them: objects become `map[string]interface {}`,
//! arrays `[]interface {}`, numbers `int` or `float64`, and null a nil
//! interface.
//!
//! ```
//! use kew_decode::{Format, decode_str};
//!
//! let docs = decode_str("kind: Pod\n---\nkind: Service\n", "pods.yaml", Format::Yaml).unwrap();
//! assert_eq!(docs.len(), 2);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod decode;
mod error;
mod format;

pub use decode::{decode_file, decode_str};
pub use error::{Error, Result, SourceContext};
pub use format::Format;
