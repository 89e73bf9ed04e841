//! Reflective value model for the kew Go literal generator.
//!
//! Rust has no runtime reflection, so the values kew dumps are described
//! explicitly: every [`Value`] carries a [`Type`] handle (kind, declared
//! name, package path, element types, method table) plus its data.
//!
//! # Architecture
//!
//! ```text
//! document (JSON/YAML/TOML) → kew-decode → kew-value (Value graph) → kew-dump → Go source
//! ```
//!
//! The model is designed to be:
//! - Shape-complete: every Go reflect kind has a [`Kind`] counterpart
//! - Identity-aware: [`Pointer`]s compare by address, so cycles are observable
//! - Self-contained (no external dependencies beyond std)

mod kind;
mod methods;
mod types;
mod value;

pub use kind::Kind;
pub use methods::{Method, MethodFn, Methods, Receiver};
pub use types::{Type, TypeRef};
pub use value::{Data, Field, Pointer, Value};
