//! Renders arbitrary value graphs as compilable Go literals.
//!
//! This crate is the engine behind kew: given [`kew_value::Value`]s it
//! writes Go source declaring one literal per value, plus the import block
//! the literals need.
//!
//! # Module Organization
//!
//! - [`Session`] - the driver: one fresh dumper per value, merged imports
//! - [`Config`] - indentation, key ordering, depth limit, stringers, rules
//! - [`NamingRule`] / [`LiteralRule`] - pluggable type renaming and literal overrides
//! - [`TypeNamer`] - spells types and records the packages they come from
//! - [`Dependencies`] - the ordered import set
//! - [`is_zero`] - zero-value detection used to elide struct fields
//!
//! # Example
//!
//! ```
//! use kew_dump::sdump;
//! use kew_value::{Kind, Type, Value};
//!
//! let item = Type::named(Kind::Struct, "main.Item", "");
//! let value = Value::structure(item, [("Name", Value::string("x")), ("Count", Value::int(0))]);
//!
//! assert_eq!(sdump(&[value]), "var _ = main.Item{\n\tName: \"x\",\n}\n");
//! ```

mod bytes;
mod config;
mod cycle;
mod dumper;
mod error;
mod imports;
mod literal;
mod naming;
mod rules;
mod session;
mod sort;
mod zero;

pub use config::Config;
pub use error::{Error, Result};
pub use imports::Dependencies;
pub use naming::{NamingRule, Rename, TypeNamer, VersionedPackage};
pub use rules::{ConstructorRule, LiteralRule};
pub use session::{Output, Session, fdump, sdump};
pub use zero::is_zero;
