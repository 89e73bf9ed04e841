use std::sync::Arc;

use kew_core::Indent;

use crate::{ConstructorRule, LiteralRule, NamingRule, VersionedPackage};

/// Options controlling how values are rendered.
///
/// A config is immutable once handed to a [`Session`](crate::Session);
/// build it with [`Config::new`] or [`Config::default`] and the `with_*`
/// methods.
///
/// # Example
///
/// ```
/// use kew_core::Indent;
/// use kew_dump::Config;
///
/// let config = Config::new("fixtures")
///     .with_indent(Indent::TWO_SPACES)
///     .with_sort_keys(true)
///     .with_max_depth(8);
///
/// assert_eq!(config.package.as_deref(), Some("fixtures"));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Unit written once per nesting level.
    pub indent: Indent,
    /// Emit map entries in a deterministic key order.
    pub sort_keys: bool,
    /// Maximum nesting of brace blocks; 0 means unlimited.
    pub max_depth: usize,
    /// Render values through their `Error()`/`String()` methods when they have one.
    pub invoke_stringers: bool,
    /// Package clause written at the top of the output.
    pub package: Option<String>,
    /// Renaming rules for declared types, consulted in order.
    pub naming_rules: Vec<Arc<dyn NamingRule>>,
    /// Literal overrides, consulted in order.
    pub literal_rules: Vec<Arc<dyn LiteralRule>>,
}

impl Config {
    /// Default options with a package clause.
    pub fn new(package: impl Into<String>) -> Self {
        Self::default().with_package(package)
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_stringers(mut self, invoke_stringers: bool) -> Self {
        self.invoke_stringers = invoke_stringers;
        self
    }

    /// Set the package clause; an empty name removes it.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        let package = package.into();
        self.package = (!package.is_empty()).then_some(package);
        self
    }

    /// Append a naming rule after the existing ones.
    pub fn with_naming_rule(mut self, rule: impl NamingRule + 'static) -> Self {
        self.naming_rules.push(Arc::new(rule));
        self
    }

    /// Append a literal rule after the existing ones.
    pub fn with_literal_rule(mut self, rule: impl LiteralRule + 'static) -> Self {
        self.literal_rules.push(Arc::new(rule));
        self
    }

    /// Drop all naming and literal rules, spelling every type verbatim.
    pub fn without_rules(mut self) -> Self {
        self.naming_rules.clear();
        self.literal_rules.clear();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            sort_keys: false,
            max_depth: 0,
            invoke_stringers: false,
            package: None,
            naming_rules: vec![Arc::new(VersionedPackage::new())],
            literal_rules: vec![Arc::new(ConstructorRule::quantity())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.indent, Indent::Tab);
        assert!(!config.sort_keys);
        assert_eq!(config.max_depth, 0);
        assert!(!config.invoke_stringers);
        assert_eq!(config.package, None);
        assert_eq!(config.naming_rules.len(), 1);
        assert_eq!(config.literal_rules.len(), 1);
    }

    #[test]
    fn test_empty_package_is_none() {
        assert_eq!(Config::new("").package, None);
        assert_eq!(Config::new("k8s").package.as_deref(), Some("k8s"));
    }

    #[test]
    fn test_without_rules() {
        let config = Config::default().without_rules();
        assert!(config.naming_rules.is_empty());
        assert!(config.literal_rules.is_empty());
    }
}
