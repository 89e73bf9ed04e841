//! Import collection for emitted literals.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static VENDOR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*/vendor/").expect("valid vendor regex"));

/// Packages the emitted literals depend on, with optional import aliases.
///
/// Maintains insertion order; the first alias recorded for a path wins.
///
/// # Example
///
/// ```
/// use kew_dump::Dependencies;
///
/// let mut deps = Dependencies::new();
/// deps.add("k8s.io/api/core/v1", Some("corev1"));
/// deps.add("k8s.io/api/core/v1", None);
/// deps.add("github.com/acme/app/vendor/k8s.io/api/apps/v1", Some("appsv1"));
///
/// assert_eq!(deps.alias("k8s.io/api/core/v1"), Some("corev1"));
/// assert!(deps.contains("k8s.io/api/apps/v1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Import path -> alias
    imports: IndexMap<String, Option<String>>,
}

impl Dependencies {
    /// Create an empty dependency set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a package. Re-adding a known path has no effect.
    ///
    /// Any `.../vendor/` prefix is stripped; empty paths are ignored.
    pub fn add(&mut self, path: &str, alias: Option<&str>) {
        let path = VENDOR_PREFIX.replace(path, "");
        if path.is_empty() || self.imports.contains_key(path.as_ref()) {
            return;
        }
        tracing::debug!(path = %path, alias, "recorded dependency");
        self.imports
            .insert(path.into_owned(), alias.map(str::to_string));
    }

    /// Merge another set into this one; existing aliases are kept.
    pub fn merge(&mut self, other: &Dependencies) {
        for (path, alias) in &other.imports {
            self.imports
                .entry(path.clone())
                .or_insert_with(|| alias.clone());
        }
    }

    /// Check if a package is recorded.
    pub fn contains(&self, path: &str) -> bool {
        self.imports.contains_key(path)
    }

    /// Alias recorded for a package, if any.
    pub fn alias(&self, path: &str) -> Option<&str> {
        self.imports.get(path).and_then(|alias| alias.as_deref())
    }

    /// Iterate over all packages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.imports
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_deref()))
    }

    /// Packages sorted by path for deterministic output.
    pub fn sorted(&self) -> Vec<(&str, Option<&str>)> {
        let mut imports: Vec<_> = self.iter().collect();
        imports.sort_by_key(|(path, _)| *path);
        imports
    }

    /// Render a Go import block, or an empty string when there is nothing to import.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::from("import (");
        for (path, alias) in self.sorted() {
            out.push_str("\n\t");
            if let Some(alias) = alias {
                out.push_str(alias);
                out.push(' ');
            }
            out.push_str(&kew_core::quote(path));
        }
        out.push_str("\n)\n\n");
        out
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of packages.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}
