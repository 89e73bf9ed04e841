//! Type naming: the literal spelling of a type plus the imports it needs.

use std::{fmt, sync::Arc};

use kew_value::{Kind, Type, TypeRef};
use regex::Regex;

use crate::Dependencies;

/// A pluggable renaming rule for declared types.
///
/// Rules are consulted in order for every named type the dumper spells;
/// the first rule returning a [`Rename`] wins.
pub trait NamingRule: fmt::Debug + Send + Sync {
    /// Rename a declared type, or return `None` to leave it alone.
    fn rename(&self, ty: &Type) -> Option<Rename>;
}

/// Outcome of a [`NamingRule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Literal type name, e.g. `corev1.Pod`.
    pub name: String,
    /// Import path of the owning package.
    pub path: String,
    /// Import alias matching the rewritten qualifier.
    pub alias: Option<String>,
}

/// Disambiguates versioned API packages by their parent directory.
///
/// Many API groups publish a package named `v1`; the type `v1.Pod` from
/// `k8s.io/api/core/v1` is spelled `corev1.Pod` and imported as
/// `corev1 "k8s.io/api/core/v1"`.
#[derive(Debug, Clone)]
pub struct VersionedPackage {
    version: Regex,
}

impl VersionedPackage {
    /// Matches `v1`, `v2`, `v1beta1`, `v1alpha3`, ...
    pub const DEFAULT_PATTERN: &'static str = r"^v\d+((alpha|beta)\d+)?$";

    pub fn new() -> Self {
        Self {
            version: Regex::new(Self::DEFAULT_PATTERN).expect("valid version regex"),
        }
    }

    /// Use a custom pattern for the package qualifier.
    pub fn with_pattern(version: Regex) -> Self {
        Self { version }
    }
}

impl Default for VersionedPackage {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingRule for VersionedPackage {
    fn rename(&self, ty: &Type) -> Option<Rename> {
        let name = ty.name()?;
        let path = ty.pkg_path()?;
        let (qualifier, local) = name.split_once('.')?;
        if !self.version.is_match(qualifier) {
            return None;
        }
        let (parent, _) = path.rsplit_once('/')?;
        let group: String = parent
            .rsplit('/')
            .next()?
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if group.is_empty() {
            return None;
        }
        let alias = format!("{}{}", group, qualifier);
        Some(Rename {
            name: format!("{}.{}", alias, local),
            path: path.to_string(),
            alias: Some(alias),
        })
    }
}

/// Spells types for literals, recording the packages they come from.
#[derive(Debug, Clone, Copy)]
pub struct TypeNamer<'a> {
    rules: &'a [Arc<dyn NamingRule>],
}

impl<'a> TypeNamer<'a> {
    pub fn new(rules: &'a [Arc<dyn NamingRule>]) -> Self {
        Self { rules }
    }

    /// Literal name of `ty`; every package it mentions is added to `deps`.
    pub fn name(&self, ty: &Type, deps: &mut Dependencies) -> String {
        if ty.is_named() {
            return self.declared(ty, deps);
        }
        match ty.kind() {
            Kind::Slice => format!("[]{}", self.part(ty.elem(), deps)),
            Kind::Array => format!("[{}]{}", ty.array_len(), self.part(ty.elem(), deps)),
            Kind::Ptr => format!("*{}", self.part(ty.elem(), deps)),
            Kind::Chan => format!("chan {}", self.part(ty.elem(), deps)),
            Kind::Map => {
                let key = self.part(ty.key(), deps);
                format!("map[{}]{}", key, self.part(ty.elem(), deps))
            }
            _ => ty.to_string(),
        }
    }

    fn part(&self, ty: Option<&TypeRef>, deps: &mut Dependencies) -> String {
        match ty {
            Some(ty) => self.name(ty, deps),
            None => "interface {}".to_string(),
        }
    }

    fn declared(&self, ty: &Type, deps: &mut Dependencies) -> String {
        if let Some(rename) = self.rules.iter().find_map(|rule| rule.rename(ty)) {
            deps.add(&rename.path, rename.alias.as_deref());
            return rename.name;
        }
        if let Some(path) = ty.pkg_path() {
            deps.add(path, None);
        }
        ty.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rules() -> Vec<Arc<dyn NamingRule>> {
        vec![Arc::new(VersionedPackage::new())]
    }

    fn pod() -> Type {
        Type::named(Kind::Struct, "v1.Pod", "k8s.io/api/core/v1")
    }

    #[test]
    fn test_versioned_package_renamed() {
        let rules = default_rules();
        let mut deps = Dependencies::new();
        let name = TypeNamer::new(&rules).name(&pod(), &mut deps);

        assert_eq!(name, "corev1.Pod");
        assert_eq!(deps.alias("k8s.io/api/core/v1"), Some("corev1"));
    }

    #[test]
    fn test_beta_versions_renamed() {
        let rules = default_rules();
        let mut deps = Dependencies::new();
        let crd = Type::named(
            Kind::Struct,
            "v1beta1.CustomResourceDefinition",
            "k8s.io/apiextensions-apiserver/pkg/apis/apiextensions/v1beta1",
        );
        let name = TypeNamer::new(&rules).name(&crd, &mut deps);

        assert_eq!(name, "apiextensionsv1beta1.CustomResourceDefinition");
        assert_eq!(
            deps.alias("k8s.io/apiextensions-apiserver/pkg/apis/apiextensions/v1beta1"),
            Some("apiextensionsv1beta1")
        );
    }

    #[test]
    fn test_rename_applies_inside_composites() {
        let rules = default_rules();
        let namer = TypeNamer::new(&rules);
        let mut deps = Dependencies::new();

        assert_eq!(namer.name(&Type::slice_of(pod()), &mut deps), "[]corev1.Pod");
        assert_eq!(namer.name(&Type::ptr_to(pod()), &mut deps), "*corev1.Pod");
        assert_eq!(
            namer.name(&Type::map_of(Type::string(), pod()), &mut deps),
            "map[string]corev1.Pod"
        );
        assert_eq!(deps.len(), 1);
    }

    #[test]
    fn test_plain_package_recorded_without_alias() {
        let rules = default_rules();
        let mut deps = Dependencies::new();
        let quantity = Type::named(
            Kind::Struct,
            "resource.Quantity",
            "k8s.io/apimachinery/pkg/api/resource",
        );
        let name = TypeNamer::new(&rules).name(&quantity, &mut deps);

        assert_eq!(name, "resource.Quantity");
        assert!(deps.contains("k8s.io/apimachinery/pkg/api/resource"));
        assert_eq!(deps.alias("k8s.io/apimachinery/pkg/api/resource"), None);
    }

    #[test]
    fn test_unnamed_and_local_types_need_no_imports() {
        let rules = default_rules();
        let namer = TypeNamer::new(&rules);
        let mut deps = Dependencies::new();

        assert_eq!(
            namer.name(&Type::map_of(Type::string(), Type::interface()), &mut deps),
            "map[string]interface {}"
        );
        assert_eq!(
            namer.name(&Type::named(Kind::Struct, "Config", ""), &mut deps),
            "Config"
        );
        assert!(deps.is_empty());
    }

    #[test]
    fn test_version_without_parent_dir_left_alone() {
        let rule = VersionedPackage::new();
        let ty = Type::named(Kind::Struct, "v1.Thing", "v1");
        assert_eq!(rule.rename(&ty), None);
    }

    #[test]
    fn test_without_rules_names_are_verbatim() {
        let rules: Vec<Arc<dyn NamingRule>> = Vec::new();
        let mut deps = Dependencies::new();
        let name = TypeNamer::new(&rules).name(&pod(), &mut deps);

        assert_eq!(name, "v1.Pod");
        assert_eq!(deps.alias("k8s.io/api/core/v1"), None);
        assert!(deps.contains("k8s.io/api/core/v1"));
    }
}
