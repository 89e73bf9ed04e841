//! Type descriptors.

use std::{fmt, rc::Rc};

use crate::{Kind, Methods};

/// Shared handle to a type descriptor.
pub type TypeRef = Rc<Type>;

/// Runtime type descriptor of a value.
///
/// Named types carry their package-qualified name (e.g. `v1.Pod`) and the
/// import path of the declaring package (e.g. `k8s.io/api/core/v1`).
/// Unnamed composite types derive their Go spelling from their element
/// types.
#[derive(Debug, Clone)]
pub struct Type {
    kind: Kind,
    name: Option<String>,
    pkg_path: Option<String>,
    elem: Option<TypeRef>,
    key: Option<TypeRef>,
    len: usize,
    methods: Methods,
}

impl Type {
    fn bare(kind: Kind) -> Self {
        Self {
            kind,
            name: None,
            pkg_path: None,
            elem: None,
            key: None,
            len: 0,
            methods: Methods::default(),
        }
    }

    /// A predeclared (unnamed) type of the given kind, e.g. `int64`.
    pub fn basic(kind: Kind) -> Self {
        Self::bare(kind)
    }

    /// A declared type, e.g. `Type::named(Kind::Struct, "v1.Pod", "k8s.io/api/core/v1")`.
    ///
    /// An empty `pkg_path` declares a type local to the output package.
    pub fn named(kind: Kind, name: impl Into<String>, pkg_path: impl Into<String>) -> Self {
        let pkg_path = pkg_path.into();
        Self {
            name: Some(name.into()),
            pkg_path: (!pkg_path.is_empty()).then_some(pkg_path),
            ..Self::bare(kind)
        }
    }

    pub fn invalid() -> Self {
        Self::bare(Kind::Invalid)
    }

    pub fn bool() -> Self {
        Self::bare(Kind::Bool)
    }

    pub fn int() -> Self {
        Self::bare(Kind::Int)
    }

    pub fn int64() -> Self {
        Self::bare(Kind::Int64)
    }

    pub fn uint() -> Self {
        Self::bare(Kind::Uint)
    }

    pub fn uint8() -> Self {
        Self::bare(Kind::Uint8)
    }

    pub fn uint64() -> Self {
        Self::bare(Kind::Uint64)
    }

    pub fn float32() -> Self {
        Self::bare(Kind::Float32)
    }

    pub fn float64() -> Self {
        Self::bare(Kind::Float64)
    }

    pub fn string() -> Self {
        Self::bare(Kind::String)
    }

    /// The empty interface, `interface {}`.
    pub fn interface() -> Self {
        Self::bare(Kind::Interface)
    }

    /// `[]elem`
    pub fn slice_of(elem: impl Into<TypeRef>) -> Self {
        Self::bare(Kind::Slice).with_elem(elem)
    }

    /// `[len]elem`
    pub fn array_of(elem: impl Into<TypeRef>, len: usize) -> Self {
        Self {
            len,
            ..Self::bare(Kind::Array).with_elem(elem)
        }
    }

    /// `map[key]elem`
    pub fn map_of(key: impl Into<TypeRef>, elem: impl Into<TypeRef>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::bare(Kind::Map).with_elem(elem)
        }
    }

    /// `*elem`
    pub fn ptr_to(elem: impl Into<TypeRef>) -> Self {
        Self::bare(Kind::Ptr).with_elem(elem)
    }

    /// `chan elem`
    pub fn chan_of(elem: impl Into<TypeRef>) -> Self {
        Self::bare(Kind::Chan).with_elem(elem)
    }

    /// Set the element type (for named slice, array, map, pointer or chan types).
    pub fn with_elem(mut self, elem: impl Into<TypeRef>) -> Self {
        self.elem = Some(elem.into());
        self
    }

    /// Set the key type (for named map types).
    pub fn with_key(mut self, key: impl Into<TypeRef>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the array length (for named array types).
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Attach a method table.
    pub fn with_methods(mut self, methods: Methods) -> Self {
        self.methods = methods;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Declared name, if this is a named type.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Import path of the declaring package, if any.
    pub fn pkg_path(&self) -> Option<&str> {
        self.pkg_path.as_deref()
    }

    pub fn elem(&self) -> Option<&TypeRef> {
        self.elem.as_ref()
    }

    pub fn key(&self) -> Option<&TypeRef> {
        self.key.as_ref()
    }

    /// Array length (zero for every other kind).
    pub fn array_len(&self) -> usize {
        self.len
    }

    pub fn methods(&self) -> &Methods {
        &self.methods
    }

    /// Returns true if this type was declared with a name.
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            return f.write_str(name);
        }
        let elem = |f: &mut fmt::Formatter<'_>| match &self.elem {
            Some(elem) => write!(f, "{}", elem),
            None => f.write_str("interface {}"),
        };
        match self.kind {
            Kind::Slice => {
                f.write_str("[]")?;
                elem(f)
            }
            Kind::Array => {
                write!(f, "[{}]", self.len)?;
                elem(f)
            }
            Kind::Ptr => {
                f.write_str("*")?;
                elem(f)
            }
            Kind::Chan => {
                f.write_str("chan ")?;
                elem(f)
            }
            Kind::Map => {
                match &self.key {
                    Some(key) => write!(f, "map[{}]", key)?,
                    None => f.write_str("map[interface {}]")?,
                }
                elem(f)
            }
            Kind::Func => f.write_str("func()"),
            Kind::Interface => f.write_str("interface {}"),
            Kind::Struct => f.write_str("struct {}"),
            kind => f.write_str(kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_strings() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::basic(Kind::Float32).to_string(), "float32");
        assert_eq!(Type::interface().to_string(), "interface {}");
    }

    #[test]
    fn test_composite_type_strings() {
        let pod = Type::named(Kind::Struct, "v1.Pod", "k8s.io/api/core/v1");
        assert_eq!(Type::slice_of(pod.clone()).to_string(), "[]v1.Pod");
        assert_eq!(Type::ptr_to(pod.clone()).to_string(), "*v1.Pod");
        assert_eq!(Type::array_of(Type::uint8(), 4).to_string(), "[4]uint8");
        assert_eq!(
            Type::map_of(Type::string(), Type::interface()).to_string(),
            "map[string]interface {}"
        );
        assert_eq!(Type::chan_of(Type::int()).to_string(), "chan int");
    }

    #[test]
    fn test_named_type() {
        let ty = Type::named(Kind::Slice, "json.RawMessage", "encoding/json").with_elem(Type::uint8());
        assert_eq!(ty.to_string(), "json.RawMessage");
        assert_eq!(ty.pkg_path(), Some("encoding/json"));
        assert_eq!(ty.elem().map(|e| e.kind()), Some(Kind::Uint8));
        assert!(ty.is_named());
    }

    #[test]
    fn test_local_named_type_has_no_package() {
        let ty = Type::named(Kind::Struct, "Config", "");
        assert_eq!(ty.pkg_path(), None);
        assert_eq!(ty.to_string(), "Config");
    }
}
