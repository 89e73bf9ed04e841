//! Literal-rendering overrides for well-known value types.

use kew_value::{Type, Value};

use crate::{Dependencies, is_zero};

/// A pluggable literal override.
///
/// Rules are consulted in order before a value's type name is written; the
/// first rule returning text replaces the whole literal, type included.
pub trait LiteralRule: std::fmt::Debug + Send + Sync {
    /// Render `value` as a complete literal expression, recording any
    /// package the expression refers to, or return `None` to fall through.
    fn render(&self, value: &Value, deps: &mut Dependencies) -> Option<String>;
}

/// Renders a declared type through a parsing constructor fed with its JSON
/// marshaling, e.g. `resource.MustParse("500m")`.
///
/// Zero values and values without a `MarshalJSON` capability are left to
/// the generic struct rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorRule {
    /// Declared type name to match, e.g. `resource.Quantity`.
    pub type_name: String,
    /// Constructor to call, e.g. `resource.MustParse`.
    pub constructor: String,
    /// Import path the constructor lives in.
    pub path: String,
}

impl ConstructorRule {
    pub fn new(
        type_name: impl Into<String>,
        constructor: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            constructor: constructor.into(),
            path: path.into(),
        }
    }

    /// `resource.Quantity` → `resource.MustParse(<json>)`.
    pub fn quantity() -> Self {
        Self::new(
            "resource.Quantity",
            "resource.MustParse",
            "k8s.io/apimachinery/pkg/api/resource",
        )
    }

    fn matches(&self, ty: &Type) -> bool {
        ty.name() == Some(self.type_name.as_str())
    }
}

impl LiteralRule for ConstructorRule {
    fn render(&self, value: &Value, deps: &mut Dependencies) -> Option<String> {
        if !self.matches(value.ty()) || is_zero(value) {
            return None;
        }
        let marshal = value.ty().methods().marshal_json?;
        let Some(json) = marshal.invoke(value, false) else {
            tracing::warn!(ty = %value.ty(), "MarshalJSON failed, rendering fields");
            return None;
        };
        deps.add(&self.path, None);
        Some(format!("{}({})", self.constructor, json))
    }
}

#[cfg(test)]
mod tests {
    use kew_value::{Kind, Method, Methods};

    use super::*;

    fn marshal_quantity(value: &Value) -> Option<String> {
        value
            .field("s")
            .and_then(Value::as_str)
            .map(kew_core::quote)
    }

    fn quantity(s: &str) -> Value {
        let ty = Type::named(
            Kind::Struct,
            "resource.Quantity",
            "k8s.io/apimachinery/pkg/api/resource",
        )
        .with_methods(Methods::new().with_marshal_json(Method::on_value(marshal_quantity)));
        Value::structure(ty, [("s", Value::string(s))])
    }

    #[test]
    fn test_quantity_rendered_through_constructor() {
        let mut deps = Dependencies::new();
        let text = ConstructorRule::quantity().render(&quantity("500m"), &mut deps);

        assert_eq!(text.as_deref(), Some(r#"resource.MustParse("500m")"#));
        assert!(deps.contains("k8s.io/apimachinery/pkg/api/resource"));
    }

    #[test]
    fn test_zero_quantity_falls_through() {
        let mut deps = Dependencies::new();
        assert_eq!(ConstructorRule::quantity().render(&quantity(""), &mut deps), None);
        assert!(deps.is_empty());
    }

    #[test]
    fn test_other_types_fall_through() {
        let mut deps = Dependencies::new();
        let other = Value::structure(
            Type::named(Kind::Struct, "main.Quantity", ""),
            [("s", Value::string("1"))],
        );
        assert_eq!(ConstructorRule::quantity().render(&other, &mut deps), None);
    }

    #[test]
    fn test_missing_marshaler_falls_through() {
        let mut deps = Dependencies::new();
        let bare = Value::structure(
            Type::named(
                Kind::Struct,
                "resource.Quantity",
                "k8s.io/apimachinery/pkg/api/resource",
            ),
            [("s", Value::string("1"))],
        );
        assert_eq!(ConstructorRule::quantity().render(&bare, &mut deps), None);
        assert!(deps.is_empty());
    }
}
