//! Deterministic map key ordering.

use std::cmp::Ordering;

use kew_value::{Data, Value};

/// Sort position of a map key.
///
/// Keys of the same basic kind compare natively; anything else compares by
/// the text of its rendered literal.
#[derive(Debug, Clone)]
enum SortKey {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Text(String),
}

impl SortKey {
    fn new(key: &Value, render: &mut impl FnMut(&Value) -> String) -> Self {
        match key.unpack().data() {
            Data::Bool(b) => Self::Bool(*b),
            Data::Int(i) => Self::Int(*i),
            Data::Uint(u) => Self::Uint(*u),
            Data::Float(f) => Self::Float(*f),
            Data::String(s) => Self::Str(s.clone()),
            _ => Self::Text(render(key)),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) => 1,
            Self::Uint(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
            Self::Text(_) => 5,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Uint(a), Self::Uint(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Str(a), Self::Str(b)) | (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Order map entries by key. The sort is stable, so equal keys keep their
/// insertion order.
pub(crate) fn sort_entries(
    entries: &mut [&(Value, Value)],
    mut render: impl FnMut(&Value) -> String,
) {
    entries.sort_by_cached_key(|(key, _)| SortKey::new(key, &mut render));
}

#[cfg(test)]
mod tests {
    use kew_value::{Kind, Type};

    use super::*;

    fn keys(entries: &[&(Value, Value)]) -> Vec<String> {
        entries
            .iter()
            .map(|(key, _)| format!("{:?}", key.unpack().data()))
            .collect()
    }

    fn sorted(entries: &[(Value, Value)]) -> Vec<String> {
        let mut refs: Vec<_> = entries.iter().collect();
        sort_entries(&mut refs, |key| format!("{:?}", key.data()));
        keys(&refs)
    }

    #[test]
    fn test_strings_sort_lexically() {
        let entries = vec![
            (Value::string("b"), Value::int(2)),
            (Value::string("a"), Value::int(1)),
            (Value::string("B"), Value::int(0)),
        ];
        assert_eq!(
            sorted(&entries),
            vec![r#"String("B")"#, r#"String("a")"#, r#"String("b")"#]
        );
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let entries = vec![
            (Value::int(10), Value::bool(true)),
            (Value::int(-3), Value::bool(true)),
            (Value::int(2), Value::bool(true)),
        ];
        assert_eq!(sorted(&entries), vec!["Int(-3)", "Int(2)", "Int(10)"]);

        let floats = vec![
            (Value::float64(2.5), Value::bool(true)),
            (Value::float64(-1.0), Value::bool(true)),
        ];
        assert_eq!(sorted(&floats), vec!["Float(-1.0)", "Float(2.5)"]);
    }

    #[test]
    fn test_bools_false_first() {
        let entries = vec![
            (Value::bool(true), Value::int(1)),
            (Value::bool(false), Value::int(0)),
        ];
        assert_eq!(sorted(&entries), vec!["Bool(false)", "Bool(true)"]);
    }

    #[test]
    fn test_boxed_keys_are_unpacked() {
        let entries = vec![
            (Value::interface(Value::string("z")), Value::int(1)),
            (Value::interface(Value::string("y")), Value::int(2)),
        ];
        assert_eq!(sorted(&entries), vec![r#"String("y")"#, r#"String("z")"#]);
    }

    #[test]
    fn test_composite_keys_sort_by_rendering() {
        let point = Type::named(Kind::Struct, "main.Point", "");
        let at = |x: i64| Value::structure(point.clone(), [("X", Value::int(x))]);
        let entries = vec![(at(2), Value::int(0)), (at(1), Value::int(0))];

        let mut refs: Vec<_> = entries.iter().collect();
        sort_entries(&mut refs, |key| {
            format!("{:?}", key.field("X").and_then(Value::as_int))
        });

        let xs: Vec<_> = refs
            .iter()
            .map(|(key, _)| key.field("X").and_then(Value::as_int))
            .collect();
        assert_eq!(xs, vec![Some(1), Some(2)]);
    }
}
