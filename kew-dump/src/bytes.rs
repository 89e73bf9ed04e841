//! Byte-block detection for slices and arrays.

use std::sync::LazyLock;

use kew_value::{Data, Kind, Type, Value};
use regex::Regex;

/// cgo character types, converted element by element.
static CGO_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\._Ctype_(char|unsignedchar|uint8_t)$").expect("valid cgo regex")
});

/// Returns true if a sequence of `elem` renders as a byte block.
pub(crate) fn is_byte_like(elem: &Type) -> bool {
    elem.kind() == Kind::Uint8 || is_cgo_char(elem)
}

pub(crate) fn is_cgo_char(elem: &Type) -> bool {
    CGO_CHAR.is_match(&elem.to_string())
}

/// Collect the bytes of a byte-like sequence.
///
/// Returns `None` when `elem` is not byte-like or an item cannot be
/// converted to a byte; the caller then renders the items one by one.
pub(crate) fn collect(elem: &Type, items: &[Value]) -> Option<Vec<u8>> {
    if !is_byte_like(elem) {
        return None;
    }
    let mut buf = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        // Conversions truncate like Go's `uint8(x)`.
        let byte = match item.unpack().data() {
            Data::Uint(u) => *u as u8,
            Data::Int(i) => *i as u8,
            _ => {
                tracing::warn!(
                    elem = %elem,
                    index,
                    "byte-like element is not an integer, rendering items"
                );
                return None;
            }
        };
        buf.push(byte);
    }
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_char() -> Type {
        Type::named(Kind::Int8, "main._Ctype_char", "")
    }

    #[test]
    fn test_uint8_is_byte_like() {
        assert!(is_byte_like(&Type::uint8()));
        assert!(is_byte_like(&Type::named(Kind::Uint8, "main.Octet", "")));
        assert!(!is_byte_like(&Type::int()));
        assert!(!is_byte_like(&Type::basic(Kind::Uint16)));
    }

    #[test]
    fn test_cgo_chars_are_byte_like() {
        assert!(is_byte_like(&c_char()));
        assert!(is_byte_like(&Type::named(Kind::Uint8, "main._Ctype_uint8_t", "")));
        assert!(!is_byte_like(&Type::named(Kind::Int8, "main._Ctype_short", "")));
    }

    #[test]
    fn test_collect_bytes() {
        let items = vec![Value::byte(b'a'), Value::byte(b'b')];
        assert_eq!(collect(&Type::uint8(), &items), Some(b"ab".to_vec()));
    }

    #[test]
    fn test_collect_converts_cgo_chars() {
        let items = vec![
            Value::int_typed(c_char(), 104),
            Value::int_typed(c_char(), 105),
            Value::int_typed(c_char(), -1),
        ];
        assert_eq!(collect(&c_char(), &items), Some(vec![b'h', b'i', 0xff]));
    }

    #[test]
    fn test_collect_rejects_non_integers() {
        let items = vec![Value::byte(1), Value::string("x")];
        assert_eq!(collect(&Type::uint8(), &items), None);
        assert_eq!(collect(&Type::int(), &[Value::int(1)]), None);
    }
}
