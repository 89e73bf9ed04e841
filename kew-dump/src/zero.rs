//! Zero-value detection.

use kew_value::{Data, Value};

/// Returns true if `value` is the default value for its shape.
///
/// Structs are zero only when every field is recursively zero, looking
/// through interfaces. The invalid sentinel and shapes without a known
/// default (complex numbers, addresses of chans/funcs, opaque values) are
/// reported as non-zero so they are never silently dropped.
pub fn is_zero(value: &Value) -> bool {
    match value.data() {
        Data::Invalid => false,
        Data::Bool(b) => !b,
        Data::Int(i) => *i == 0,
        Data::Uint(u) => *u == 0,
        Data::Float(f) => *f == 0.0,
        Data::String(s) => s.is_empty(),
        Data::Ptr(ptr) => ptr.is_none(),
        Data::Slice(items) => items.is_none(),
        Data::Array(items) => items.is_empty(),
        Data::Map(entries) => entries.is_none(),
        Data::Interface(inner) => inner.is_none(),
        Data::Struct(fields) => fields.iter().all(|f| is_zero(f.value.unpack())),
        Data::Complex(..) | Data::Address(_) | Data::Opaque(_) => false,
    }
}
