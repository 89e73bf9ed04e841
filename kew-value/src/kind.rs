//! Shape classification of values.

/// The runtime shape of a value.
///
/// Mirrors the closed set of kinds exposed by Go's `reflect` package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Array,
    Chan,
    Func,
    Interface,
    Map,
    Ptr,
    Slice,
    String,
    Struct,
    UnsafePointer,
}

impl Kind {
    /// Get the predeclared Go name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::Array => "array",
            Kind::Chan => "chan",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Map => "map",
            Kind::Ptr => "ptr",
            Kind::Slice => "slice",
            Kind::String => "string",
            Kind::Struct => "struct",
            Kind::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Returns true for the signed integer family.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64
        )
    }

    /// Returns true for the unsigned integer family, `uintptr` included.
    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Kind::Uint | Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64 | Kind::Uintptr
        )
    }

    /// Returns true for any integer kind.
    pub fn is_integer(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Kind::Complex64 | Kind::Complex128)
    }

    /// Returns true for kinds rendered as a single literal token.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Kind::Bool | Kind::String)
            || self.is_integer()
            || self.is_float()
            || self.is_complex()
    }

    /// Bit size of numeric kinds (`int`/`uint` are treated as 64-bit).
    pub fn bits(&self) -> u32 {
        match self {
            Kind::Int8 | Kind::Uint8 => 8,
            Kind::Int16 | Kind::Uint16 => 16,
            Kind::Int32 | Kind::Uint32 | Kind::Float32 => 32,
            Kind::Complex64 => 64,
            Kind::Complex128 => 128,
            _ => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(Kind::Int64.as_str(), "int64");
        assert_eq!(Kind::Uint8.as_str(), "uint8");
        assert_eq!(Kind::Complex128.as_str(), "complex128");
    }

    #[test]
    fn test_kind_families() {
        assert!(Kind::Int32.is_signed());
        assert!(Kind::Uintptr.is_unsigned());
        assert!(Kind::Uint8.is_integer());
        assert!(Kind::Float32.is_float());
        assert!(Kind::String.is_scalar());
        assert!(!Kind::Struct.is_scalar());
        assert!(!Kind::Ptr.is_integer());
    }

    #[test]
    fn test_kind_bits() {
        assert_eq!(Kind::Float32.bits(), 32);
        assert_eq!(Kind::Float64.bits(), 64);
        assert_eq!(Kind::Complex64.bits(), 64);
        assert_eq!(Kind::Int.bits(), 64);
    }
}
