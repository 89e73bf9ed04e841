//! Values and pointers.

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use crate::{Kind, Type, TypeRef};

/// A runtime value: a type handle plus its data.
///
/// Constructors keep the type and the data consistent; consumers dispatch
/// on [`Value::data`] and use [`Value::ty`] for naming.
#[derive(Debug, Clone)]
pub struct Value {
    ty: TypeRef,
    data: Data,
}

/// Payload of a [`Value`].
#[derive(Debug, Clone)]
pub enum Data {
    /// The "no value" sentinel.
    Invalid,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(f64, f64),
    String(String),
    /// `None` is a nil pointer.
    Ptr(Option<Pointer>),
    /// `None` is a nil slice, distinct from an empty one.
    Slice(Option<Vec<Value>>),
    Array(Vec<Value>),
    /// `None` is a nil map. Entries keep their insertion order.
    Map(Option<Vec<(Value, Value)>>),
    /// Fields in declaration order.
    Struct(Vec<Field>),
    /// `None` is a nil interface.
    Interface(Option<Box<Value>>),
    /// Raw address of a chan, func or unsafe pointer.
    Address(usize),
    /// Pre-rendered text for shapes the model does not understand.
    Opaque(String),
}

/// A named struct field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Value {
    fn new(ty: impl Into<TypeRef>, data: Data) -> Self {
        Self {
            ty: ty.into(),
            data,
        }
    }

    /// The invalid value, the zero "no value" sentinel.
    pub fn invalid() -> Self {
        Self::new(Type::invalid(), Data::Invalid)
    }

    pub fn bool(value: bool) -> Self {
        Self::new(Type::bool(), Data::Bool(value))
    }

    /// An `int`.
    pub fn int(value: i64) -> Self {
        Self::new(Type::int(), Data::Int(value))
    }

    /// A signed integer of an explicit (possibly named) type.
    pub fn int_typed(ty: impl Into<TypeRef>, value: i64) -> Self {
        Self::new(ty, Data::Int(value))
    }

    /// A `uint`.
    pub fn uint(value: u64) -> Self {
        Self::new(Type::uint(), Data::Uint(value))
    }

    /// An unsigned integer of an explicit (possibly named) type.
    pub fn uint_typed(ty: impl Into<TypeRef>, value: u64) -> Self {
        Self::new(ty, Data::Uint(value))
    }

    /// A `uint8`.
    pub fn byte(value: u8) -> Self {
        Self::new(Type::uint8(), Data::Uint(u64::from(value)))
    }

    pub fn float64(value: f64) -> Self {
        Self::new(Type::float64(), Data::Float(value))
    }

    pub fn float32(value: f32) -> Self {
        Self::new(Type::float32(), Data::Float(f64::from(value)))
    }

    pub fn float_typed(ty: impl Into<TypeRef>, value: f64) -> Self {
        Self::new(ty, Data::Float(value))
    }

    pub fn complex128(re: f64, im: f64) -> Self {
        Self::new(Type::basic(Kind::Complex128), Data::Complex(re, im))
    }

    pub fn complex_typed(ty: impl Into<TypeRef>, re: f64, im: f64) -> Self {
        Self::new(ty, Data::Complex(re, im))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Type::string(), Data::String(value.into()))
    }

    pub fn string_typed(ty: impl Into<TypeRef>, value: impl Into<String>) -> Self {
        Self::new(ty, Data::String(value.into()))
    }

    /// A `[]byte` holding a copy of `bytes`.
    pub fn bytes(bytes: &[u8]) -> Self {
        Self::slice(Type::uint8(), bytes.iter().copied().map(Value::byte).collect())
    }

    /// A `[]elem` slice.
    pub fn slice(elem: impl Into<TypeRef>, items: Vec<Value>) -> Self {
        Self::new(Type::slice_of(elem), Data::Slice(Some(items)))
    }

    /// A slice of an explicit (possibly named) slice type.
    pub fn slice_typed(ty: impl Into<TypeRef>, items: Vec<Value>) -> Self {
        Self::new(ty, Data::Slice(Some(items)))
    }

    /// A nil slice of the given slice type.
    pub fn nil_slice(ty: impl Into<TypeRef>) -> Self {
        Self::new(ty, Data::Slice(None))
    }

    /// A `[len(items)]elem` array.
    pub fn array(elem: impl Into<TypeRef>, items: Vec<Value>) -> Self {
        let len = items.len();
        Self::new(Type::array_of(elem, len), Data::Array(items))
    }

    pub fn array_typed(ty: impl Into<TypeRef>, items: Vec<Value>) -> Self {
        Self::new(ty, Data::Array(items))
    }

    /// A `map[key]elem` with entries in the given order.
    pub fn map(key: impl Into<TypeRef>, elem: impl Into<TypeRef>, entries: Vec<(Value, Value)>) -> Self {
        Self::new(Type::map_of(key, elem), Data::Map(Some(entries)))
    }

    pub fn map_typed(ty: impl Into<TypeRef>, entries: Vec<(Value, Value)>) -> Self {
        Self::new(ty, Data::Map(Some(entries)))
    }

    /// A nil map of the given map type.
    pub fn nil_map(ty: impl Into<TypeRef>) -> Self {
        Self::new(ty, Data::Map(None))
    }

    /// A struct value with fields in declaration order.
    pub fn structure<N, I>(ty: impl Into<TypeRef>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| Field::new(name, value))
            .collect();
        Self::new(ty, Data::Struct(fields))
    }

    /// A pointer to the pointee currently held by `pointer`.
    pub fn pointer(pointer: &Pointer) -> Self {
        let pointee = pointer.get().ty.clone();
        Self::new(Type::ptr_to(pointee), Data::Ptr(Some(pointer.clone())))
    }

    /// A pointer of an explicit pointer type.
    pub fn pointer_typed(ty: impl Into<TypeRef>, pointer: &Pointer) -> Self {
        Self::new(ty, Data::Ptr(Some(pointer.clone())))
    }

    /// A nil `*elem`.
    pub fn nil_pointer(elem: impl Into<TypeRef>) -> Self {
        Self::new(Type::ptr_to(elem), Data::Ptr(None))
    }

    /// An `interface {}` holding `inner`.
    pub fn interface(inner: Value) -> Self {
        Self::interface_typed(Type::interface(), inner)
    }

    /// A value of a named interface type (e.g. `runtime.Object`) holding `inner`.
    pub fn interface_typed(ty: impl Into<TypeRef>, inner: Value) -> Self {
        Self::new(ty, Data::Interface(Some(Box::new(inner))))
    }

    /// A nil `interface {}`.
    pub fn nil_interface() -> Self {
        Self::new(Type::interface(), Data::Interface(None))
    }

    /// A chan, func or unsafe pointer identified by its address.
    pub fn address(ty: impl Into<TypeRef>, addr: usize) -> Self {
        Self::new(ty, Data::Address(addr))
    }

    /// A value rendered verbatim by consumers.
    pub fn opaque(ty: impl Into<TypeRef>, text: impl Into<String>) -> Self {
        Self::new(ty, Data::Opaque(text.into()))
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn kind(&self) -> Kind {
        match self.data {
            Data::Invalid => Kind::Invalid,
            _ => self.ty.kind(),
        }
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    /// Returns true for nil pointers, slices, maps, interfaces and addresses.
    pub fn is_nil(&self) -> bool {
        matches!(
            self.data,
            Data::Ptr(None)
                | Data::Slice(None)
                | Data::Map(None)
                | Data::Interface(None)
                | Data::Address(0)
        )
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self.data, Data::Invalid)
    }

    /// Returns the concrete value inside a non-nil interface, or `self`.
    pub fn unpack(&self) -> &Value {
        match &self.data {
            Data::Interface(Some(inner)) => inner,
            _ => self,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.data {
            Data::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.data {
            Data::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self.data {
            Data::Uint(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.data {
            Data::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            Data::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a struct field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match &self.data {
            Data::Struct(fields) => fields.iter().find(|f| f.name == name).map(|f| &f.value),
            _ => None,
        }
    }

    /// Replace a struct field's value. Returns false if there is no such field.
    pub fn set_field(&mut self, name: &str, value: Value) -> bool {
        let Data::Struct(fields) = &mut self.data else {
            return false;
        };
        match fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }
}

/// A shared, mutable pointee with stable identity.
///
/// Cloning a `Pointer` yields another handle to the same pointee; both
/// report the same [`Pointer::addr`].
#[derive(Clone)]
pub struct Pointer(Rc<RefCell<Value>>);

impl Pointer {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrow the pointee.
    pub fn get(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Replace the pointee, returning the previous value.
    pub fn set(&self, value: Value) -> Value {
        self.0.replace(value)
    }

    /// Mutate the pointee in place.
    pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Identity of the pointee.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Pointer) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Pointer {
    // The pointee is not printed: pointer graphs may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer({:#x})", self.addr())
    }
}
