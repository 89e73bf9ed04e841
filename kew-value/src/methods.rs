//! Textual capabilities a type may expose.

use std::fmt;

use crate::Value;

/// Signature of a text-producing method.
///
/// Returning `None` means the call failed; callers fall back to rendering
/// the value structurally.
pub type MethodFn = fn(&Value) -> Option<String>;

/// Receiver a method is declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Callable on any value of the type.
    Value,
    /// Only callable on an addressable value (one reached through a pointer).
    Pointer,
}

/// A single method in a type's method table.
#[derive(Clone, Copy)]
pub struct Method {
    pub receiver: Receiver,
    pub call: MethodFn,
}

impl Method {
    /// Create a value-receiver method.
    pub fn on_value(call: MethodFn) -> Self {
        Self {
            receiver: Receiver::Value,
            call,
        }
    }

    /// Create a pointer-receiver method.
    pub fn on_pointer(call: MethodFn) -> Self {
        Self {
            receiver: Receiver::Pointer,
            call,
        }
    }

    /// Invoke the method if the receiver requirements are met.
    pub fn invoke(&self, value: &Value, addressable: bool) -> Option<String> {
        if self.receiver == Receiver::Pointer && !addressable {
            return None;
        }
        (self.call)(value)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// Method table of a type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Methods {
    /// `Error() string`
    pub error: Option<Method>,
    /// `String() string`
    pub string: Option<Method>,
    /// `MarshalJSON() ([]byte, error)`, returning the JSON text.
    pub marshal_json: Option<Method>,
}

impl Methods {
    /// Create an empty method table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, method: Method) -> Self {
        self.error = Some(method);
        self
    }

    pub fn with_string(mut self, method: Method) -> Self {
        self.string = Some(method);
        self
    }

    pub fn with_marshal_json(mut self, method: Method) -> Self {
        self.marshal_json = Some(method);
        self
    }

    /// Returns true if the table has no methods.
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.string.is_none() && self.marshal_json.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shout(value: &Value) -> Option<String> {
        value.as_str().map(str::to_uppercase)
    }

    #[test]
    fn test_value_receiver_always_callable() {
        let method = Method::on_value(shout);
        let value = Value::string("hi");
        assert_eq!(method.invoke(&value, false), Some("HI".to_string()));
        assert_eq!(method.invoke(&value, true), Some("HI".to_string()));
    }

    #[test]
    fn test_pointer_receiver_needs_address() {
        let method = Method::on_pointer(shout);
        let value = Value::string("hi");
        assert_eq!(method.invoke(&value, false), None);
        assert_eq!(method.invoke(&value, true), Some("HI".to_string()));
    }

    #[test]
    fn test_methods_builder() {
        assert!(Methods::new().is_empty());
        let methods = Methods::new().with_string(Method::on_value(shout));
        assert!(!methods.is_empty());
        assert!(methods.string.is_some());
        assert!(methods.error.is_none());
    }
}
