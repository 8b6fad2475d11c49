//! Access to the live objects of the host runtime.
//!
//! The host exposes its objects by name: fields and properties can be read and written, and
//! methods can be run on an instance or on a class. Every call can fail, and callers skip only
//! the step that needed the failed call.
use std::{fmt, num::NonZeroUsize};

use hitscore_core::{color::Color, score::RawScore};
use thiserror::Error;

/// Opaque reference to a live host object.
///
/// Null references are represented as `Option<Handle>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroUsize);

impl Handle {
    /// Wraps a raw host pointer, returning `None` for null.
    #[inline]
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    /// Returns the raw host pointer.
    #[inline]
    pub fn as_raw(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0.get())
    }
}

/// Two-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component vector, used for world positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Bottom edge.
    pub y: f32,
    /// Width, in pixels for sprite rectangles.
    pub width: f32,
    /// Height, in pixels for sprite rectangles.
    pub height: f32,
}

/// A host class, used as a method argument (e.g. for `GetComponent`) and for static calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Class {
    /// Namespace, empty for the global namespace.
    pub namespace: &'static str,
    /// Class name. Nested classes are written as `Outer/Inner`.
    pub name: &'static str,
}

impl Class {
    /// Creates a `Class`.
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// A value passed to or returned from the host.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    /// Null reference, or no return value.
    Null,
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    String(String),
    Color(Color),
    Vector2(Vector2),
    Vector3(Vector3),
    Rect(Rect),
    Object(Handle),
    Class(Class),
    /// Several values, e.g. a method's out-parameters.
    Tuple(Vec<Value>),
}

impl Value {
    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Color(_) => "color",
            Value::Vector2(_) => "vector2",
            Value::Vector3(_) => "vector3",
            Value::Rect(_) => "rect",
            Value::Object(_) => "object",
            Value::Class(_) => "class",
            Value::Tuple(_) => "tuple",
        }
    }
}

impl From<Option<Handle>> for Value {
    fn from(handle: Option<Handle>) -> Self {
        handle.map_or(Value::Null, Value::Object)
    }
}

/// Failure of a host call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The object has no field with this name.
    #[error("no field `{0}`")]
    NoSuchField(String),
    /// The object has no property with this name.
    #[error("no property `{0}`")]
    NoSuchProperty(String),
    /// The target has no method with this name and these arguments.
    #[error("no method `{0}`")]
    NoSuchMethod(String),
    /// The host returned a value of another kind than the caller expected.
    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        /// Kind the caller expected.
        expected: &'static str,
        /// Kind the host returned, see [`Value::kind()`].
        found: &'static str,
    },
    /// The host returned null where an object was required.
    #[error("unexpected null reference")]
    Null,
    /// The host code threw.
    #[error("host exception: {0}")]
    Exception(String),
}

/// The receiver of a method call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// An instance method of the object.
    Instance(Handle),
    /// A static method of the class.
    Static(Class),
}

/// The host object runtime.
pub trait Host {
    /// Reads the field `name` of `object`.
    fn get_field(&mut self, object: Handle, name: &str) -> Result<Value, HostError>;
    /// Writes the field `name` of `object`.
    fn set_field(&mut self, object: Handle, name: &str, value: Value) -> Result<(), HostError>;
    /// Runs the getter of the property `name` of `object`.
    fn get_property(&mut self, object: Handle, name: &str) -> Result<Value, HostError>;
    /// Runs the setter of the property `name` of `object`.
    fn set_property(&mut self, object: Handle, name: &str, value: Value)
        -> Result<(), HostError>;
    /// Runs a method, returning [`Value::Null`] for methods without a return value.
    fn run_method(&mut self, target: Target, name: &str, args: &[Value])
        -> Result<Value, HostError>;
}

/// Conversion out of a [`Value`] returned by the host.
pub trait FromValue: Sized {
    /// Converts `value`, failing with [`HostError::TypeMismatch`] if it has the wrong kind.
    fn from_value(value: Value) -> Result<Self, HostError>;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> Result<T, HostError> {
    Err(HostError::TypeMismatch {
        expected,
        found: found.kind(),
    })
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, HostError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Bool(x) => Ok(x),
            other => mismatch("bool", &other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Int(x) => Ok(x),
            other => mismatch("int", &other),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Float(x) => Ok(x),
            other => mismatch("float", &other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::String(x) => Ok(x),
            // Unset text reads back as null.
            Value::Null => Ok(String::new()),
            other => mismatch("string", &other),
        }
    }
}

impl FromValue for Handle {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Object(x) => Ok(x),
            Value::Null => Err(HostError::Null),
            other => mismatch("object", &other),
        }
    }
}

impl FromValue for Option<Handle> {
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Object(x) => Ok(Some(x)),
            Value::Null => Ok(None),
            other => mismatch("object", &other),
        }
    }
}

impl FromValue for RawScore {
    /// Reads the three out-parameters of the raw score computation.
    fn from_value(value: Value) -> Result<Self, HostError> {
        match value {
            Value::Tuple(values) => match values[..] {
                [Value::Int(before_cut), Value::Int(after_cut), Value::Int(cut_distance)] => {
                    Ok(RawScore::new(before_cut, after_cut, cut_distance))
                }
                _ => mismatch("(int, int, int)", &Value::Tuple(values)),
            },
            other => mismatch("(int, int, int)", &other),
        }
    }
}

/// Typed helpers on top of [`Host`].
pub trait HostExt: Host {
    /// Reads a field as `T`.
    fn field<T: FromValue>(&mut self, object: Handle, name: &str) -> Result<T, HostError> {
        T::from_value(self.get_field(object, name)?)
    }

    /// Reads a property as `T`.
    fn property<T: FromValue>(&mut self, object: Handle, name: &str) -> Result<T, HostError> {
        T::from_value(self.get_property(object, name)?)
    }

    /// Runs a method, converting its return value to `T`.
    fn call<T: FromValue>(
        &mut self,
        target: Target,
        name: &str,
        args: &[Value],
    ) -> Result<T, HostError> {
        T::from_value(self.run_method(target, name, args)?)
    }

    /// Returns the component of class `class` attached to `object`, if any.
    fn component(&mut self, object: Handle, class: Class) -> Result<Option<Handle>, HostError> {
        self.call(
            Target::Instance(object),
            "GetComponent",
            &[Value::Class(class)],
        )
    }

    /// Attaches a new component of class `class` to `object`.
    fn add_component(&mut self, object: Handle, class: Class) -> Result<Handle, HostError> {
        self.call(
            Target::Instance(object),
            "AddComponent",
            &[Value::Class(class)],
        )
    }
}

impl<H: Host + ?Sized> HostExt for H {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle() {
        assert_eq!(Handle::new(0), None);
        assert_eq!(Handle::new(0x10).map(Handle::as_raw), Some(0x10));
    }

    #[test]
    fn raw_score_from_tuple() {
        let value = Value::Tuple(vec![Value::Int(70), Value::Int(30), Value::Int(15)]);
        assert_eq!(RawScore::from_value(value), Ok(RawScore::new(70, 30, 15)));

        let value = Value::Tuple(vec![Value::Int(70), Value::Float(30.)]);
        assert!(matches!(
            RawScore::from_value(value),
            Err(HostError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn null_object() {
        assert_eq!(Handle::from_value(Value::Null), Err(HostError::Null));
        assert_eq!(Option::<Handle>::from_value(Value::Null), Ok(None));
        assert_eq!(
            i32::from_value(Value::Bool(true)),
            Err(HostError::TypeMismatch {
                expected: "int",
                found: "bool"
            })
        );
    }

    #[test]
    fn class_display() {
        assert_eq!(Class::new("", "ScoreModel").to_string(), "ScoreModel");
        assert_eq!(
            Class::new("UnityEngine", "AudioSource").to_string(),
            "UnityEngine.AudioSource"
        );
    }
}
