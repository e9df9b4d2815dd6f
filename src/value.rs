//! The JSON value tree.
//!
//! [`Value`] is a recursive tagged enum with exactly one active
//! representation at a time. Composite payloads (`Object`, `Array`,
//! `String`) live behind their containers' own heap allocation, so the
//! enum has a fixed inline size and cheap moves. `Clone` deep-copies.
//!
//! Objects use `BTreeMap`, so key iteration order is sorted key order —
//! deterministic, but deliberately not insertion order.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{JsonError, JsonResult};

/// The discriminant identifying which representation a [`Value`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    /// Key/value mapping.
    Object,
    /// Ordered sequence.
    Array,
    /// Owned text.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// true/false.
    Boolean,
    /// Absence; also the default-constructed state.
    Null,
}

impl JsonType {
    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Float => "float",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON document node.
///
/// Structural equality is derived: arrays compare element-by-element in
/// order, objects by key set and per-key values. `Float` compares by IEEE
/// rules, so `NaN != NaN` and `Value` is not `Eq`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal.
    #[default]
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number without a fractional part or exponent.
    Integer(i64),
    /// JSON number with a fractional part or exponent.
    Float(f64),
    /// JSON string.
    String(String),
    /// JSON array.
    Array(Vec<Value>),
    /// JSON object with sorted key iteration order.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// The active tag of this value.
    pub const fn kind(&self) -> JsonType {
        match self {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Integer(_) => JsonType::Integer,
            Value::Float(_) => JsonType::Float,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    /// The active tag's name, for error messages.
    pub const fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// An empty container or zero scalar of the requested kind.
    pub fn empty(kind: JsonType) -> Value {
        match kind {
            JsonType::Object => Value::Object(BTreeMap::new()),
            JsonType::Array => Value::Array(Vec::new()),
            JsonType::String => Value::String(String::new()),
            JsonType::Integer => Value::Integer(0),
            JsonType::Float => Value::Float(0.0),
            JsonType::Boolean => Value::Bool(false),
            JsonType::Null => Value::Null,
        }
    }

    /// Builds a value from a list of elements, resolving the container
    /// kind by inspection: if *every* element is a 2-element array whose
    /// first element is a string, the result is an `Object` built from
    /// those pairs (later duplicates of a key win); otherwise the result
    /// is an `Array` holding the elements verbatim.
    ///
    /// The rule is all-or-nothing. A list where even one element fails
    /// the pair test silently produces an array of 2-tuples, not an
    /// object — callers constructing objects should make sure every
    /// element is `[key, value]`-shaped. An empty list is an empty
    /// `Array`, not a vacuously-true `Object`; use
    /// [`Value::empty`]`(JsonType::Object)` for an empty object.
    pub fn from_list(elements: Vec<Value>) -> Value {
        if !elements.is_empty() && elements.iter().all(looks_like_pair) {
            let mut map = BTreeMap::new();
            for element in elements {
                if let Ok((key, value)) = split_pair(element) {
                    map.insert(key, value);
                }
            }
            Value::Object(map)
        } else {
            Value::Array(elements)
        }
    }

    /// Returns true if this is an object.
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this is an array.
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is a string.
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an integer.
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns true if this is a float.
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns true if this is a boolean.
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean payload; `TypeMismatch` unless this is a boolean.
    pub fn as_bool(&self) -> JsonResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// The integer payload; `TypeMismatch` unless this is an integer.
    pub fn as_i64(&self) -> JsonResult<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(other.mismatch("integer")),
        }
    }

    /// The integer payload narrowed to `i32`; `TypeMismatch` unless this
    /// is an integer that fits.
    pub fn as_i32(&self) -> JsonResult<i32> {
        let n = self.as_i64()?;
        i32::try_from(n).map_err(|_| JsonError::TypeMismatch {
            expected: "integer in i32 range",
            found: "integer",
        })
    }

    /// The integer payload as `u64`; `TypeMismatch` unless this is a
    /// non-negative integer.
    pub fn as_u64(&self) -> JsonResult<u64> {
        let n = self.as_i64()?;
        u64::try_from(n).map_err(|_| JsonError::TypeMismatch {
            expected: "non-negative integer",
            found: "integer",
        })
    }

    /// The float payload; `TypeMismatch` unless this is a float.
    /// Integers are not silently widened to float.
    pub fn as_f64(&self) -> JsonResult<f64> {
        match self {
            Value::Float(f) => Ok(*f),
            other => Err(other.mismatch("float")),
        }
    }

    /// The float payload narrowed to `f32`; `TypeMismatch` unless this is
    /// a float.
    pub fn as_f32(&self) -> JsonResult<f32> {
        Ok(self.as_f64()? as f32)
    }

    /// The string payload; `TypeMismatch` unless this is a string.
    pub fn as_str(&self) -> JsonResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// The array payload; `TypeMismatch` unless this is an array.
    pub fn as_array(&self) -> JsonResult<&Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch("array")),
        }
    }

    /// Mutable array payload; `TypeMismatch` unless this is an array.
    pub fn as_array_mut(&mut self) -> JsonResult<&mut Vec<Value>> {
        let found = self.type_name();
        match self {
            Value::Array(items) => Ok(items),
            _ => Err(JsonError::TypeMismatch {
                expected: "array",
                found,
            }),
        }
    }

    /// The object payload; `TypeMismatch` unless this is an object.
    pub fn as_object(&self) -> JsonResult<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch("object")),
        }
    }

    /// Mutable object payload; `TypeMismatch` unless this is an object.
    pub fn as_object_mut(&mut self) -> JsonResult<&mut BTreeMap<String, Value>> {
        let found = self.type_name();
        match self {
            Value::Object(map) => Ok(map),
            _ => Err(JsonError::TypeMismatch {
                expected: "object",
                found,
            }),
        }
    }

    /// Checked lookup by `usize` (arrays) or `&str` (objects).
    ///
    /// Unlike the `Index` operators this never panics: a tag mismatch,
    /// out-of-range index, or absent key comes back as a typed error.
    /// External callers should prefer this over `value[...]`.
    pub fn at<I: ValueIndex>(&self, index: I) -> JsonResult<&Value> {
        index.lookup(self)
    }

    /// Mutable counterpart of [`Value::at`]. Absent object keys are an
    /// error here, never auto-inserted.
    pub fn at_mut<I: ValueIndex>(&mut self, index: I) -> JsonResult<&mut Value> {
        index.lookup_mut(self)
    }

    /// Appends `element` to an array.
    ///
    /// On an object, an element that is a 2-element array whose first
    /// element is a string is inserted as a key/value pair (a duplicate
    /// key overwrites). Any other element shape on an object, and any
    /// scalar/null/string receiver, is a `TypeMismatch`.
    pub fn push_back(&mut self, element: Value) -> JsonResult<()> {
        let found = self.type_name();
        match self {
            Value::Array(items) => {
                items.push(element);
                Ok(())
            }
            Value::Object(map) => match split_pair(element) {
                Ok((key, value)) => {
                    map.insert(key, value);
                    Ok(())
                }
                Err(_) => Err(JsonError::TypeMismatch {
                    expected: "two-element [string, value] pair",
                    found,
                }),
            },
            _ => Err(JsonError::TypeMismatch {
                expected: "object or array",
                found,
            }),
        }
    }

    /// Element/pair count; `TypeMismatch` for scalar kinds.
    pub fn len(&self) -> JsonResult<usize> {
        match self {
            Value::Object(map) => Ok(map.len()),
            Value::Array(items) => Ok(items.len()),
            other => Err(other.mismatch("object or array")),
        }
    }

    /// True when a container holds no elements; `TypeMismatch` for
    /// scalar kinds.
    pub fn is_empty(&self) -> JsonResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Pretty-prints this tree with two-space indentation.
    ///
    /// Only object or array roots can be stringified, mirroring the
    /// parser's root restriction.
    pub fn stringify(&self) -> JsonResult<String> {
        crate::stringify::stringify(self)
    }

    fn mismatch(&self, expected: &'static str) -> JsonError {
        JsonError::TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }
}

/// True when `element` passes the "looks like a pair" test: a 2-element
/// array whose first element is a string.
fn looks_like_pair(element: &Value) -> bool {
    matches!(element, Value::Array(items) if items.len() == 2 && items[0].is_string())
}

/// Splits a pair-shaped element into its key and value, or returns the
/// element unchanged when it is not pair-shaped.
fn split_pair(element: Value) -> Result<(String, Value), Value> {
    match element {
        Value::Array(items) => {
            let mut iter = items.into_iter();
            match (iter.next(), iter.next(), iter.next()) {
                (Some(Value::String(key)), Some(value), None) => Ok((key, value)),
                (a, b, c) => {
                    let items: Vec<Value> =
                        [a, b, c].into_iter().flatten().chain(iter).collect();
                    Err(Value::Array(items))
                }
            }
        }
        other => Err(other),
    }
}

/// Sealed dispatch for [`Value::at`] / [`Value::at_mut`]: `usize` indexes
/// arrays, `&str` indexes objects.
pub trait ValueIndex: private::Sealed {
    /// Checked immutable lookup.
    fn lookup(self, value: &Value) -> JsonResult<&Value>;
    /// Checked mutable lookup.
    fn lookup_mut(self, value: &mut Value) -> JsonResult<&mut Value>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for &str {}
}

impl ValueIndex for usize {
    fn lookup(self, value: &Value) -> JsonResult<&Value> {
        let items = value.as_array()?;
        items.get(self).ok_or(JsonError::IndexOutOfBounds {
            index: self,
            len: items.len(),
        })
    }

    fn lookup_mut(self, value: &mut Value) -> JsonResult<&mut Value> {
        let items = value.as_array_mut()?;
        let len = items.len();
        items
            .get_mut(self)
            .ok_or(JsonError::IndexOutOfBounds { index: self, len })
    }
}

impl ValueIndex for &str {
    fn lookup(self, value: &Value) -> JsonResult<&Value> {
        value.as_object()?.get(self).ok_or_else(|| JsonError::KeyNotFound {
            key: self.to_string(),
        })
    }

    fn lookup_mut(self, value: &mut Value) -> JsonResult<&mut Value> {
        value
            .as_object_mut()?
            .get_mut(self)
            .ok_or_else(|| JsonError::KeyNotFound {
                key: self.to_string(),
            })
    }
}

// Unchecked indexing. Defined only when the receiver's tag already
// matches the index kind; a mismatch, out-of-range index, or absent key
// is a contract violation and panics. Callers who cannot guarantee the
// tag should use `at`/`at_mut` instead.
#[allow(clippy::panic)]
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => &items[index],
            other => panic!("cannot index {} with a number", other.type_name()),
        }
    }
}

#[allow(clippy::panic)]
impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        let found = self.type_name();
        match self {
            Value::Array(items) => &mut items[index],
            _ => panic!("cannot index {found} with a number"),
        }
    }
}

#[allow(clippy::panic)]
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Object(map) => match map.get(key) {
                Some(value) => value,
                None => panic!("key {key:?} not found"),
            },
            other => panic!("cannot index {} with a string", other.type_name()),
        }
    }
}

// Mutable string indexing inserts `Null` for an absent key, so
// `doc["new"] = x.into()` works on objects the way a map does.
#[allow(clippy::panic)]
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        let found = self.type_name();
        match self {
            Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
            _ => panic!("cannot index {found} with a string"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Value {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Value {
        Value::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Value {
        Value::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::Float(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Null
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Value {
        Value::Object(map)
    }
}

/// Collecting values applies the [`Value::from_list`] pair rule.
impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::from_list(iter.into_iter().collect())
    }
}
