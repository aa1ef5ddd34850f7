//! Keys and values stored in the trees.
//!
//! Search trees order their nodes by [`Key`], a closed union of the scalar types that have a
//! total order. Keys of different variants never meet inside one tree: the tree records the
//! variant of its first key and rejects every other variant at the API boundary, so comparisons
//! only ever happen between keys of the same kind.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Anything that can report the name of its runtime type.
///
/// Trees use this to record the type of their first key and value and to reject later entries of
/// a different type.
pub trait Typed {
    /// A short, stable name for the runtime type of `self`.
    fn type_name(&self) -> &'static str;
}

macro_rules! impl_typed {
    ($($t:ty),* $(,)?) => {
        $(
            impl Typed for $t {
                fn type_name(&self) -> &'static str {
                    stringify!($t)
                }
            }
        )*
    };
}

impl_typed!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

impl Typed for &str {
    fn type_name(&self) -> &'static str {
        "&str"
    }
}

impl Typed for Vec<u8> {
    fn type_name(&self) -> &'static str {
        "Vec<u8>"
    }
}

/// A totally ordered scalar key.
#[derive(Debug, Clone)]
pub enum Key {
    /// A signed integer key.
    Int(i64),
    /// A floating point key. Must not be NaN.
    Float(f64),
    /// A string key, ordered lexicographically by bytes.
    Str(String),
    /// A byte string key, ordered lexicographically.
    Bytes(Vec<u8>),
}

impl Key {
    /// Checks that the key can take part in a total order.
    pub fn validate(&self) -> Result<()> {
        match self {
            Key::Float(f) if f.is_nan() => Err(Error::InvalidKey(format!(
                "{} cannot be ordered",
                self
            ))),
            _ => Ok(()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Key::Int(_) => 0,
            Key::Float(_) => 1,
            Key::Str(_) => 2,
            Key::Bytes(_) => 3,
        }
    }
}

impl Typed for Key {
    fn type_name(&self) -> &'static str {
        match self {
            Key::Int(_) => "int",
            Key::Float(_) => "float",
            Key::Str(_) => "str",
            Key::Bytes(_) => "bytes",
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Float(a), Key::Float(b)) => a.total_cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Bytes(a), Key::Bytes(b)) => a.cmp(b),
            // Trees never compare across variants; this only keeps `Ord` total.
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Key::Int(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::Str(s) => s.hash(state),
            Key::Bytes(b) => b.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Float(x) => write!(f, "{:?}", x),
            Key::Str(s) => write!(f, "'{}'", s),
            Key::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
        }
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    Key::Int(i64::from(i))
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Key {
    fn from(f: f32) -> Self {
        Key::Float(f64::from(f))
    }
}

impl From<f64> for Key {
    fn from(f: f64) -> Self {
        Key::Float(f)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key::Bytes(b)
    }
}

/// A dynamically typed value, for callers whose values are not known until runtime.
///
/// Trees accept any [`Typed`] value type; with `Value` the "all values share one type" rule is
/// checked per entry instead of by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Str(String),
    /// A byte string.
    Bytes(Vec<u8>),
    /// A boolean.
    Bool(bool),
}

impl Typed for Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Bool(_) => "bool",
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
