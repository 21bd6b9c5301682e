use super::ty::{DataType, Place};
use crate::pretty::escape_string;
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Attribute map of a target operation. `None` marks an attribute slot whose
/// legacy value could not be converted.
pub type AttributeMap = BTreeMap<String, Option<Attribute>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Attribute {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Array(Vec<Attribute>),
    IntArray(Vec<i64>),
    DataType(DataType),
    Place(Place),
}

impl Attribute {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Attribute::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i64]> {
        match self {
            Attribute::IntArray(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Str(value.to_string())
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Bool(v) => write!(f, "{}", v),
            Attribute::Int32(v) => write!(f, "{}i32", v),
            Attribute::Int64(v) => write!(f, "{}i64", v),
            Attribute::Float(v) => write!(f, "{:?}f32", v),
            Attribute::Double(v) => write!(f, "{:?}f64", v),
            Attribute::Str(v) => write!(f, "\"{}\"", escape_string(v)),
            Attribute::Array(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Attribute::IntArray(items) => write!(
                f,
                "int_array[{}]",
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Attribute::DataType(dtype) => write!(f, "dtype({})", dtype),
            Attribute::Place(place) => write!(f, "place({})", place),
        }
    }
}
