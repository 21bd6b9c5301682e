use derive_more::From;
use serde::{Deserialize, Serialize};

/// A free-form attribute value attached to a legacy operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LegacyAttribute {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bools(Vec<bool>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Float64s(Vec<f64>),
    Strings(Vec<String>),
}

impl LegacyAttribute {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LegacyAttribute::Bool(_) => "bool",
            LegacyAttribute::Int(_) => "int",
            LegacyAttribute::Long(_) => "long",
            LegacyAttribute::Float(_) => "float",
            LegacyAttribute::Double(_) => "double",
            LegacyAttribute::String(_) => "string",
            LegacyAttribute::Bools(_) => "bools",
            LegacyAttribute::Ints(_) => "ints",
            LegacyAttribute::Longs(_) => "longs",
            LegacyAttribute::Floats(_) => "floats",
            LegacyAttribute::Float64s(_) => "float64s",
            LegacyAttribute::Strings(_) => "strings",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LegacyAttribute::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view; `long` values are accepted when they fit.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            LegacyAttribute::Int(v) => Some(*v),
            LegacyAttribute::Long(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LegacyAttribute::Int(v) => Some(i64::from(*v)),
            LegacyAttribute::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LegacyAttribute::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Integer list view over `ints` and `longs`.
    pub fn as_i64_list(&self) -> Option<Vec<i64>> {
        match self {
            LegacyAttribute::Ints(v) => Some(v.iter().map(|x| i64::from(*x)).collect()),
            LegacyAttribute::Longs(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl From<&str> for LegacyAttribute {
    fn from(value: &str) -> Self {
        LegacyAttribute::String(value.to_string())
    }
}
