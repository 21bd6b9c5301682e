//! Type-directed conversion of legacy attribute values.

use ira_core::ir::{Attribute, DataType, Place};
use ira_core::legacy::LegacyAttribute;
use ira_core::schema::AttrType;
use std::collections::HashMap;

/// Converter used for one attribute type; `None` means "cannot convert".
pub type AttributeConverter = fn(&LegacyAttribute) -> Option<Attribute>;

/// Converts legacy attribute values into target attributes, driven by the
/// attribute type declared in the target schema.
#[derive(Debug, Clone, Default)]
pub struct AttributeTranslator {
    overrides: HashMap<AttrType, AttributeConverter>,
}

impl AttributeTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the conversion used for `ty`.
    pub fn with_override(mut self, ty: AttrType, converter: AttributeConverter) -> Self {
        self.overrides.insert(ty, converter);
        self
    }

    /// Absent legacy values convert to `None`.
    pub fn translate(&self, ty: AttrType, legacy: Option<&LegacyAttribute>) -> Option<Attribute> {
        let legacy = legacy?;
        match self.overrides.get(&ty) {
            Some(converter) => converter(legacy),
            None => convert(ty, legacy),
        }
    }
}

fn convert(ty: AttrType, legacy: &LegacyAttribute) -> Option<Attribute> {
    use LegacyAttribute as L;

    let attr = match (ty, legacy) {
        (AttrType::Bool, L::Bool(v)) => Attribute::Bool(*v),
        (AttrType::Int32, _) => Attribute::Int32(legacy.as_i32()?),
        (AttrType::Int64, _) => Attribute::Int64(legacy.as_i64()?),
        (AttrType::Float, L::Float(v)) => Attribute::Float(*v),
        (AttrType::Float, L::Double(v)) => Attribute::Float(*v as f32),
        (AttrType::Float, L::Int(v)) => Attribute::Float(*v as f32),
        (AttrType::Float, L::Long(v)) => Attribute::Float(*v as f32),
        (AttrType::Double, L::Double(v)) => Attribute::Double(*v),
        (AttrType::Double, L::Float(v)) => Attribute::Double(f64::from(*v)),
        (AttrType::Str, L::String(v)) => Attribute::Str(v.clone()),
        (AttrType::Bools, L::Bools(v)) => {
            Attribute::Array(v.iter().copied().map(Attribute::Bool).collect())
        }
        (AttrType::Int32s, L::Ints(v)) => {
            Attribute::Array(v.iter().copied().map(Attribute::Int32).collect())
        }
        (AttrType::Int64s, _) => {
            Attribute::Array(legacy.as_i64_list()?.into_iter().map(Attribute::Int64).collect())
        }
        (AttrType::Floats, L::Floats(v)) => {
            Attribute::Array(v.iter().copied().map(Attribute::Float).collect())
        }
        (AttrType::Doubles, L::Float64s(v)) => {
            Attribute::Array(v.iter().copied().map(Attribute::Double).collect())
        }
        (AttrType::Strs, L::Strings(v)) => {
            Attribute::Array(v.iter().cloned().map(Attribute::Str).collect())
        }
        (AttrType::IntArray, L::Int(v)) => Attribute::IntArray(vec![i64::from(*v)]),
        (AttrType::IntArray, L::Long(v)) => Attribute::IntArray(vec![*v]),
        (AttrType::IntArray, _) => Attribute::IntArray(legacy.as_i64_list()?),
        (AttrType::Scalar, L::Bool(v)) => Attribute::Bool(*v),
        (AttrType::Scalar, L::Int(v)) => Attribute::Int32(*v),
        (AttrType::Scalar, L::Long(v)) => Attribute::Int64(*v),
        (AttrType::Scalar, L::Float(v)) => Attribute::Float(*v),
        (AttrType::Scalar, L::Double(v)) => Attribute::Double(*v),
        (AttrType::DataType, _) => Attribute::DataType(DataType::from_legacy_code(legacy.as_i64()?)?),
        (AttrType::Place, L::String(v)) => Attribute::Place(parse_place(v)?),
        _ => return None,
    };
    Some(attr)
}

fn parse_place(source: &str) -> Option<Place> {
    match source.trim().to_ascii_lowercase().as_str() {
        "cpu" => Some(Place::Cpu),
        "gpu" => Some(Place::Gpu(0)),
        other => other
            .strip_prefix("gpu:")
            .and_then(|device| device.parse().ok())
            .map(Place::Gpu),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_stay_absent() {
        let translator = AttributeTranslator::new();
        assert_eq!(translator.translate(AttrType::Int32, None), None);
    }

    #[test]
    fn converts_by_target_type() {
        let translator = AttributeTranslator::new();
        assert_eq!(
            translator.translate(AttrType::IntArray, Some(&LegacyAttribute::Ints(vec![2, -1]))),
            Some(Attribute::IntArray(vec![2, -1]))
        );
        assert_eq!(
            translator.translate(AttrType::Scalar, Some(&LegacyAttribute::Double(0.5))),
            Some(Attribute::Double(0.5))
        );
        assert_eq!(
            translator.translate(AttrType::DataType, Some(&LegacyAttribute::Int(5))),
            Some(Attribute::DataType(DataType::Float32))
        );
        assert_eq!(
            translator.translate(AttrType::Place, Some(&LegacyAttribute::from("gpu:1"))),
            Some(Attribute::Place(Place::Gpu(1)))
        );
    }

    #[test]
    fn mismatched_values_produce_nothing() {
        let translator = AttributeTranslator::new();
        assert_eq!(
            translator.translate(AttrType::Bool, Some(&LegacyAttribute::from("yes"))),
            None
        );
        assert_eq!(
            translator.translate(AttrType::DataType, Some(&LegacyAttribute::Int(77))),
            None
        );
    }

    #[test]
    fn overrides_replace_default_rules() {
        let translator = AttributeTranslator::new()
            .with_override(AttrType::Bool, |legacy| {
                legacy.as_i32().map(|v| Attribute::Bool(v != 0))
            });
        assert_eq!(
            translator.translate(AttrType::Bool, Some(&LegacyAttribute::Int(1))),
            Some(Attribute::Bool(true))
        );
    }
}
