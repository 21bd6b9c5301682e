//! Target operation schemas: the ordered input, attribute and output slots of
//! each registered operation kind.

use crate::error::Result;
use crate::ir::IrContext;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Static type of an attribute slot. Drives legacy attribute conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    Bool,
    Int32,
    Int64,
    Float,
    Double,
    Str,
    Bools,
    Int32s,
    Int64s,
    Floats,
    Doubles,
    Strs,
    IntArray,
    Scalar,
    DataType,
    Place,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Tensor,
    TensorList,
    /// A scalar that may arrive as a tensor or as a static attribute.
    Scalar(AttrType),
    /// An integer array that may arrive as tensors or as a static attribute.
    IntArray,
}

impl InputKind {
    /// Whether the slot consumes one aggregate value.
    pub fn is_vector(self) -> bool {
        matches!(self, InputKind::TensorList | InputKind::IntArray)
    }

    /// Attribute type of a mutable attribute slot.
    pub fn mutable_attribute(self) -> Option<AttrType> {
        match self {
            InputKind::Scalar(ty) => Some(ty),
            InputKind::IntArray => Some(AttrType::IntArray),
            InputKind::Tensor | InputKind::TensorList => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSlot {
    pub name: String,
    pub kind: InputKind,
    #[serde(default)]
    pub optional: bool,
}

impl InputSlot {
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    pub fn tensor(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::Tensor)
    }

    pub fn tensor_list(name: impl Into<String>) -> Self {
        Self::new(name, InputKind::TensorList)
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSlot {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AttrType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Tensor,
    TensorList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    pub kind: OutputKind,
    #[serde(default)]
    pub optional: bool,
}

impl OutputSlot {
    pub fn tensor(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OutputKind::Tensor,
            optional: false,
        }
    }

    pub fn tensor_list(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: OutputKind::TensorList,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpSchema {
    #[serde(default)]
    pub inputs: Vec<InputSlot>,
    #[serde(default)]
    pub attributes: Vec<AttributeSlot>,
    #[serde(default)]
    pub outputs: Vec<OutputSlot>,
}

impl OpSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, slot: InputSlot) -> Self {
        self.inputs.push(slot);
        self
    }

    pub fn attr(mut self, name: impl Into<String>, ty: AttrType) -> Self {
        self.attributes.push(AttributeSlot {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn output(mut self, slot: OutputSlot) -> Self {
        self.outputs.push(slot);
        self
    }
}

/// A set of schemas keyed by full target operation name, loadable from TOML
/// or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub ops: BTreeMap<String, OpSchema>,
}

impl SchemaFile {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load by extension: `.json` is JSON, everything else TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read schema file {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    pub fn register_into(self, ctx: &mut IrContext) {
        for (name, schema) in self.ops {
            ctx.register_op(name, schema);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_toml_schema_file() {
        let source = r#"
            [ops."pd.reshape"]
            inputs = [
                { name = "x", kind = "tensor" },
                { name = "shape", kind = "int_array" },
            ]
            outputs = [
                { name = "out", kind = "tensor" },
                { name = "xshape", kind = "tensor", optional = true },
            ]

            [ops."pd.scale"]
            inputs = [
                { name = "x", kind = "tensor" },
                { name = "scale", kind = { scalar = "float" } },
            ]
            attributes = [{ name = "bias", type = "float" }]
            outputs = [{ name = "out", kind = "tensor" }]
        "#;
        let file = SchemaFile::from_toml_str(source).unwrap();
        let scale = &file.ops["pd.scale"];
        assert_eq!(
            scale.inputs[1].kind.mutable_attribute(),
            Some(AttrType::Float)
        );
        assert_eq!(
            file.ops["pd.reshape"],
            OpSchema::new()
                .input(InputSlot::tensor("x"))
                .input(InputSlot::new("shape", InputKind::IntArray))
                .output(OutputSlot::tensor("out"))
                .output(OutputSlot::tensor("xshape").optional())
        );
    }

    #[test]
    fn int_array_slots_consume_aggregates() {
        assert!(InputKind::IntArray.is_vector());
        assert!(InputKind::TensorList.is_vector());
        assert!(!InputKind::Scalar(AttrType::Int64).is_vector());
        assert_eq!(InputKind::Tensor.mutable_attribute(), None);
    }
}
