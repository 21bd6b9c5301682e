use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Element type of tensors, shared by legacy variables and target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Bool,
    Int8,
    Uint8,
    Int16,
    Int32,
    Int64,
    Float16,
    Bfloat16,
    Float32,
    Float64,
    Complex64,
    Complex128,
    #[default]
    Undefined,
}

impl DataType {
    /// Decode the numeric dtype code carried by legacy `dtype` attributes.
    pub fn from_legacy_code(code: i64) -> Option<Self> {
        let dtype = match code {
            0 => DataType::Bool,
            1 => DataType::Int16,
            2 => DataType::Int32,
            3 => DataType::Int64,
            4 => DataType::Float16,
            5 => DataType::Float32,
            6 => DataType::Float64,
            20 => DataType::Uint8,
            21 => DataType::Int8,
            22 => DataType::Bfloat16,
            23 => DataType::Complex64,
            24 => DataType::Complex128,
            _ => return None,
        };
        Some(dtype)
    }

    pub fn short_name(self) -> &'static str {
        match self {
            DataType::Bool => "b",
            DataType::Int8 => "i8",
            DataType::Uint8 => "u8",
            DataType::Int16 => "i16",
            DataType::Int32 => "i32",
            DataType::Int64 => "i64",
            DataType::Float16 => "f16",
            DataType::Bfloat16 => "bf16",
            DataType::Float32 => "f32",
            DataType::Float64 => "f64",
            DataType::Complex64 => "c64",
            DataType::Complex128 => "c128",
            DataType::Undefined => "undefined",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    #[default]
    Cpu,
    Gpu(u32),
    Undefined,
}

impl Display for Place {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Place::Cpu => write!(f, "cpu"),
            Place::Gpu(device) => write!(f, "gpu:{}", device),
            Place::Undefined => write!(f, "undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorType {
    pub dtype: DataType,
    pub dims: Vec<i64>,
    #[serde(default)]
    pub lod_level: u32,
}

impl TensorType {
    pub fn new(dtype: DataType, dims: Vec<i64>) -> Self {
        Self {
            dtype,
            dims,
            lod_level: 0,
        }
    }
}

impl Display for TensorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for dim in &self.dims {
            if *dim < 0 {
                write!(f, "?x")?;
            } else {
                write!(f, "{}x", dim)?;
            }
        }
        write!(f, "{}", self.dtype)
    }
}

/// Type of one SSA value in the target IR.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    DenseTensor(TensorType),
    SelectedRows(TensorType),
    Vector(Vec<Type>),
}

impl Type {
    pub fn dense(dtype: DataType, dims: Vec<i64>) -> Self {
        Type::DenseTensor(TensorType::new(dtype, dims))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Type::Vector(_))
    }

    /// Element type at `index` of a vector type.
    pub fn element(&self, index: usize) -> Option<&Type> {
        match self {
            Type::Vector(elements) => elements.get(index),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Type::DenseTensor(tensor) => write!(f, "tensor<{}>", tensor),
            Type::SelectedRows(tensor) => write!(f, "selected_rows<{}>", tensor),
            Type::Vector(elements) => {
                write!(f, "vec[")?;
                for (idx, element) in elements.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}
