use ira_core::error::{Error, Result};
use ira_core::ir::{TensorType, Type};
use ira_core::legacy::{VarDesc, VarType};
use std::collections::HashMap;

pub type TypeConverter = fn(&VarDesc) -> Type;

/// Maps a legacy variable's declared type onto a target value type.
#[derive(Debug, Clone)]
pub struct TypeTranslator {
    converters: HashMap<VarType, TypeConverter>,
}

impl Default for TypeTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTranslator {
    pub fn new() -> Self {
        let mut translator = Self {
            converters: HashMap::new(),
        };
        translator.register(VarType::LodTensor, |var| {
            Type::DenseTensor(tensor_type(var))
        });
        translator.register(VarType::SelectedRows, |var| {
            Type::SelectedRows(tensor_type(var))
        });
        translator
    }

    pub fn register(&mut self, var_type: VarType, converter: TypeConverter) {
        self.converters.insert(var_type, converter);
    }

    pub fn translate(&self, var: &VarDesc) -> Result<Type> {
        self.converters
            .get(&var.var_type)
            .map(|converter| converter(var))
            .ok_or_else(|| Error::UnsupportedVarType {
                name: var.name.clone(),
                var_type: var.var_type,
            })
    }
}

fn tensor_type(var: &VarDesc) -> TensorType {
    TensorType {
        dtype: var.dtype,
        dims: var.shape.clone(),
        lod_level: var.lod_level,
    }
}
