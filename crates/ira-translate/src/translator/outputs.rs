use super::TranslationContext;
use ira_core::error::{Error, Result};
use ira_core::ir::{OpInfo, Type};
use ira_core::legacy::{OpRef, EMPTY_VAR_NAME};
use ira_core::schema::OutputKind;
use std::collections::HashMap;
use tracing::trace;

/// Legacy output name -> result position of the translated operation.
pub(crate) type ResultIndexMap = HashMap<String, usize>;

impl<'a> TranslationContext<'a> {
    /// Result types of `op` in schema order, plus the result position each
    /// legacy output name was assigned.
    pub(crate) fn resolve_outputs(
        &self,
        op: OpRef<'_>,
        info: &OpInfo,
    ) -> Result<(Vec<Option<Type>>, ResultIndexMap)> {
        let compat = &self.tables.compat;
        let op_type = op.op_type();
        let mut types = Vec::with_capacity(info.schema.outputs.len());
        let mut arg_to_idx = ResultIndexMap::new();

        for slot in &info.schema.outputs {
            let legacy_name = compat.legacy_arg_name(op_type, &slot.name);
            let index = types.len();
            if !op.has_output(&legacy_name) {
                if !slot.optional {
                    return Err(Error::MissingOutput {
                        op_type: op_type.to_string(),
                        slot: slot.name.clone(),
                        legacy_name,
                    });
                }
                trace!("[{}] optional output {} absent", op_type, slot.name);
                types.push(None);
                continue;
            }

            let args = op.output(&legacy_name);
            match slot.kind {
                OutputKind::Tensor => {
                    let Some(name) = args.first().filter(|name| *name != EMPTY_VAR_NAME) else {
                        types.push(None);
                        continue;
                    };
                    let ty = self.translate_var_type(op, name)?;
                    trace!("[{}] output {} -> {}: {}", op_type, name, index, ty);
                    arg_to_idx.insert(name.clone(), index);
                    types.push(Some(ty));
                }
                OutputKind::TensorList => {
                    let mut elements = Vec::with_capacity(args.len());
                    for name in args.iter().filter(|name| *name != EMPTY_VAR_NAME) {
                        elements.push(self.translate_var_type(op, name)?);
                        arg_to_idx.insert(name.clone(), index);
                    }
                    types.push(Some(Type::Vector(elements)));
                }
            }
        }
        Ok((types, arg_to_idx))
    }

    /// Target type of a legacy variable, looked up from the op's block
    /// outwards.
    pub(crate) fn translate_var_type(&self, op: OpRef<'_>, name: &str) -> Result<Type> {
        let block = op.block();
        let var = block
            .find_var_recursive(name)
            .ok_or_else(|| Error::UnknownVariable {
                name: name.to_string(),
                block: block.idx(),
            })?;
        self.tables.types.translate(var)
    }
}
