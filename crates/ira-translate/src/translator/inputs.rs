use super::{DefiningInfo, TranslationContext};
use ira_core::bail;
use ira_core::error::{Error, Result};
use ira_core::ir::builtin::{COMBINE, FULL, FULL_INT_ARRAY, SLICE};
use ira_core::ir::{Attribute, AttributeMap, DataType, OpInfo, Place, Type, Value};
use ira_core::legacy::OpDesc;
use ira_core::schema::{AttrType, InputSlot};
use tracing::trace;

impl<'a> TranslationContext<'a> {
    /// Operand list of `op` in schema order. Absent optional inputs are `None`.
    pub(crate) fn resolve_inputs(
        &mut self,
        op: &OpDesc,
        info: &OpInfo,
    ) -> Result<Vec<Option<Value>>> {
        // Every referenced name must be defined, and elements of aggregates
        // are sliced out before any slot consumes them.
        for group in &op.inputs {
            for name in &group.arguments {
                self.materialize(op.op_type(), &group.parameter, name)?;
            }
        }

        let mut operands = Vec::with_capacity(info.schema.inputs.len());
        for slot in &info.schema.inputs {
            operands.push(self.resolve_input_slot(op, slot)?);
        }
        Ok(operands)
    }

    fn resolve_input_slot(&mut self, op: &OpDesc, slot: &InputSlot) -> Result<Option<Value>> {
        let tables = self.tables;
        let compat = &tables.compat;
        let op_type = op.op_type();
        let legacy_name = compat.legacy_arg_name(op_type, &slot.name);
        let mut args = op.input(&legacy_name);
        trace!("[{}] input {} <- {} {:?}", op_type, slot.name, legacy_name, args);

        if args.is_empty() && slot.optional {
            return Ok(None);
        }

        if args.is_empty() {
            if let Some(attr_type) = slot.kind.mutable_attribute() {
                if let Some(candidate) = compat
                    .mutable_attribute_candidates(op_type, &slot.name)
                    .iter()
                    .find(|candidate| !op.input(candidate).is_empty())
                {
                    trace!("[{}] input {} taken from {}", op_type, slot.name, candidate);
                    args = op.input(candidate);
                } else {
                    let value = self.attribute_as_input(op, slot, attr_type)?;
                    return Ok(Some(value));
                }
            }
        }

        let Some(first) = args.first() else {
            return Err(Error::MissingInput {
                op_type: op_type.to_string(),
                slot: slot.name.clone(),
                legacy_name,
            });
        };

        if !slot.kind.is_vector() {
            let value = self.materialize(op_type, &legacy_name, first)?;
            return Ok(Some(value));
        }

        let mut values = Vec::with_capacity(args.len());
        for name in args {
            values.push(self.materialize(op_type, &legacy_name, name)?);
        }
        let combined = self.insert_combine(op_type, &values)?;
        Ok(Some(combined))
    }

    /// The singleton value defining `name`, slicing it out of its aggregate
    /// on first use.
    pub(crate) fn materialize(&mut self, op_type: &str, group: &str, name: &str) -> Result<Value> {
        match self.env.get(name) {
            Some(DefiningInfo::Value(value)) => Ok(value),
            Some(DefiningInfo::Element { aggregate, index }) => {
                let value = self.insert_slice(op_type, aggregate, index)?;
                self.env.bind(name, DefiningInfo::Value(value));
                Ok(value)
            }
            None => Err(Error::UndefinedVariable {
                op_type: op_type.to_string(),
                group: group.to_string(),
                name: name.to_string(),
            }),
        }
    }

    pub(crate) fn insert_slice(
        &mut self,
        op_type: &str,
        aggregate: Value,
        index: usize,
    ) -> Result<Value> {
        let Some(element) = self
            .program
            .value_type(aggregate)
            .and_then(|ty| ty.element(index))
            .cloned()
        else {
            bail!("{}: {} has no element {} to slice", op_type, aggregate, index);
        };
        let info = self.builtin_op_info(op_type, SLICE)?;
        let mut attributes = AttributeMap::new();
        attributes.insert("index".to_string(), Some(slice_index(op_type, index)?));
        let id = self.append(info, vec![Some(aggregate)], attributes, vec![Some(element)]);
        self.stats.slices += 1;
        Ok(self.program.result(id, 0))
    }

    pub(crate) fn insert_combine(&mut self, op_type: &str, values: &[Value]) -> Result<Value> {
        let mut types = Vec::with_capacity(values.len());
        for value in values {
            match self.program.value_type(*value) {
                Some(ty) => types.push(ty.clone()),
                None => bail!("{}: {} has no type to combine", op_type, value),
            }
        }
        let info = self.builtin_op_info(op_type, COMBINE)?;
        let operands = values.iter().copied().map(Some).collect();
        let id = self.append(
            info,
            operands,
            AttributeMap::new(),
            vec![Some(Type::Vector(types))],
        );
        self.stats.combines += 1;
        Ok(self.program.result(id, 0))
    }

    /// Materialize the static attribute backing a mutable attribute slot as a
    /// constant operation.
    fn attribute_as_input(
        &mut self,
        op: &OpDesc,
        slot: &InputSlot,
        attr_type: AttrType,
    ) -> Result<Value> {
        let op_type = op.op_type();
        let legacy_name = self.tables.compat.legacy_attr_name(op_type, &slot.name);
        let Some(legacy) = op.attr(&legacy_name) else {
            return Err(Error::MissingAttribute {
                op_type: op_type.to_string(),
                slot: slot.name.clone(),
                legacy_name,
            });
        };
        let converted = self.tables.attributes.translate(attr_type, Some(legacy));
        let invalid = |reason: String| Error::InvalidConstant {
            op_type: op_type.to_string(),
            slot: slot.name.clone(),
            reason,
        };

        let (name, attributes, result_type) = if attr_type == AttrType::IntArray {
            let Some(Attribute::IntArray(values)) = converted else {
                return Err(invalid(format!(
                    "expected an integer array, found {}",
                    legacy.kind_name()
                )));
            };
            let result_type = Type::dense(DataType::Int64, vec![values.len() as i64]);
            let mut attributes = AttributeMap::new();
            attributes.insert(
                "value".to_string(),
                Some(Attribute::Array(
                    values.into_iter().map(Attribute::Int64).collect(),
                )),
            );
            attributes.insert("dtype".to_string(), Some(Attribute::DataType(DataType::Int64)));
            attributes.insert("place".to_string(), Some(Attribute::Place(Place::Cpu)));
            (FULL_INT_ARRAY, attributes, result_type)
        } else {
            let Some((value, dtype)) = converted.as_ref().and_then(scalar_constant) else {
                return Err(invalid(format!(
                    "expected a scalar, found {}",
                    legacy.kind_name()
                )));
            };
            let mut attributes = AttributeMap::new();
            attributes.insert("shape".to_string(), Some(Attribute::IntArray(vec![1])));
            attributes.insert("value".to_string(), Some(Attribute::Float(value)));
            attributes.insert("dtype".to_string(), Some(Attribute::DataType(dtype)));
            attributes.insert("place".to_string(), Some(Attribute::Place(Place::Cpu)));
            (FULL, attributes, Type::dense(dtype, vec![1]))
        };

        trace!("[{}] input {} materialized by {}", op_type, slot.name, name);
        let info = self.builtin_op_info(op_type, name)?;
        let id = self.append(info, Vec::new(), attributes, vec![Some(result_type)]);
        self.stats.constants += 1;
        Ok(self.program.result(id, 0))
    }
}

/// Constant value (as `f32`) and element type of a scalar attribute.
fn scalar_constant(attr: &Attribute) -> Option<(f32, DataType)> {
    match attr {
        Attribute::Bool(v) => Some((if *v { 1.0 } else { 0.0 }, DataType::Bool)),
        Attribute::Int32(v) => Some((*v as f32, DataType::Int32)),
        Attribute::Int64(v) => Some((*v as f32, DataType::Int64)),
        Attribute::Float(v) => Some((*v, DataType::Float32)),
        Attribute::Double(v) => Some((*v as f32, DataType::Float64)),
        _ => None,
    }
}

/// `builtin.slice` carries its element position as an `i32` attribute.
pub(crate) fn slice_index(op_type: &str, index: usize) -> Result<Attribute> {
    match i32::try_from(index) {
        Ok(index) => Ok(Attribute::Int32(index)),
        Err(_) => bail!("{}: element index {} does not fit the slice index attribute", op_type, index),
    }
}
