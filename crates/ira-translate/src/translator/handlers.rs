use super::outputs::ResultIndexMap;
use super::{DefiningInfo, TranslationContext};
use ira_core::bail;
use ira_core::error::{Error, Result};
use ira_core::ir::{Attribute, AttributeMap, OpId};
use ira_core::legacy::{OpRef, EMPTY_VAR_NAME};
use tracing::debug;

pub(crate) fn general(ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<OpId> {
    let info = ctx.lookup_op_info(&op)?;

    let operands = ctx.resolve_inputs(&op, info)?;
    let (result_types, arg_to_idx) = ctx.resolve_outputs(op, info)?;
    let attributes = ctx.resolve_attributes(&op, info);
    debug!("[general op][{}] preparation end.", op.op_type());

    let id = ctx.append(info, operands, attributes, result_types);
    debug!("[general op][{}] insertion end.", op.op_type());

    record_op_results(ctx, op, &arg_to_idx, id)?;
    Ok(id)
}

/// Program input. Produces the fed variable without consuming anything.
pub(crate) fn feed(ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<OpId> {
    let info = ctx.lookup_op_info(&op)?;

    let (result_types, arg_to_idx) = ctx.resolve_outputs(op, info)?;
    let Some(name) = op.output_argument_names().first().copied() else {
        bail!("feed op should have an output variable");
    };
    let col = op.attr("col").and_then(|attr| attr.as_i32()).unwrap_or(0);
    let mut attributes = AttributeMap::new();
    attributes.insert("name".to_string(), Some(Attribute::from(name)));
    attributes.insert("col".to_string(), Some(Attribute::Int32(col)));
    debug!("[feed][{}] preparation end.", name);

    let id = ctx.append(info, Vec::new(), attributes, result_types);
    debug!("[feed][{}] insertion end.", name);

    record_op_results(ctx, op, &arg_to_idx, id)?;
    Ok(id)
}

/// Program output. Its result mirrors the fetched value and is never bound.
pub(crate) fn fetch(ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<OpId> {
    let info = ctx.lookup_op_info(&op)?;

    let operands = ctx.resolve_inputs(&op, info)?;
    let Some(name) = op.input_argument_names().first().copied() else {
        bail!("fetch op should have an input variable");
    };
    let Some(result_type) = operands
        .first()
        .copied()
        .flatten()
        .and_then(|value| ctx.program.value_type(value))
        .cloned()
    else {
        bail!("fetched variable {} has no type", name);
    };
    let mut attributes = AttributeMap::new();
    attributes.insert("name".to_string(), Some(Attribute::from(name)));
    debug!("[fetch][{}] preparation end.", name);

    let id = ctx.append(info, operands, attributes, vec![Some(result_type)]);
    debug!("[fetch][{}] insertion end.", name);
    Ok(id)
}

/// Bind every output name of `op` to the result it was assigned. Names in
/// aggregate results stay unsliced until something consumes them. `@EMPTY@`
/// placeholders are never bound and take no element position.
pub(crate) fn record_op_results(
    ctx: &mut TranslationContext<'_>,
    op: OpRef<'_>,
    arg_to_idx: &ResultIndexMap,
    id: OpId,
) -> Result<()> {
    for group in &op.outputs {
        let recorded = group.arguments.iter().filter(|name| *name != EMPTY_VAR_NAME);
        for (index, name) in recorded.enumerate() {
            let Some(&result_index) = arg_to_idx.get(name) else {
                return Err(Error::UnrecordedResult {
                    op_type: op.op_type().to_string(),
                    name: name.clone(),
                });
            };
            let value = ctx.program.result(id, result_index);
            let is_aggregate = ctx
                .program
                .value_type(value)
                .map(|ty| ty.is_vector())
                .unwrap_or(false);
            let info = if is_aggregate {
                DefiningInfo::Element {
                    aggregate: value,
                    index,
                }
            } else {
                DefiningInfo::Value(value)
            };
            ctx.env.bind(name.clone(), info);
        }
    }
    Ok(())
}
