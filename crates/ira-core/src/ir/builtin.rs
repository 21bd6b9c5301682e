//! Names and schemas of the operations the translator synthesizes itself.

use super::IrContext;
use crate::schema::{AttrType, InputSlot, OpSchema, OutputSlot};

/// Prefix of every operation of the translated dialect.
pub const DIALECT_PREFIX: &str = "pd.";
/// Suffix marking an operation whose outputs alias its inputs.
pub const INPLACE_SUFFIX: &str = "_";

pub const COMBINE: &str = "builtin.combine";
pub const SLICE: &str = "builtin.slice";
pub const GET_PARAMETER: &str = "builtin.get_parameter";
pub const SET_PARAMETER: &str = "builtin.set_parameter";

pub const FULL: &str = "pd.full";
pub const FULL_INT_ARRAY: &str = "pd.full_int_array";
pub const FEED: &str = "pd.feed";
pub const FETCH: &str = "pd.fetch";

pub(crate) fn register_builtin_ops(ctx: &mut IrContext) {
    // combine and slice are variadic; their operands are built directly.
    ctx.register_op(COMBINE, OpSchema::new().output(OutputSlot::tensor_list("out")));
    ctx.register_op(
        SLICE,
        OpSchema::new()
            .attr("index", AttrType::Int32)
            .output(OutputSlot::tensor("out")),
    );
    ctx.register_op(
        GET_PARAMETER,
        OpSchema::new()
            .attr("parameter_name", AttrType::Str)
            .output(OutputSlot::tensor("out")),
    );
    ctx.register_op(
        SET_PARAMETER,
        OpSchema::new()
            .input(InputSlot::tensor("parameter"))
            .attr("parameter_name", AttrType::Str),
    );
    ctx.register_op(
        FULL,
        OpSchema::new()
            .attr("shape", AttrType::IntArray)
            .attr("value", AttrType::Float)
            .attr("dtype", AttrType::DataType)
            .attr("place", AttrType::Place)
            .output(OutputSlot::tensor("out")),
    );
    ctx.register_op(
        FULL_INT_ARRAY,
        OpSchema::new()
            .attr("value", AttrType::Int64s)
            .attr("dtype", AttrType::DataType)
            .attr("place", AttrType::Place)
            .output(OutputSlot::tensor("out")),
    );
    ctx.register_op(
        FEED,
        OpSchema::new()
            .attr("name", AttrType::Str)
            .attr("col", AttrType::Int32)
            .output(OutputSlot::tensor("out")),
    );
    ctx.register_op(
        FETCH,
        OpSchema::new()
            .input(InputSlot::tensor("x"))
            .attr("name", AttrType::Str)
            .output(OutputSlot::tensor("out")),
    );
}
