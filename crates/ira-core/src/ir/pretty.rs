use std::fmt::{self, Formatter};

use itertools::Itertools;

use super::{Operation, Program};
use crate::pretty::{PrettyCtx, PrettyPrintable};

const NULL: &str = "<null>";

impl PrettyPrintable for Program {
    fn fmt_pretty(&self, f: &mut Formatter<'_>, ctx: &mut PrettyCtx<'_>) -> fmt::Result {
        ctx.writeln(f, "ir::Program {")?;
        ctx.with_indent(|ctx| {
            for (id, op) in self.iter() {
                ctx.writeln(f, format_operation(self, id, op, ctx.options.show_types))?;
            }
            Ok(())
        })?;
        ctx.writeln(f, "}")
    }
}

fn format_operation(program: &Program, id: super::OpId, op: &Operation, show_types: bool) -> String {
    let results = (0..op.num_results())
        .map(|index| program.result(id, index).to_string())
        .join(", ");
    let operands = op
        .operands
        .iter()
        .map(|operand| operand.map_or_else(|| NULL.to_string(), |v| v.to_string()))
        .join(", ");
    let attributes = op
        .attributes
        .iter()
        .map(|(name, attr)| match attr {
            Some(attr) => format!("{}: {}", name, attr),
            None => format!("{}: {}", name, NULL),
        })
        .join(", ");

    let mut line = String::new();
    if !results.is_empty() {
        line.push_str(&results);
        line.push_str(" = ");
    }
    line.push_str(&format!("\"{}\"({}) {{{}}}", op.name, operands, attributes));

    if show_types {
        let operand_types = op
            .operands
            .iter()
            .map(|operand| {
                operand
                    .and_then(|value| program.value_type(value))
                    .map_or_else(|| NULL.to_string(), |ty| ty.to_string())
            })
            .join(", ");
        let result_types = op
            .result_types
            .iter()
            .map(|ty| ty.as_ref().map_or_else(|| NULL.to_string(), |ty| ty.to_string()))
            .join(", ");
        line.push_str(&format!(" : ({}) -> ({})", operand_types, result_types));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{builtin, Attribute, AttributeMap, DataType, IrContext, Type};
    use crate::pretty::{pretty, PrettyOptions};

    #[test]
    fn prints_operations_with_types() {
        let ctx = IrContext::new();
        let mut program = Program::new();
        let mut attrs = AttributeMap::new();
        attrs.insert("col".to_string(), Some(Attribute::Int32(0)));
        attrs.insert("name".to_string(), Some(Attribute::from("x")));
        let feed = program.push_back(Operation::create(
            ctx.lookup_op(builtin::FEED).unwrap(),
            Vec::new(),
            attrs,
            vec![Some(Type::dense(DataType::Float32, vec![2, 3]))],
        ));
        let x = program.result(feed, 0);
        program.push_back(Operation::create(
            ctx.lookup_op(builtin::FETCH).unwrap(),
            vec![Some(x), None],
            AttributeMap::from([("name".to_string(), None)]),
            vec![None],
        ));

        let printed = pretty(&program, PrettyOptions::default()).to_string();
        let expected = "ir::Program {\n    \
            %0 = \"pd.feed\"() {col: 0i32, name: \"x\"} : () -> (tensor<2x3xf32>)\n    \
            %1 = \"pd.fetch\"(%0, <null>) {name: <null>} : (tensor<2x3xf32>, <null>) -> (<null>)\n\
            }\n";
        assert_eq!(printed, expected);
    }
}
