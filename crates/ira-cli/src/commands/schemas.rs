use super::TableArgs;
use crate::cli::CliConfig;
use crate::Result;
use ira_core::ir::IrContext;
use ira_core::schema::{InputKind, OpSchema, OutputKind};
use itertools::Itertools;

/// Arguments for the schemas command
#[derive(Debug, Clone, clap::Args)]
pub struct SchemasArgs {
    #[command(flatten)]
    pub tables: TableArgs,

    /// Print the slots of every op instead of just its name
    #[arg(long)]
    pub slots: bool,
}

/// Execute the schemas command
pub fn schemas_command(args: SchemasArgs, config: &CliConfig) -> Result<()> {
    let ir = args.tables.load_ir(config)?;
    for line in describe(&ir, args.slots) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(ir: &IrContext, slots: bool) -> Vec<String> {
    ir.registered_ops()
        .into_iter()
        .map(|name| match ir.lookup_op(name) {
            Some(info) if slots => format!("{}{}", name, signature(&info.schema)),
            _ => name.to_string(),
        })
        .collect()
}

fn signature(schema: &OpSchema) -> String {
    let inputs = schema
        .inputs
        .iter()
        .map(|slot| {
            let kind = match slot.kind {
                InputKind::Tensor => "",
                InputKind::TensorList => "[]",
                InputKind::Scalar(_) => ": scalar",
                InputKind::IntArray => ": int_array",
            };
            let optional = if slot.optional { "?" } else { "" };
            format!("{}{}{}", slot.name, optional, kind)
        })
        .join(", ");
    let attributes = schema.attributes.iter().map(|slot| &slot.name).join(", ");
    let outputs = schema
        .outputs
        .iter()
        .map(|slot| {
            let list = if slot.kind == OutputKind::TensorList { "[]" } else { "" };
            let optional = if slot.optional { "?" } else { "" };
            format!("{}{}{}", slot.name, optional, list)
        })
        .join(", ");
    format!("({}) {{{}}} -> ({})", inputs, attributes, outputs)
}
