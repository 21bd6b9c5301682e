use super::{DefiningInfo, OpTranslator, Translation, TranslationContext, TranslationTables};
use ira_core::bail;
use ira_core::config;
use ira_core::error::Result;
use ira_core::ir::builtin::{GET_PARAMETER, SET_PARAMETER};
use ira_core::ir::{Attribute, AttributeMap, IrContext};
use ira_core::legacy::{BlockRef, OpRef, ProgramDesc, VarType};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Load persistable inputs with `builtin.get_parameter` and store
    /// persistable outputs with `builtin.set_parameter`.
    pub parameters: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self { parameters: true }
    }
}

impl TranslateOptions {
    fn parameters_enabled(&self) -> bool {
        self.parameters && !config::parameters_disabled()
    }
}

/// Translates the global block of a legacy program into a target program.
pub struct ProgramTranslator {
    ir: IrContext,
    tables: TranslationTables,
    options: TranslateOptions,
    op_translator: OpTranslator,
}

impl ProgramTranslator {
    pub fn new(ir: IrContext, tables: TranslationTables) -> Self {
        Self {
            ir,
            tables,
            options: TranslateOptions::default(),
            op_translator: OpTranslator::new(),
        }
    }

    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ir(&self) -> &IrContext {
        &self.ir
    }

    pub fn op_translator_mut(&mut self) -> &mut OpTranslator {
        &mut self.op_translator
    }

    pub fn translate(&self, program: &ProgramDesc) -> Result<Translation> {
        let Some(block) = program.global_block() else {
            bail!("legacy program has no global block");
        };
        self.translate_block(block)
    }

    pub fn translate_block(&self, block: BlockRef<'_>) -> Result<Translation> {
        debug!("translating block {} ({} ops)", block.idx(), block.desc().ops.len());
        let parameters = self.options.parameters_enabled();
        let mut ctx = TranslationContext::new(&self.ir, &self.tables);
        for op in block.ops() {
            if parameters {
                self.load_parameters(&mut ctx, op)?;
            }
            self.op_translator.translate(&mut ctx, op)?;
            if parameters {
                self.store_parameters(&mut ctx, op)?;
            }
        }
        Ok(ctx.finish())
    }

    /// Bind persistable tensor inputs that nothing has defined yet. Feed and
    /// fetch holders are persistable too but are not parameters.
    fn load_parameters(&self, ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<()> {
        for name in op.input_argument_names() {
            if ctx.env.contains(name) {
                continue;
            }
            let Some(var) = op.block().find_var_recursive(name) else {
                continue;
            };
            if !var.persistable || !is_parameter_type(var.var_type) {
                continue;
            }
            let ty = self.tables.types.translate(var)?;
            let info = ctx.builtin_op_info(op.op_type(), GET_PARAMETER)?;
            let id = ctx.append(info, Vec::new(), parameter_name(name), vec![Some(ty)]);
            let value = ctx.program.result(id, 0);
            ctx.env.bind(name, DefiningInfo::Value(value));
            ctx.stats.parameters += 1;
            trace!("loaded parameter {} as {}", name, value);
        }
        Ok(())
    }

    /// Write persistable outputs of `op` back to their parameters.
    fn store_parameters(&self, ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<()> {
        for group in &op.outputs {
            for name in &group.arguments {
                let persistable = op
                    .block()
                    .find_var_recursive(name)
                    .map(|var| var.persistable && is_parameter_type(var.var_type))
                    .unwrap_or(false);
                if !persistable || !ctx.env.contains(name) {
                    continue;
                }
                let value = ctx.materialize(op.op_type(), &group.parameter, name)?;
                let info = ctx.builtin_op_info(op.op_type(), SET_PARAMETER)?;
                ctx.append(info, vec![Some(value)], parameter_name(name), Vec::new());
                ctx.stats.parameters += 1;
                trace!("stored {} to parameter {}", value, name);
            }
        }
        Ok(())
    }
}

fn is_parameter_type(var_type: VarType) -> bool {
    matches!(var_type, VarType::LodTensor | VarType::SelectedRows)
}

fn parameter_name(name: &str) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    attributes.insert("parameter_name".to_string(), Some(Attribute::from(name)));
    attributes
}
