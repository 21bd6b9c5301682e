use super::TranslationContext;
use ira_core::error::{Error, Result};
use ira_core::ir::builtin::{DIALECT_PREFIX, INPLACE_SUFFIX};
use ira_core::ir::OpInfo;
use ira_core::legacy::OpDesc;
use itertools::{EitherOrBoth, Itertools};
use tracing::debug;

/// Ops whose outputs may share names with their inputs without being in-place.
const INPLACE_EXCLUSIONS: &[&str] = &["batch_norm"];

/// Whether any output of `op` reuses the name of one of its inputs.
pub(crate) fn is_inplace(op: &OpDesc) -> bool {
    if INPLACE_EXCLUSIONS.contains(&op.op_type()) {
        return false;
    }
    let inputs = op.input_argument_names();
    let outputs = op.output_argument_names();
    if inputs.is_empty() || outputs.is_empty() {
        return false;
    }

    let overlap = inputs
        .into_iter()
        .sorted_unstable()
        .dedup()
        .merge_join_by(outputs.into_iter().sorted_unstable().dedup(), |a, b| a.cmp(b))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(name, _) => Some(name),
            _ => None,
        })
        .collect_vec();
    if overlap.is_empty() {
        return false;
    }
    debug!("op {} has inplace inputs: {}", op.op_type(), overlap.iter().join(", "));
    true
}

impl<'a> TranslationContext<'a> {
    /// Full target name of a legacy op: dialect prefix, canonical base name
    /// and the in-place suffix when the op writes one of its inputs.
    pub(crate) fn target_op_name(&self, op: &OpDesc) -> String {
        let mut name = format!(
            "{}{}",
            DIALECT_PREFIX,
            self.tables.compat.normalize_op_name(op.op_type())
        );
        if is_inplace(op) {
            name.push_str(INPLACE_SUFFIX);
        }
        debug!("op {} translates to {}", op.op_type(), name);
        name
    }

    pub(crate) fn lookup_op_info(&self, op: &OpDesc) -> Result<&'a OpInfo> {
        let target_name = self.target_op_name(op);
        let ir = self.ir;
        ir.lookup_op(&target_name).ok_or_else(|| Error::MissingSchema {
            op_type: op.op_type().to_string(),
            target_name,
        })
    }

    /// Schema of an operation the translator synthesizes itself.
    pub(crate) fn builtin_op_info(&self, op_type: &str, name: &str) -> Result<&'a OpInfo> {
        let ir = self.ir;
        ir.lookup_op(name).ok_or_else(|| Error::MissingSchema {
            op_type: op_type.to_string(),
            target_name: name.to_string(),
        })
    }
}
