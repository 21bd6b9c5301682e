//! Legacy program descriptors.
//!
//! A legacy program is a list of blocks. Each block declares variables and
//! holds a flat list of operations that refer to those variables by name.
//! Descriptors are read-only input to the translator.

mod attribute;

use crate::error::Result;
use crate::ir::DataType;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::path::Path;

pub use attribute::LegacyAttribute;

/// Placeholder argument for an output slot the op does not produce.
pub const EMPTY_VAR_NAME: &str = "@EMPTY@";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarType {
    #[default]
    LodTensor,
    SelectedRows,
    LodTensorArray,
    FeedMinibatch,
    FetchList,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDesc {
    pub name: String,
    #[serde(default)]
    pub var_type: VarType,
    #[serde(default)]
    pub dtype: DataType,
    #[serde(default)]
    pub shape: Vec<i64>,
    #[serde(default)]
    pub lod_level: u32,
    #[serde(default)]
    pub persistable: bool,
}

impl VarDesc {
    pub fn tensor(name: impl Into<String>, dtype: DataType, shape: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            var_type: VarType::LodTensor,
            dtype,
            shape,
            lod_level: 0,
            persistable: false,
        }
    }

    pub fn with_var_type(mut self, var_type: VarType) -> Self {
        self.var_type = var_type;
        self
    }

    pub fn persistable(mut self) -> Self {
        self.persistable = true;
        self
    }
}

/// One named group of variable references, e.g. `X: [a, b]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentGroup {
    pub parameter: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDesc {
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(default)]
    pub inputs: Vec<ArgumentGroup>,
    #[serde(default)]
    pub outputs: Vec<ArgumentGroup>,
    #[serde(default)]
    pub attrs: BTreeMap<String, LegacyAttribute>,
}

impl OpDesc {
    pub fn new(op_type: impl Into<String>) -> Self {
        Self {
            op_type: op_type.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_input<I, S>(mut self, parameter: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs.push(ArgumentGroup {
            parameter: parameter.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_output<I, S>(mut self, parameter: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.push(ArgumentGroup {
            parameter: parameter.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<LegacyAttribute>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Every input variable name, in group order.
    pub fn input_argument_names(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .flat_map(|group| group.arguments.iter().map(String::as_str))
            .collect()
    }

    /// Every output variable name, in group order.
    pub fn output_argument_names(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .flat_map(|group| group.arguments.iter().map(String::as_str))
            .collect()
    }

    pub fn has_input(&self, parameter: &str) -> bool {
        self.inputs.iter().any(|group| group.parameter == parameter)
    }

    /// Arguments of an input group; empty when the group is absent.
    pub fn input(&self, parameter: &str) -> &[String] {
        self.inputs
            .iter()
            .find(|group| group.parameter == parameter)
            .map(|group| group.arguments.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_output(&self, parameter: &str) -> bool {
        self.outputs.iter().any(|group| group.parameter == parameter)
    }

    /// Arguments of an output group; empty when the group is absent.
    pub fn output(&self, parameter: &str) -> &[String] {
        self.outputs
            .iter()
            .find(|group| group.parameter == parameter)
            .map(|group| group.arguments.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn attr(&self, name: &str) -> Option<&LegacyAttribute> {
        self.attrs.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDesc {
    pub idx: usize,
    #[serde(default)]
    pub parent_idx: Option<usize>,
    #[serde(default)]
    pub vars: Vec<VarDesc>,
    #[serde(default)]
    pub ops: Vec<OpDesc>,
}

impl BlockDesc {
    pub fn new(idx: usize, parent_idx: Option<usize>) -> Self {
        Self {
            idx,
            parent_idx,
            vars: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn var(&self, name: &str) -> Option<&VarDesc> {
        self.vars.iter().find(|var| var.name == name)
    }

    pub fn add_var(&mut self, var: VarDesc) {
        match self.vars.iter_mut().find(|existing| existing.name == var.name) {
            Some(existing) => *existing = var,
            None => self.vars.push(var),
        }
    }

    pub fn append_op(&mut self, op: OpDesc) {
        self.ops.push(op);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDesc {
    pub blocks: Vec<BlockDesc>,
}

impl Default for ProgramDesc {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramDesc {
    /// A program with an empty global block.
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockDesc::new(0, None)],
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read legacy program {}", path.display()))?;
        let program: ProgramDesc = serde_json::from_str(&source)
            .wrap_err_with(|| format!("failed to parse legacy program {}", path.display()))?;
        Ok(program)
    }

    pub fn global_block_mut(&mut self) -> &mut BlockDesc {
        if self.blocks.is_empty() {
            self.blocks.push(BlockDesc::new(0, None));
        }
        &mut self.blocks[0]
    }

    pub fn block(&self, idx: usize) -> Option<BlockRef<'_>> {
        self.blocks
            .iter()
            .position(|block| block.idx == idx)
            .map(|pos| BlockRef {
                program: self,
                desc: &self.blocks[pos],
            })
    }

    pub fn global_block(&self) -> Option<BlockRef<'_>> {
        self.block(0)
    }
}

/// A block together with the program it belongs to, so that variable
/// lookups can walk enclosing blocks.
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    program: &'a ProgramDesc,
    desc: &'a BlockDesc,
}

impl<'a> BlockRef<'a> {
    pub fn desc(&self) -> &'a BlockDesc {
        self.desc
    }

    pub fn idx(&self) -> usize {
        self.desc.idx
    }

    pub fn parent(&self) -> Option<BlockRef<'a>> {
        self.desc
            .parent_idx
            .filter(|parent| *parent != self.desc.idx)
            .and_then(|parent| self.program.block(parent))
    }

    pub fn find_var_recursive(&self, name: &str) -> Option<&'a VarDesc> {
        let mut current = Some(*self);
        while let Some(block) = current {
            if let Some(var) = block.desc.var(name) {
                return Some(var);
            }
            current = block.parent();
        }
        trace!("variable {} not found from block {}", name, self.desc.idx);
        None
    }

    pub fn ops(&self) -> impl Iterator<Item = OpRef<'a>> + 'a {
        let block = *self;
        self.desc.ops.iter().map(move |desc| OpRef { desc, block })
    }
}

/// An operation descriptor with a back-reference to its enclosing block.
#[derive(Debug, Clone, Copy)]
pub struct OpRef<'a> {
    desc: &'a OpDesc,
    block: BlockRef<'a>,
}

impl<'a> OpRef<'a> {
    pub fn new(desc: &'a OpDesc, block: BlockRef<'a>) -> Self {
        Self { desc, block }
    }

    pub fn desc(&self) -> &'a OpDesc {
        self.desc
    }

    pub fn block(&self) -> BlockRef<'a> {
        self.block
    }
}

impl Deref for OpRef<'_> {
    type Target = OpDesc;

    fn deref(&self) -> &OpDesc {
        self.desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_program() -> ProgramDesc {
        let mut program = ProgramDesc::new();
        program
            .global_block_mut()
            .add_var(VarDesc::tensor("w", DataType::Float32, vec![4, 4]).persistable());
        let mut sub = BlockDesc::new(1, Some(0));
        sub.add_var(VarDesc::tensor("tmp", DataType::Float32, vec![4]));
        program.blocks.push(sub);
        program
    }

    #[test]
    fn finds_variables_in_enclosing_blocks() {
        let program = nested_program();
        let sub = program.block(1).unwrap();
        assert_eq!(sub.find_var_recursive("tmp").unwrap().shape, vec![4]);
        assert!(sub.find_var_recursive("w").unwrap().persistable);
        assert!(sub.find_var_recursive("missing").is_none());
        assert!(program.global_block().unwrap().find_var_recursive("tmp").is_none());
    }

    #[test]
    fn absent_groups_read_as_empty() {
        let op = OpDesc::new("scale")
            .with_input("X", ["x"])
            .with_output("Out", Vec::<String>::new());
        assert!(op.has_output("Out"));
        assert!(op.output("Out").is_empty());
        assert!(!op.has_input("ScaleTensor"));
        assert!(op.input("ScaleTensor").is_empty());
        assert_eq!(op.input_argument_names(), vec!["x"]);
    }

    #[test]
    fn parses_json_program() {
        let source = r#"{
            "blocks": [{
                "idx": 0,
                "vars": [{"name": "x", "dtype": "float32", "shape": [2, 3]}],
                "ops": [{
                    "type": "feed",
                    "outputs": [{"parameter": "Out", "arguments": ["x"]}],
                    "attrs": {"col": {"type": "int", "value": 0}}
                }]
            }]
        }"#;
        let program = ProgramDesc::from_json_str(source).unwrap();
        let block = program.global_block().unwrap();
        let op = block.ops().next().unwrap();
        assert_eq!(op.op_type(), "feed");
        assert_eq!(op.attr("col").and_then(LegacyAttribute::as_i32), Some(0));
        assert_eq!(op.block().find_var_recursive("x").unwrap().dtype, DataType::Float32);
    }
}
