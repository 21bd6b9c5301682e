//! Target SSA IR.
//!
//! A [`Program`] is an append-only list of [`Operation`]s. Each operation
//! produces a fixed number of results; a [`Value`] names one result position of
//! one operation and is never mutated after creation.

mod attribute;
pub mod builtin;
pub mod pretty;
mod ty;

use crate::schema::OpSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

pub use attribute::{Attribute, AttributeMap};
pub use ty::{DataType, Place, TensorType, Type};

/// Interned operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpKind(u32);

#[derive(Debug, Clone, PartialEq)]
pub struct OpInfo {
    pub kind: OpKind,
    pub name: String,
    pub schema: OpSchema,
}

/// Registry of operation kinds and their schemas.
#[derive(Debug, Clone)]
pub struct IrContext {
    infos: Vec<OpInfo>,
    by_name: HashMap<String, OpKind>,
}

impl Default for IrContext {
    fn default() -> Self {
        Self::new()
    }
}

impl IrContext {
    /// A context with the builtin and synthesized dialect operations registered.
    pub fn new() -> Self {
        let mut ctx = Self::empty();
        builtin::register_builtin_ops(&mut ctx);
        ctx
    }

    pub fn empty() -> Self {
        Self {
            infos: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register (or replace) the schema of an operation kind.
    pub fn register_op(&mut self, name: impl Into<String>, schema: OpSchema) -> OpKind {
        let name = name.into();
        if let Some(kind) = self.by_name.get(&name).copied() {
            debug!("replacing schema of {}", name);
            self.infos[kind.0 as usize].schema = schema;
            return kind;
        }
        let kind = OpKind(self.infos.len() as u32);
        self.infos.push(OpInfo {
            kind,
            name: name.clone(),
            schema,
        });
        self.by_name.insert(name, kind);
        kind
    }

    pub fn lookup_op(&self, name: &str) -> Option<&OpInfo> {
        self.by_name
            .get(name)
            .map(|kind| &self.infos[kind.0 as usize])
    }

    pub fn op_info(&self, kind: OpKind) -> &OpInfo {
        &self.infos[kind.0 as usize]
    }

    /// Registered operation names in sorted order.
    pub fn registered_ops(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.infos.iter().map(|info| info.name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Position of an operation inside its program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpId(pub u32);

impl Display for OpId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Handle to one result of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Value {
    pub op: OpId,
    pub index: u32,
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.index == 0 {
            write!(f, "{}", self.op)
        } else {
            write!(f, "{}#{}", self.op, self.index)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OpKind,
    pub name: String,
    /// Consumed values; `None` for an absent optional input.
    pub operands: Vec<Option<Value>>,
    pub attributes: AttributeMap,
    /// Produced types; `None` for an absent optional output.
    pub result_types: Vec<Option<Type>>,
}

impl Operation {
    pub fn create(
        info: &OpInfo,
        operands: Vec<Option<Value>>,
        attributes: AttributeMap,
        result_types: Vec<Option<Type>>,
    ) -> Self {
        Self {
            kind: info.kind,
            name: info.name.clone(),
            operands,
            attributes,
            result_types,
        }
    }

    pub fn num_results(&self) -> usize {
        self.result_types.len()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name).and_then(Option::as_ref)
    }
}

/// A single flat block of target operations. Owns every operation and,
/// through them, every value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    ops: Vec<Operation>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, op: Operation) -> OpId {
        let id = OpId(self.ops.len() as u32);
        self.ops.push(op);
        id
    }

    pub fn operation(&self, id: OpId) -> &Operation {
        &self.ops[id.0 as usize]
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpId, &Operation)> {
        self.ops
            .iter()
            .enumerate()
            .map(|(idx, op)| (OpId(idx as u32), op))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Handle to result `index` of `op`.
    pub fn result(&self, op: OpId, index: usize) -> Value {
        debug_assert!(index < self.operation(op).num_results());
        Value {
            op,
            index: index as u32,
        }
    }

    pub fn value_type(&self, value: Value) -> Option<&Type> {
        self.ops
            .get(value.op.0 as usize)
            .and_then(|op| op.result_types.get(value.index as usize))
            .and_then(Option::as_ref)
    }

    /// Operations whose name equals `name`, in program order.
    pub fn ops_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (OpId, &'a Operation)> + 'a {
        self.iter().filter(move |(_, op)| op.name == name)
    }
}
