//! Per-operation translation of legacy blocks into the target IR.
//!
//! A [`TranslationContext`] owns the target program under construction and
//! the [`ValueEnvironment`] mapping legacy variable names to the target values
//! that currently define them. Operations are translated strictly in block
//! order; every bridging operation (slice, combine, constant) is appended to
//! the program before the operation that consumes it.

mod attributes;
mod environment;
mod handlers;
mod inputs;
mod naming;
mod outputs;
mod program;


use crate::attribute_translator::AttributeTranslator;
use crate::type_translator::TypeTranslator;
use ira_core::compat::OpCompatTable;
use ira_core::error::Result;
use ira_core::ir::{AttributeMap, IrContext, OpId, OpInfo, Operation, Program, Type, Value};
use ira_core::legacy::OpRef;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

pub use environment::{DefiningInfo, ValueEnvironment};
pub use program::{ProgramTranslator, TranslateOptions};

/// Translates one legacy operation, returning the operation it created.
pub type OpHandler = fn(&mut TranslationContext<'_>, OpRef<'_>) -> Result<OpId>;

/// Read-only lookup tables consulted during translation.
#[derive(Debug, Clone)]
pub struct TranslationTables {
    pub compat: OpCompatTable,
    pub attributes: AttributeTranslator,
    pub types: TypeTranslator,
}

impl Default for TranslationTables {
    fn default() -> Self {
        Self {
            compat: OpCompatTable::builtin(),
            attributes: AttributeTranslator::new(),
            types: TypeTranslator::new(),
        }
    }
}

impl TranslationTables {
    pub fn with_compat(compat: OpCompatTable) -> Self {
        Self {
            compat,
            ..Self::default()
        }
    }
}

/// Counters describing what a translation produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    pub translated_ops: usize,
    pub slices: usize,
    pub combines: usize,
    pub constants: usize,
    pub parameters: usize,
    pub empty_attributes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub program: Program,
    pub stats: TranslationStats,
}

pub struct TranslationContext<'a> {
    pub(crate) ir: &'a IrContext,
    pub(crate) tables: &'a TranslationTables,
    pub env: ValueEnvironment,
    pub program: Program,
    pub stats: TranslationStats,
}

impl<'a> TranslationContext<'a> {
    pub fn new(ir: &'a IrContext, tables: &'a TranslationTables) -> Self {
        Self {
            ir,
            tables,
            env: ValueEnvironment::new(),
            program: Program::new(),
            stats: TranslationStats::default(),
        }
    }

    pub fn finish(self) -> Translation {
        Translation {
            program: self.program,
            stats: self.stats,
        }
    }

    pub(crate) fn append(
        &mut self,
        info: &OpInfo,
        operands: Vec<Option<Value>>,
        attributes: AttributeMap,
        result_types: Vec<Option<Type>>,
    ) -> OpId {
        let op = Operation::create(info, operands, attributes, result_types);
        let id = self.program.push_back(op);
        trace!("appended {} as {}", info.name, id);
        id
    }
}

/// Dispatches legacy operations to their handlers.
///
/// Ops without a dedicated handler go through the general handler.
#[derive(Debug, Clone)]
pub struct OpTranslator {
    general_handler: OpHandler,
    special_handlers: HashMap<String, OpHandler>,
}

impl Default for OpTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpTranslator {
    pub fn new() -> Self {
        let mut special_handlers: HashMap<String, OpHandler> = HashMap::new();
        special_handlers.insert("feed".to_string(), handlers::feed);
        special_handlers.insert("fetch_v2".to_string(), handlers::fetch);
        Self {
            general_handler: handlers::general,
            special_handlers,
        }
    }

    pub fn register(&mut self, op_type: impl Into<String>, handler: OpHandler) {
        self.special_handlers.insert(op_type.into(), handler);
    }

    pub fn has_special_handler(&self, op_type: &str) -> bool {
        self.special_handlers.contains_key(op_type)
    }

    pub fn handler(&self, op_type: &str) -> OpHandler {
        self.special_handlers
            .get(op_type)
            .copied()
            .unwrap_or(self.general_handler)
    }

    pub fn translate(&self, ctx: &mut TranslationContext<'_>, op: OpRef<'_>) -> Result<OpId> {
        let handler = self.handler(op.op_type());
        let id = handler(ctx, op)?;
        ctx.stats.translated_ops += 1;
        Ok(id)
    }
}
