use ira_core::ir::Value;
use serde::Serialize;
use std::collections::HashMap;

/// How a legacy variable is currently defined in the target program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DefiningInfo {
    /// Produced directly as a singleton value.
    Value(Value),
    /// Element `index` of an aggregate value, not yet sliced out.
    Element { aggregate: Value, index: usize },
}

impl DefiningInfo {
    pub fn value(self) -> Option<Value> {
        match self {
            DefiningInfo::Value(value) => Some(value),
            DefiningInfo::Element { .. } => None,
        }
    }
}

/// Legacy variable name -> defining target value.
///
/// Owned by one translation. Recording a name again overwrites the previous
/// binding, so the environment always reflects the latest definition seen in
/// program order.
#[derive(Debug, Clone, Default)]
pub struct ValueEnvironment {
    bindings: HashMap<String, DefiningInfo>,
}

impl ValueEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<DefiningInfo> {
        self.bindings.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn bind(&mut self, name: impl Into<String>, info: DefiningInfo) -> Option<DefiningInfo> {
        self.bindings.insert(name.into(), info)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
