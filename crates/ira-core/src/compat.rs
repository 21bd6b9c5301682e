//! Name compatibility between the legacy vocabulary and target schemas.

use crate::error::Result;
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Read-only lookup table mapping target names back to legacy names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpCompatTable {
    /// Legacy op type -> canonical base name.
    #[serde(default)]
    pub op_names: BTreeMap<String, String>,
    /// Legacy op type -> (target argument or attribute name -> legacy name).
    #[serde(default)]
    pub arg_names: BTreeMap<String, BTreeMap<String, String>>,
    /// Legacy op type -> (mutable attribute slot -> candidate legacy inputs).
    #[serde(default)]
    pub mutable_attributes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl OpCompatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table with the mappings every translation needs.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.map_op("fetch_v2", "fetch");
        table
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read compat table {}", path.display()))?;
        let table: Self = toml::from_str(&source)
            .wrap_err_with(|| format!("failed to parse compat table {}", path.display()))?;
        Ok(table)
    }

    /// Entries of `other` override entries of `self`.
    pub fn merge(mut self, other: OpCompatTable) -> Self {
        self.op_names.extend(other.op_names);
        for (op, names) in other.arg_names {
            self.arg_names.entry(op).or_default().extend(names);
        }
        for (op, attrs) in other.mutable_attributes {
            self.mutable_attributes.entry(op).or_default().extend(attrs);
        }
        self
    }

    pub fn map_op(&mut self, legacy: impl Into<String>, canonical: impl Into<String>) {
        self.op_names.insert(legacy.into(), canonical.into());
    }

    pub fn map_arg(
        &mut self,
        op_type: impl Into<String>,
        target: impl Into<String>,
        legacy: impl Into<String>,
    ) {
        self.arg_names
            .entry(op_type.into())
            .or_default()
            .insert(target.into(), legacy.into());
    }

    pub fn add_mutable_attribute<I, S>(
        &mut self,
        op_type: impl Into<String>,
        attribute: impl Into<String>,
        candidates: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mutable_attributes
            .entry(op_type.into())
            .or_default()
            .insert(
                attribute.into(),
                candidates.into_iter().map(Into::into).collect(),
            );
    }

    /// Canonical base name of a legacy op type; unmapped types keep their name.
    pub fn normalize_op_name(&self, op_type: &str) -> String {
        self.op_names
            .get(op_type)
            .cloned()
            .unwrap_or_else(|| op_type.to_string())
    }

    /// Legacy argument group for a target slot. Unmapped names are converted
    /// from `snake_case` to `CamelCase`; grad arguments of grad ops keep the
    /// mapping of their forward name and turn `_grad` into `@GRAD`.
    pub fn legacy_arg_name(&self, op_type: &str, arg_name: &str) -> String {
        let is_grad_op = op_type.contains("grad");
        if is_grad_op {
            if let Some(pos) = arg_name.find("_grad") {
                let mut legacy = self.legacy_arg_name(op_type, &arg_name[..pos]);
                legacy.push_str(&arg_name[pos..].replace("_grad", "@GRAD"));
                return legacy;
            }
        }
        self.arg_names
            .get(op_type)
            .and_then(|names| names.get(arg_name))
            .cloned()
            .unwrap_or_else(|| underscore_to_camel_case(arg_name))
    }

    /// Legacy attribute name for a target attribute slot; identity when unmapped.
    pub fn legacy_attr_name(&self, op_type: &str, attr_name: &str) -> String {
        self.arg_names
            .get(op_type)
            .and_then(|names| names.get(attr_name))
            .cloned()
            .unwrap_or_else(|| attr_name.to_string())
    }

    pub fn mutable_attributes(&self, op_type: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.mutable_attributes.get(op_type)
    }

    /// Candidate legacy input groups that may carry a mutable attribute.
    pub fn mutable_attribute_candidates(&self, op_type: &str, attribute: &str) -> &[String] {
        self.mutable_attributes
            .get(op_type)
            .and_then(|attrs| attrs.get(attribute))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn underscore_to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_argument_names_are_camel_case() {
        let table = OpCompatTable::new();
        assert_eq!(table.legacy_arg_name("matmul_v2", "x"), "X");
        assert_eq!(table.legacy_arg_name("matmul_v2", "out"), "Out");
        assert_eq!(table.legacy_arg_name("reshape2", "shape_tensor"), "ShapeTensor");
        assert_eq!(table.legacy_attr_name("scale", "bias"), "bias");
    }

    #[test]
    fn grad_arguments_use_grad_marker() {
        let mut table = OpCompatTable::new();
        table.map_arg("matmul_grad", "x", "Input");
        assert_eq!(table.legacy_arg_name("matmul_grad", "x_grad"), "Input@GRAD");
        assert_eq!(table.legacy_arg_name("matmul_grad", "out_grad"), "Out@GRAD");
        assert_eq!(table.legacy_arg_name("matmul", "out_grad"), "OutGrad");
    }

    #[test]
    fn explicit_mappings_win() {
        let mut table = OpCompatTable::builtin();
        table.map_arg("scale", "x", "Input");
        table.add_mutable_attribute("scale", "scale", ["ScaleTensor"]);
        assert_eq!(table.normalize_op_name("fetch_v2"), "fetch");
        assert_eq!(table.normalize_op_name("relu"), "relu");
        assert_eq!(table.legacy_arg_name("scale", "x"), "Input");
        assert_eq!(
            table.mutable_attribute_candidates("scale", "scale"),
            ["ScaleTensor".to_string()]
        );
        assert!(table.mutable_attribute_candidates("scale", "bias").is_empty());
    }

    #[test]
    fn merges_and_parses_toml() {
        let source = r#"
            [op_names]
            matmul_v2 = "matmul"

            [arg_names.reshape2]
            out = "Out"

            [mutable_attributes.reshape2]
            shape = ["ShapeTensor", "Shape"]
        "#;
        let table = OpCompatTable::builtin().merge(OpCompatTable::from_toml_str(source).unwrap());
        assert_eq!(table.normalize_op_name("matmul_v2"), "matmul");
        assert_eq!(table.normalize_op_name("fetch_v2"), "fetch");
        assert_eq!(
            table.mutable_attribute_candidates("reshape2", "shape"),
            ["ShapeTensor".to_string(), "Shape".to_string()]
        );
    }
}
