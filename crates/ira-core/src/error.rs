use crate::legacy::VarType;
use thiserror::Error;
use std::result;

#[derive(Error, Debug)]
pub enum Error {
    #[error("op `{op_type}` should have a registered schema `{target_name}`")]
    MissingSchema { op_type: String, target_name: String },
    #[error("op `{op_type}` input `{slot}` (legacy `{legacy_name}`) is required but absent")]
    MissingInput {
        op_type: String,
        slot: String,
        legacy_name: String,
    },
    #[error("op `{op_type}` output `{slot}` (legacy `{legacy_name}`) should be optional if it can be empty")]
    MissingOutput {
        op_type: String,
        slot: String,
        legacy_name: String,
    },
    #[error("arg {group}.{name} as input should exist before translating `{op_type}`")]
    UndefinedVariable {
        op_type: String,
        group: String,
        name: String,
    },
    #[error("op `{op_type}` attribute `{legacy_name}` is required to materialize input `{slot}`")]
    MissingAttribute {
        op_type: String,
        slot: String,
        legacy_name: String,
    },
    #[error("op `{op_type}` input `{slot}` cannot be materialized as a constant: {reason}")]
    InvalidConstant {
        op_type: String,
        slot: String,
        reason: String,
    },
    #[error("variable `{name}` is not declared in block {block} or any enclosing block")]
    UnknownVariable { name: String, block: usize },
    #[error("variable `{name}` has type {var_type:?} with no registered type translation")]
    UnsupportedVarType { name: String, var_type: VarType },
    #[error("op `{op_type}` output `{name}` was not assigned a result slot")]
    UnrecordedResult { op_type: String, name: String },
    #[error("Generic error: {0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

// Convert from eyre::Report to our Error type
impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Generic(e.to_string())
    }
}
