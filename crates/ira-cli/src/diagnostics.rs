//! Diagnostic and error reporting utilities

use crate::{CliError, Result};
use ira_core::Error as CoreError;
use miette::Diagnostic;
use thiserror::Error;

/// Set up enhanced error reporting with miette
pub fn setup_error_reporting() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .map_err(|e| CliError::Config(format!("Failed to setup error reporting: {}", e)))?;

    Ok(())
}

/// Translation failures rendered with a code and a hint
#[derive(Error, Debug, Diagnostic)]
pub enum TranslateDiagnostic {
    #[error("{message}")]
    #[diagnostic(
        code(ira::missing_schema),
        help("register a schema for the target op with --schemas, or map the legacy name in a compat table")
    )]
    MissingSchema { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(ira::undefined_variable),
        help("every input must be produced by an earlier op, a feed, or a persistable parameter")
    )]
    UndefinedVariable { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(ira::slot_mismatch),
        help("check the argument and attribute name mappings of the compat table")
    )]
    SlotMismatch { message: String },

    #[error("{message}")]
    #[diagnostic(code(ira::translate))]
    Other { message: String },
}

impl From<&CoreError> for TranslateDiagnostic {
    fn from(err: &CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::MissingSchema { .. } => TranslateDiagnostic::MissingSchema { message },
            CoreError::UndefinedVariable { .. } => {
                TranslateDiagnostic::UndefinedVariable { message }
            }
            CoreError::MissingInput { .. }
            | CoreError::MissingOutput { .. }
            | CoreError::MissingAttribute { .. }
            | CoreError::UnrecordedResult { .. } => TranslateDiagnostic::SlotMismatch { message },
            _ => TranslateDiagnostic::Other { message },
        }
    }
}

/// Render a CLI error through miette. Returns false when the error has no
/// diagnostic form and should be logged instead.
pub fn render_cli_error(err: &CliError) -> bool {
    match err {
        CliError::Translate(inner) => {
            let report = miette::Report::new(TranslateDiagnostic::from(inner));
            eprintln!("{:?}", report);
            true
        }
        _ => false,
    }
}
