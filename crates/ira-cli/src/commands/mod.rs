//! Command implementations for the ira CLI

pub mod schemas;
pub mod translate;

pub use schemas::schemas_command;
pub use translate::translate_command;

use crate::cli::CliConfig;
use crate::Result;
use ira_core::compat::OpCompatTable;
use ira_core::ir::IrContext;
use ira_core::schema::SchemaFile;
use std::path::PathBuf;
use tracing::debug;

/// Schema and compat files named on the command line, added to the ones the
/// configuration lists.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TableArgs {
    /// Schema file (TOML or JSON) to register; may be repeated
    #[arg(long = "schemas", value_name = "FILE")]
    pub schemas: Vec<PathBuf>,

    /// Compatibility table (TOML) merged over the builtin one; may be repeated
    #[arg(long = "compat", value_name = "FILE")]
    pub compat: Vec<PathBuf>,
}

impl TableArgs {
    /// IR context with the builtin ops and every configured schema file.
    pub fn load_ir(&self, config: &CliConfig) -> Result<IrContext> {
        let mut ir = IrContext::new();
        for path in config.tables.schemas.iter().chain(&self.schemas) {
            debug!("loading schemas from {}", path.display());
            SchemaFile::from_path(path)?.register_into(&mut ir);
        }
        Ok(ir)
    }

    pub fn load_compat(&self, config: &CliConfig) -> Result<OpCompatTable> {
        let mut compat = OpCompatTable::builtin();
        for path in config.tables.compat.iter().chain(&self.compat) {
            debug!("loading compat table from {}", path.display());
            compat = compat.merge(OpCompatTable::from_path(path)?);
        }
        Ok(compat)
    }
}
