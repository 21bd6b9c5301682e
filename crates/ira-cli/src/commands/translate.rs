use super::TableArgs;
use crate::cli::{CliConfig, OutputFormat};
use crate::{CliError, Result};
use ira_core::legacy::ProgramDesc;
use ira_core::pretty::pretty;
use ira_translate::{ProgramTranslator, Translation, TranslationStats, TranslationTables};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the translate command
#[derive(Debug, Clone, clap::Args)]
pub struct TranslateArgs {
    /// Legacy program (JSON)
    pub input: PathBuf,

    #[command(flatten)]
    pub tables: TableArgs,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print translation statistics after the program
    #[arg(long)]
    pub stats: bool,

    /// Do not synthesize parameter load/store operations
    #[arg(long)]
    pub no_parameters: bool,
}

/// Execute the translate command
pub fn translate_command(args: TranslateArgs, config: &CliConfig) -> Result<()> {
    if !args.input.exists() {
        return Err(CliError::InvalidInput(format!(
            "Input file {} does not exist",
            args.input.display()
        )));
    }

    let program = ProgramDesc::from_path(&args.input)?;
    let ir = args.tables.load_ir(config)?;
    let compat = args.tables.load_compat(config)?;

    let mut options = config.translate;
    if args.no_parameters {
        options.parameters = false;
    }
    let translator =
        ProgramTranslator::new(ir, TranslationTables::with_compat(compat)).with_options(options);
    let translation = translator.translate(&program)?;
    info!(
        "translated {} ops from {}",
        translation.stats.translated_ops,
        args.input.display()
    );

    let format = args.format.unwrap_or(config.output.format);
    let rendered = render(&translation, format, config, args.stats)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

fn render(
    translation: &Translation,
    format: OutputFormat,
    config: &CliConfig,
    with_stats: bool,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let mut out = pretty(&translation.program, config.output.pretty.clone()).to_string();
            if with_stats {
                out.push_str(&format_stats(&translation.stats));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = if with_stats {
                serde_json::to_string_pretty(translation)?
            } else {
                serde_json::to_string_pretty(&translation.program)?
            };
            out.push('\n');
            Ok(out)
        }
    }
}

fn format_stats(stats: &TranslationStats) -> String {
    format!(
        "translated ops: {}\n\
         slices: {}\n\
         combines: {}\n\
         constants: {}\n\
         parameters: {}\n\
         empty attributes: {}\n",
        stats.translated_ops,
        stats.slices,
        stats.combines,
        stats.constants,
        stats.parameters,
        stats.empty_attributes
    )
}
