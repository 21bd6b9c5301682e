// ira-translate: lowering of legacy programs into the target SSA IR
//
// Architecture:
// - translator: value environment, per-slot resolution engines and the
//   operation dispatcher
// - attribute_translator / type_translator: type-directed conversion tables
//   injected into the translator

pub mod attribute_translator;
pub mod translator;
pub mod type_translator;

pub use attribute_translator::AttributeTranslator;
pub use translator::{
    DefiningInfo, OpHandler, OpTranslator, ProgramTranslator, TranslateOptions, Translation,
    TranslationContext, TranslationStats, TranslationTables, ValueEnvironment,
};
pub use type_translator::TypeTranslator;
