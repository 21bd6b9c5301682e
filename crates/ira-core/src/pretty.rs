use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};

/// Configuration for pretty-printing the target IR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettyOptions {
    /// Number of spaces to indent per nesting level.
    pub indent_size: usize,
    /// Include operand and result types.
    pub show_types: bool,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent_size: 4,
            show_types: true,
        }
    }
}

/// Formatting context shared across pretty printers.
pub struct PrettyCtx<'a> {
    pub options: &'a PrettyOptions,
    indent: usize,
}

impl<'a> PrettyCtx<'a> {
    pub fn new(options: &'a PrettyOptions) -> Self {
        Self { options, indent: 0 }
    }

    pub fn writeln(&self, f: &mut Formatter<'_>, line: impl AsRef<str>) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", line.as_ref(), indent = self.indent)
    }

    /// Run `body` one nesting level deeper.
    pub fn with_indent<F>(&mut self, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.indent += self.options.indent_size;
        let result = body(self);
        self.indent -= self.options.indent_size;
        result
    }
}

/// Trait implemented by IR nodes that support pretty-printing.
pub trait PrettyPrintable {
    fn fmt_pretty(&self, f: &mut Formatter<'_>, ctx: &mut PrettyCtx<'_>) -> fmt::Result;
}

/// Helper wrapper implementing `Display` by delegating to `PrettyPrintable`.
pub struct PrettyDisplay<'a, T> {
    value: &'a T,
    options: PrettyOptions,
}

impl<'a, T> fmt::Display for PrettyDisplay<'a, T>
where
    T: PrettyPrintable,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut ctx = PrettyCtx::new(&self.options);
        self.value.fmt_pretty(f, &mut ctx)
    }
}

/// Convenience helper to build a `PrettyDisplay` wrapper.
pub fn pretty<T>(value: &T, options: PrettyOptions) -> PrettyDisplay<'_, T>
where
    T: PrettyPrintable,
{
    PrettyDisplay { value, options }
}

pub fn escape_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                use std::fmt::Write as _;
                let _ = write!(out, "\\u{{{:x}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
