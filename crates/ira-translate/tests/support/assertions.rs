use ira_core::ir::{Operation, Program};
use ira_core::pretty::{pretty, PrettyOptions};

pub fn op_names(program: &Program) -> Vec<&str> {
    program
        .operations()
        .iter()
        .map(|op| op.name.as_str())
        .collect()
}

pub fn single_op<'a>(program: &'a Program, name: &'a str) -> &'a Operation {
    let mut matches = program.ops_named(name);
    let (_, op) = matches
        .next()
        .unwrap_or_else(|| panic!("expected an operation named {}", name));
    assert!(matches.next().is_none(), "more than one operation named {}", name);
    op
}

pub fn render(program: &Program) -> String {
    pretty(program, PrettyOptions::default()).to_string()
}
