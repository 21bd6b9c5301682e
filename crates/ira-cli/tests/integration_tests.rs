//! Integration tests for the ira CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMAS: &str = r#"
[ops."pd.relu"]
inputs = [{ name = "x", kind = "tensor" }]
outputs = [{ name = "out", kind = "tensor" }]

[ops."pd.scale"]
inputs = [
    { name = "x", kind = "tensor" },
    { name = "scale", kind = { scalar = "float" } },
]
attributes = [{ name = "bias", type = "float" }]
outputs = [{ name = "out", kind = "tensor" }]
"#;

const COMPAT: &str = r#"
[mutable_attributes.scale]
scale = ["ScaleTensor"]
"#;

const PROGRAM: &str = r#"{
  "blocks": [{
    "idx": 0,
    "vars": [
      {"name": "x", "dtype": "float32", "shape": [2, 3]},
      {"name": "y", "dtype": "float32", "shape": [2, 3]},
      {"name": "z", "dtype": "float32", "shape": [2, 3]}
    ],
    "ops": [
      {"type": "feed",
       "inputs": [{"parameter": "X", "arguments": ["feed"]}],
       "outputs": [{"parameter": "Out", "arguments": ["x"]}]},
      {"type": "relu",
       "inputs": [{"parameter": "X", "arguments": ["x"]}],
       "outputs": [{"parameter": "Out", "arguments": ["y"]}]},
      {"type": "scale",
       "inputs": [{"parameter": "X", "arguments": ["y"]}],
       "outputs": [{"parameter": "Out", "arguments": ["z"]}],
       "attrs": {"scale": {"type": "float", "value": 2.0}, "bias": {"type": "float", "value": 0.5}}},
      {"type": "fetch_v2",
       "inputs": [{"parameter": "X", "arguments": ["z"]}],
       "outputs": [{"parameter": "Out", "arguments": ["fetch"]}]}
    ]
  }]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ira.toml"), "").unwrap();
        fs::write(dir.path().join("ops.toml"), SCHEMAS).unwrap();
        fs::write(dir.path().join("compat.toml"), COMPAT).unwrap();
        fs::write(dir.path().join("model.json"), PROGRAM).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn ira(&self) -> Command {
        let mut cmd = Command::cargo_bin("ira").unwrap();
        cmd.arg("--config").arg(self.path("ira.toml"));
        cmd
    }

    fn translate(&self) -> Command {
        let mut cmd = self.ira();
        cmd.arg("translate")
            .arg(self.path("model.json"))
            .arg("--schemas")
            .arg(self.path("ops.toml"))
            .arg("--compat")
            .arg(self.path("compat.toml"));
        cmd
    }
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("ira").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("translate"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("ira").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_translate_pretty() {
    let ws = Workspace::new();
    ws.translate()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ir::Program {"))
        .stdout(predicate::str::contains(
            "%1 = \"pd.relu\"(%0) {} : (tensor<2x3xf32>) -> (tensor<2x3xf32>)",
        ))
        .stdout(predicate::str::contains("%2 = \"pd.full\"() {dtype: dtype(f32)"))
        .stdout(predicate::str::contains(
            "%3 = \"pd.scale\"(%1, %2) {bias: 0.5f32}",
        ))
        .stdout(predicate::str::contains("\"pd.fetch\"(%3) {name: \"z\"}"));
}

#[test]
fn test_translate_stats() {
    let ws = Workspace::new();
    ws.translate()
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("translated ops: 4"))
        .stdout(predicate::str::contains("constants: 1"));
}

#[test]
fn test_translate_json_to_file() {
    let ws = Workspace::new();
    let output = ws.path("out.json");
    ws.translate()
        .arg("--format")
        .arg("json")
        .arg("--stats")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["stats"]["translated_ops"], 4);
    assert_eq!(json["program"]["ops"][1]["name"], "pd.relu");
}

#[test]
fn test_translate_missing_schema() {
    let ws = Workspace::new();
    ws.ira()
        .arg("translate")
        .arg(ws.path("model.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("pd.relu"))
        .stderr(predicate::str::contains("ira::missing_schema"));
}

#[test]
fn test_translate_missing_file() {
    let ws = Workspace::new();
    ws.ira()
        .arg("translate")
        .arg(ws.path("nonexistent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_config_supplies_tables() {
    let ws = Workspace::new();
    let config = format!(
        "[tables]\nschemas = [{:?}]\ncompat = [{:?}]\n\n[output]\nformat = \"json\"\n",
        ws.path("ops.toml"),
        ws.path("compat.toml")
    );
    fs::write(ws.path("ira.toml"), config).unwrap();

    ws.ira()
        .arg("translate")
        .arg(ws.path("model.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"pd.scale\""));
}

#[test]
fn test_schemas_lists_builtin_ops() {
    let ws = Workspace::new();
    ws.ira()
        .arg("schemas")
        .arg("--schemas")
        .arg(ws.path("ops.toml"))
        .arg("--slots")
        .assert()
        .success()
        .stdout(predicate::str::contains("builtin.combine"))
        .stdout(predicate::str::contains(
            "pd.scale(x, scale: scalar) {bias} -> (out)",
        ));
}

#[test]
fn test_cli_invalid_command() {
    let mut cmd = Command::cargo_bin("ira").unwrap();
    cmd.arg("invalid_command");
    cmd.assert().failure();
}
