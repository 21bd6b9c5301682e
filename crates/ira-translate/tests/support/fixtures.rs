use ira_core::compat::OpCompatTable;
use ira_core::ir::IrContext;
use ira_core::legacy::ProgramDesc;
use ira_core::schema::SchemaFile;
use ira_translate::{ProgramTranslator, TranslateOptions, TranslationTables};

pub const SCHEMAS: &str = r#"
[ops."pd.matmul"]
inputs = [
    { name = "x", kind = "tensor" },
    { name = "y", kind = "tensor" },
]
attributes = [
    { name = "transpose_x", type = "bool" },
    { name = "transpose_y", type = "bool" },
]
outputs = [{ name = "out", kind = "tensor" }]

[ops."pd.add"]
inputs = [
    { name = "x", kind = "tensor" },
    { name = "y", kind = "tensor" },
]
outputs = [{ name = "out", kind = "tensor" }]

[ops."pd.relu"]
inputs = [{ name = "x", kind = "tensor" }]
outputs = [{ name = "out", kind = "tensor" }]

[ops."pd.split"]
inputs = [
    { name = "x", kind = "tensor" },
    { name = "sections", kind = "int_array" },
    { name = "axis", kind = { scalar = "int32" } },
]
outputs = [{ name = "out", kind = "tensor_list" }]

[ops."pd.concat"]
inputs = [
    { name = "x", kind = "tensor_list" },
    { name = "axis", kind = { scalar = "int32" } },
]
outputs = [{ name = "out", kind = "tensor" }]
"#;

pub const COMPAT: &str = r#"
[op_names]
matmul_v2 = "matmul"
elementwise_add = "add"

[arg_names.matmul_v2]
transpose_x = "trans_x"
transpose_y = "trans_y"

[mutable_attributes.split]
sections = ["SectionsTensorList"]
axis = ["AxisTensor"]

[mutable_attributes.concat]
axis = ["AxisTensor"]
"#;

/// feed -> matmul_v2 (persistable weight) -> elementwise_add -> relu -> fetch
pub const MLP_PROGRAM: &str = r#"{
  "blocks": [{
    "idx": 0,
    "vars": [
      {"name": "feed", "var_type": "feed_minibatch", "persistable": true},
      {"name": "fetch", "var_type": "fetch_list", "persistable": true},
      {"name": "x", "dtype": "float32", "shape": [-1, 4]},
      {"name": "w", "dtype": "float32", "shape": [4, 8], "persistable": true},
      {"name": "b", "dtype": "float32", "shape": [8], "persistable": true},
      {"name": "h", "dtype": "float32", "shape": [-1, 8]},
      {"name": "h2", "dtype": "float32", "shape": [-1, 8]},
      {"name": "y", "dtype": "float32", "shape": [-1, 8]}
    ],
    "ops": [
      {"type": "feed",
       "inputs": [{"parameter": "X", "arguments": ["feed"]}],
       "outputs": [{"parameter": "Out", "arguments": ["x"]}],
       "attrs": {"col": {"type": "int", "value": 0}}},
      {"type": "matmul_v2",
       "inputs": [{"parameter": "X", "arguments": ["x"]}, {"parameter": "Y", "arguments": ["w"]}],
       "outputs": [{"parameter": "Out", "arguments": ["h"]}],
       "attrs": {"trans_x": {"type": "bool", "value": false}, "trans_y": {"type": "bool", "value": false}}},
      {"type": "elementwise_add",
       "inputs": [{"parameter": "X", "arguments": ["h"]}, {"parameter": "Y", "arguments": ["b"]}],
       "outputs": [{"parameter": "Out", "arguments": ["h2"]}],
       "attrs": {"axis": {"type": "int", "value": -1}}},
      {"type": "relu",
       "inputs": [{"parameter": "X", "arguments": ["h2"]}],
       "outputs": [{"parameter": "Out", "arguments": ["y"]}]},
      {"type": "fetch_v2",
       "inputs": [{"parameter": "X", "arguments": ["y"]}],
       "outputs": [{"parameter": "Out", "arguments": ["fetch"]}],
       "attrs": {"col": {"type": "int", "value": 0}}}
    ]
  }]
}"#;

/// feed -> split into two halves -> concat the halves back in reverse order
pub const SPLIT_CONCAT_PROGRAM: &str = r#"{
  "blocks": [{
    "idx": 0,
    "vars": [
      {"name": "x", "dtype": "float32", "shape": [4, 6]},
      {"name": "lo", "dtype": "float32", "shape": [4, 3]},
      {"name": "hi", "dtype": "float32", "shape": [4, 3]},
      {"name": "y", "dtype": "float32", "shape": [4, 6]}
    ],
    "ops": [
      {"type": "feed",
       "inputs": [{"parameter": "X", "arguments": ["feed"]}],
       "outputs": [{"parameter": "Out", "arguments": ["x"]}]},
      {"type": "split",
       "inputs": [{"parameter": "X", "arguments": ["x"]}],
       "outputs": [{"parameter": "Out", "arguments": ["lo", "hi"]}],
       "attrs": {"sections": {"type": "ints", "value": [3, 3]}, "axis": {"type": "int", "value": 1}}},
      {"type": "concat",
       "inputs": [{"parameter": "X", "arguments": ["hi", "lo"]}],
       "outputs": [{"parameter": "Out", "arguments": ["y"]}],
       "attrs": {"axis": {"type": "int", "value": 1}}}
    ]
  }]
}"#;

pub fn ir_context() -> IrContext {
    let mut ir = IrContext::new();
    SchemaFile::from_toml_str(SCHEMAS)
        .expect("fixture schemas should parse")
        .register_into(&mut ir);
    ir
}

pub fn tables() -> TranslationTables {
    let compat = OpCompatTable::builtin()
        .merge(OpCompatTable::from_toml_str(COMPAT).expect("fixture compat table should parse"));
    TranslationTables::with_compat(compat)
}

pub fn translator(parameters: bool) -> ProgramTranslator {
    ProgramTranslator::new(ir_context(), tables()).with_options(TranslateOptions { parameters })
}

pub fn program(source: &str) -> ProgramDesc {
    ProgramDesc::from_json_str(source).expect("fixture program should parse")
}
