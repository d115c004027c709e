use qualis_core::Report;
use schemars::schema_for;

fn main() {
    let schema = schema_for!(Report);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
