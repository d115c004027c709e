use std::env;
use std::path::PathBuf;

use qualis_core::{Dataset, Method};
use qualis_eval::{CheckOptions, RunContext, ValidationEngine, parse_methods, render_report};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut dataset_path: Option<PathBuf> = None;
    let mut method_ids = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--method" => method_ids.extend(args.next()),
            _ => {
                if dataset_path.is_none() {
                    dataset_path = Some(PathBuf::from(arg));
                } else {
                    return Err("unexpected argument".into());
                }
            }
        }
    }

    let dataset_path = dataset_path.ok_or("missing dataset path")?;
    let dataset: Dataset = serde_json::from_str(&std::fs::read_to_string(&dataset_path)?)?;
    let methods = if method_ids.is_empty() {
        Method::ALL.to_vec()
    } else {
        parse_methods(&method_ids)?
    };

    let engine = ValidationEngine::new(CheckOptions::default());
    let report = match engine.evaluate(&dataset, &methods, &RunContext::new()) {
        Ok(report) => report,
        Err(qualis_eval::EvalError::InvalidOptions { method, message }) => {
            eprintln!("{method}: {message}");
            let configured = methods
                .into_iter()
                .filter(|method| !matches!(method, Method::ValueLookup | Method::RegexPattern))
                .collect::<Vec<_>>();
            engine.evaluate(&dataset, &configured, &RunContext::new())?
        }
        Err(err) => return Err(err.into()),
    };
    println!("{}", render_report(&report, 20));
    Ok(())
}
