use chrono::SecondsFormat;
use qualis_core::{Method, Report, Template};
use qualis_eval::{
    CheckOptions, Grade, compare_latest, findings_to_csv, fleet_summary, latest_report,
    most_errors, parse_methods, quality_score, render_report, run_validation, trend,
    validation_status,
};
use qualis_store::atomic::write_bytes_atomic;
use qualis_store::{DatasetRegistry, JsonFileStore, ReportStore, TemplateStore};

use crate::dataset::load_dataset;
use crate::workspace::{WorkspacePaths, WorkspaceSettings, new_template_id};
use crate::{
    CliError, DatasetsCommand, OutputFormat, ReportsCommand, TemplatesCommand, ValidateArgs,
};

pub(crate) struct Context {
    pub paths: WorkspacePaths,
    pub settings: WorkspaceSettings,
    pub store: JsonFileStore,
}

impl Context {
    pub fn open(paths: WorkspacePaths, settings: WorkspaceSettings) -> Self {
        let store = JsonFileStore::new(paths.store_dir(&settings.store_dir));
        Self {
            paths,
            settings,
            store,
        }
    }
}

pub(crate) async fn validate(ctx: &Context, args: ValidateArgs) -> Result<(), CliError> {
    let dataset = load_dataset(&args.dataset)?;
    let options = check_options(
        &ctx.settings.checks,
        &args.lookups,
        &args.patterns,
        args.ignore_case,
    )?;

    let methods = if !args.methods.is_empty() {
        parse_methods(&args.methods)?
    } else if let Some(id) = &args.template {
        ctx.store.get_template(id).await?.validation_methods
    } else {
        ctx.settings.default_methods.clone()
    };

    let report = run_validation(&ctx.store, &dataset, &methods, &options).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report_summary(&report);
    }
    Ok(())
}

/// Merge `--lookup`/`--pattern` rules over the configured check options.
pub(crate) fn check_options(
    base: &CheckOptions,
    lookups: &[String],
    patterns: &[String],
    ignore_case: bool,
) -> Result<CheckOptions, CliError> {
    let mut options = base.clone();
    for rule in lookups {
        let (column, values) = split_assignment(rule, "--lookup")?;
        let allowed = values
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if allowed.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "--lookup {rule}: no allowed values"
            )));
        }
        options.lookups.insert(column, allowed);
    }
    for rule in patterns {
        let (column, pattern) = split_assignment(rule, "--pattern")?;
        options.patterns.insert(column, pattern.to_string());
    }
    if ignore_case {
        options.lookup_case_insensitive = true;
    }
    Ok(options)
}

fn split_assignment<'a>(rule: &'a str, flag: &str) -> Result<(String, &'a str), CliError> {
    match rule.split_once('=') {
        Some((column, rest)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), rest))
        }
        _ => Err(CliError::InvalidArgument(format!(
            "{flag} expects COLUMN=VALUE, got '{rule}'"
        ))),
    }
}

pub(crate) async fn reports(ctx: &Context, command: ReportsCommand) -> Result<(), CliError> {
    match command {
        ReportsCommand::List { dataset } => {
            let reports = ctx.store.list().await?;
            println!("ID\tTIMESTAMP\tDATASET\tPASS\tFAIL\tWARNING\tINFO\tSCORE");
            for report in reports
                .iter()
                .filter(|report| dataset.as_deref().is_none_or(|id| report.dataset_id == id))
            {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.1}",
                    report.id,
                    timestamp(report),
                    report.dataset_name,
                    report.summary.pass,
                    report.summary.fail,
                    report.summary.warning,
                    report.summary.info,
                    quality_score(&report.summary)
                );
            }
        }
        ReportsCommand::Show { id, format } => {
            let report = ctx.store.get(&id).await?;
            match format {
                OutputFormat::Markdown => println!(
                    "{}",
                    render_report(&report, ctx.settings.max_findings_per_category)
                ),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        ReportsCommand::Delete { id } => {
            if ctx.store.delete(&id).await {
                tracing::info!(event = "report_deleted", report_id = %id);
                println!("deleted report {id}");
            } else {
                println!("report {id} not found");
            }
        }
        ReportsCommand::Export { id, out } => {
            let report = ctx.store.get(&id).await?;
            let csv = findings_to_csv(&report.results)?;
            match out {
                Some(path) => {
                    write_bytes_atomic(&path, csv.as_bytes())?;
                    tracing::info!(event = "report_exported", report_id = %id, path = %path.display());
                    println!("exported {} findings to {}", report.results.len(), path.display());
                }
                None => print!("{csv}"),
            }
        }
        ReportsCommand::Compare => {
            let reports = ctx.store.list().await?;
            let comparison = compare_latest(&reports)?;
            println!(
                "latest:   {} ({})",
                comparison.latest_id, comparison.latest_dataset_name
            );
            println!(
                "previous: {} ({})",
                comparison.previous_id, comparison.previous_dataset_name
            );
            println!("fail delta:    {:+}", comparison.fail_delta);
            println!("pass delta:    {:+}", comparison.pass_delta);
            println!("warning delta: {:+}", comparison.warning_delta);
            println!("score delta:   {:+.2}", comparison.score_delta);
        }
        ReportsCommand::Summary => {
            let reports = ctx.store.list().await?;
            let fleet = fleet_summary(&reports);
            println!("reports:        {}", fleet.report_count);
            println!("total checks:   {}", fleet.total_checks);
            println!("total failures: {}", fleet.total_failures);
            println!("total warnings: {}", fleet.total_warnings);
            println!("total info:     {}", fleet.total_info);
            println!("average score:  {:.1}", fleet.average_score);
            if let Some(report) = latest_report(&reports) {
                println!("latest:         {} ({})", report.id, report.dataset_name);
            }
            if let Some(report) = most_errors(&reports) {
                println!(
                    "most failures:  {} ({}, {} failed)",
                    report.id, report.dataset_name, report.summary.fail
                );
            }
        }
        ReportsCommand::Trend { dataset } => {
            let reports = ctx.store.list().await?;
            println!("REPORT\tTIMESTAMP\tSCORE\tPASS\tFAIL\tWARNING");
            for point in trend(&reports, &dataset) {
                println!(
                    "{}\t{}\t{:.1}\t{}\t{}\t{}",
                    point.report_id,
                    point.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                    point.score,
                    point.pass,
                    point.fail,
                    point.warning
                );
            }
        }
    }
    Ok(())
}

pub(crate) async fn status(ctx: &Context, dataset_id: &str) -> Result<(), CliError> {
    let reports = ctx.store.list().await?;
    println!("{dataset_id}: {}", validation_status(&reports, dataset_id));
    Ok(())
}

pub(crate) async fn templates(ctx: &Context, command: TemplatesCommand) -> Result<(), CliError> {
    match command {
        TemplatesCommand::List => {
            for template in ctx.store.list_templates().await? {
                println!(
                    "{}\t{}\t{}",
                    template.id,
                    template.name,
                    method_names(&template.validation_methods)
                );
            }
        }
        TemplatesCommand::Create {
            name,
            description,
            methods,
        } => {
            let methods = parse_methods(&methods)?;
            let template = Template::new(new_template_id(), name, description, methods)?;
            let template = ctx.store.save_template(template).await?;
            tracing::info!(event = "template_saved", template_id = %template.id);
            println!("created template {}", template.id);
        }
        TemplatesCommand::Show { id } => {
            let template = ctx.store.get_template(&id).await?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
        TemplatesCommand::Delete { id } => {
            if ctx.store.delete_template(&id).await {
                println!("deleted template {id}");
            } else {
                println!("template {id} not found");
            }
        }
    }
    Ok(())
}

pub(crate) async fn datasets(ctx: &Context, command: DatasetsCommand) -> Result<(), CliError> {
    match command {
        DatasetsCommand::Publish { dataset } => {
            let dataset = ctx.store.publish_dataset(load_dataset(&dataset)?).await?;
            println!("published {} ({})", dataset.id, dataset.name);
        }
        DatasetsCommand::List => {
            println!("ID\tNAME\tROWS\tCOLUMNS\tSIZE");
            for dataset in ctx.store.list_public_datasets().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    dataset.id,
                    dataset.name,
                    dataset.row_count,
                    dataset.column_count,
                    dataset.size.as_deref().unwrap_or("-")
                );
            }
        }
        DatasetsCommand::Unpublish { id } => {
            if ctx.store.unpublish_dataset(&id).await {
                println!("unpublished {id}");
            } else {
                println!("dataset {id} is not public");
            }
        }
    }
    Ok(())
}

pub(crate) fn methods() {
    for method in Method::ALL {
        println!("{:<20}{:<14}{}", method.as_str(), method.category(), method.description());
    }
}

fn print_report_summary(report: &Report) {
    let score = quality_score(&report.summary);
    println!("report:  {}", report.id);
    println!("dataset: {} ({})", report.dataset_name, report.dataset_id);
    println!(
        "results: {} pass, {} fail, {} warning, {} info",
        report.summary.pass, report.summary.fail, report.summary.warning, report.summary.info
    );
    println!("score:   {score:.1} ({})", Grade::from_score(score));
}

fn method_names(methods: &[Method]) -> String {
    methods
        .iter()
        .map(|method| method.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn timestamp(report: &Report) -> String {
    report.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
