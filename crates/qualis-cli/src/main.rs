mod commands;
mod dataset;
mod logging;
mod workspace;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use qualis_core::Error as CoreError;
use qualis_eval::EvalError;
use qualis_store::StoreError;
use thiserror::Error;

use crate::logging::init_cli_logging;
use crate::workspace::{WorkspaceError, WorkspacePaths, load_or_create_settings};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "qualis", version, about = "Dataset validation and reporting")]
struct Cli {
    /// Workspace directory holding settings, logs and stored reports.
    #[arg(long, global = true, default_value = ".qualis")]
    root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run validation methods over a dataset and store the report.
    Validate(ValidateArgs),
    /// Inspect, export and compare stored reports.
    #[command(subcommand)]
    Reports(ReportsCommand),
    /// Validation status of a dataset, derived from its latest report.
    Status(StatusArgs),
    /// Manage saved method templates.
    #[command(subcommand)]
    Templates(TemplatesCommand),
    /// Share datasets through the public registry.
    #[command(subcommand)]
    Datasets(DatasetsCommand),
    /// List available validation methods.
    Methods,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Dataset file (.json or .csv).
    dataset: PathBuf,
    /// Method to run; repeatable. Defaults come from the template or settings.
    #[arg(long = "method", value_name = "METHOD")]
    methods: Vec<String>,
    /// Use the methods of a saved template.
    #[arg(long, conflicts_with = "methods")]
    template: Option<String>,
    /// Allowed values for a column, `column=a,b,c`; repeatable.
    #[arg(long = "lookup", value_name = "COLUMN=VALUES")]
    lookups: Vec<String>,
    /// Full-match pattern for a column, `column=REGEX`; repeatable.
    #[arg(long = "pattern", value_name = "COLUMN=REGEX")]
    patterns: Vec<String>,
    /// Compare lookup values ignoring ASCII case.
    #[arg(long, default_value_t = false)]
    ignore_case: bool,
    /// Print the stored report as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ReportsCommand {
    /// List stored reports, oldest first.
    List {
        /// Only reports for this dataset id.
        #[arg(long)]
        dataset: Option<String>,
    },
    /// Show one report.
    Show {
        id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
    /// Delete one report.
    Delete { id: String },
    /// Export a report's findings as CSV.
    Export {
        id: String,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Compare the two most recent reports.
    Compare,
    /// Totals across all stored reports.
    Summary,
    /// Score history of one dataset.
    Trend { dataset: String },
}

#[derive(Args, Debug)]
struct StatusArgs {
    dataset: String,
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Method to include; repeatable.
        #[arg(long = "method", value_name = "METHOD", required = true)]
        methods: Vec<String>,
    },
    Show {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum DatasetsCommand {
    /// Load a dataset file and list it publicly.
    Publish { dataset: PathBuf },
    /// Public datasets ordered by id.
    List,
    /// Withdraw a dataset from the public registry.
    Unpublish { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let paths = WorkspacePaths::new(cli.root);
    paths.ensure_dirs()?;
    let settings = load_or_create_settings(&paths)?;
    init_cli_logging(&paths.cli_log_path(), &settings.log_level)?;

    let ctx = commands::Context::open(paths, settings);
    tracing::debug!(event = "command_started", root = %ctx.paths.root.display());

    let result = match cli.command {
        Command::Validate(args) => commands::validate(&ctx, args).await,
        Command::Reports(command) => commands::reports(&ctx, command).await,
        Command::Status(args) => commands::status(&ctx, &args.dataset).await,
        Command::Templates(command) => commands::templates(&ctx, command).await,
        Command::Datasets(command) => commands::datasets(&ctx, command).await,
        Command::Methods => {
            commands::methods();
            Ok(())
        }
    };
    if let Err(err) = &result {
        tracing::error!(event = "command_failed", error = %err);
    }
    result
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_with_rules() {
        let cli = Cli::try_parse_from([
            "qualis",
            "validate",
            "data.csv",
            "--method",
            "ValueLookup",
            "--lookup",
            "status=active,inactive",
            "--root",
            "/tmp/ws",
        ])
        .expect("parse");

        assert_eq!(cli.root, PathBuf::from("/tmp/ws"));
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.methods, vec!["ValueLookup"]);
        assert_eq!(args.lookups, vec!["status=active,inactive"]);
    }

    #[test]
    fn parses_dataset_registry_commands() {
        let cli = Cli::try_parse_from(["qualis", "datasets", "unpublish", "ds-1"]).expect("parse");
        let Command::Datasets(DatasetsCommand::Unpublish { id }) = cli.command else {
            panic!("expected datasets unpublish");
        };
        assert_eq!(id, "ds-1");
        assert!(Cli::try_parse_from(["qualis", "datasets", "publish"]).is_err());
    }

    #[test]
    fn template_and_methods_conflict() {
        let parsed = Cli::try_parse_from([
            "qualis",
            "validate",
            "data.csv",
            "--method",
            "Basic",
            "--template",
            "tpl_1",
        ]);
        assert!(parsed.is_err());
    }
}
