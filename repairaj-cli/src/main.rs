mod config;
mod prompt;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use prompt::TerminalChooser;
use repairaj_core::RepairError;
use repairaj_core::adapters::{DirRootResolver, FsProject, PresetChooser, TracingSink};
use repairaj_core::pipeline::{
    apply_plan, detect_data_pack, list_models, plan_repair, preview_patch,
};
use repairaj_core::ports::{Chooser, DiagnosticSink, RepairEvent, RootResolver};
use repairaj_core::settings::RepairSettings;
use repairaj_types::{RepairReport, ToolInfo};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "repair-aj",
    version,
    about = "Regenerates the tag files and on_load function of an Animated Java export."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite the global tags and one model's on_load function.
    Repair(RepairArgs),
    /// Report whether the project holds an Animated Java export.
    Status(ProjectArgs),
    /// List the models the repair would offer.
    ListModels(ListModelsArgs),
}

#[derive(Debug, Parser)]
struct ProjectArgs {
    /// Project root (default: current directory).
    #[arg(long, env = "REPAIR_AJ_ROOT")]
    project_root: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct RepairArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Model to repair. Prompts when neither this nor the config names one.
    #[arg(long)]
    model: Option<String>,

    /// Print the patch that would be applied and write nothing.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListModelsArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl ProjectArgs {
    fn resolver(&self) -> DirRootResolver {
        match &self.project_root {
            Some(p) => DirRootResolver::new(Some(p.clone())),
            None => DirRootResolver::current_dir(),
        }
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Repair(args) => cmd_repair(args),
        Command::Status(args) => cmd_status(args),
        Command::ListModels(args) => cmd_list_models(args),
    }
}

fn cmd_repair(args: RepairArgs) -> anyhow::Result<ExitCode> {
    let resolver = args.project.resolver();
    let sink = TracingSink;

    let file_config = match resolver.project_root() {
        Some(root) => config::load_or_default(&root).context("load repair-aj.toml config")?,
        None => config::RepairAjConfig::default(),
    };
    let merged = ConfigMerger::new(file_config).merge_repair_args(args.model, args.dry_run);
    debug!("merged config: {:?}", merged);

    let settings = RepairSettings {
        dry_run: merged.dry_run,
        ..RepairSettings::default()
    };
    let chooser: Box<dyn Chooser> = match merged.model {
        Some(model) => Box::new(PresetChooser::new(model)),
        None => Box::new(TerminalChooser),
    };

    let fs = FsProject;
    let outcome = plan_repair(&settings, &resolver, &fs, chooser.as_ref(), &sink).and_then(|plan| {
        let patch = if settings.dry_run {
            Some(preview_patch(&plan, &fs)?)
        } else {
            None
        };
        apply_plan(&plan, &settings, &fs, &sink, tool_info()).map(|report| (report, patch))
    });

    match outcome {
        Ok((report, patch)) => {
            print_repair(&report, patch.as_deref(), args.format)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_failure(e, &sink)),
    }
}

fn cmd_status(args: ProjectArgs) -> anyhow::Result<ExitCode> {
    let Some(root) = args.resolver().project_root() else {
        eprintln!("error: {}", RepairError::NoWorkspace);
        return Ok(ExitCode::from(1));
    };

    if detect_data_pack(&FsProject, &root) {
        println!("Repair AJ: Animated Java export found in {}", root);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("No AnimatedJava directory in {}", root);
        Ok(ExitCode::from(1))
    }
}

fn cmd_list_models(args: ListModelsArgs) -> anyhow::Result<ExitCode> {
    let sink = TracingSink;
    match list_models(&args.project.resolver(), &FsProject, &sink) {
        Ok(models) => {
            match args.format {
                OutputFormat::Text => {
                    for m in &models {
                        println!("{m}");
                    }
                }
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&models).context("serialize models")?
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Ok(report_failure(e, &sink)),
    }
}

/// Turns a pipeline error into the user notification and exit code.
fn report_failure(err: RepairError, sink: &dyn DiagnosticSink) -> ExitCode {
    if err.is_cancelled() {
        debug!("repair cancelled");
    } else if err.is_user_facing() {
        eprintln!("error: {err}");
    } else {
        eprintln!("error: unexpected failure: {err}");
        if let RepairError::Unexpected(inner) = &err {
            sink.record(&RepairEvent::Failed {
                detail: format!("{:?}", inner),
            });
        }
    }
    ExitCode::from(err.exit_code())
}

fn print_repair(
    report: &RepairReport,
    patch: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(report).context("serialize report")?;
            println!("{s}");
        }
        OutputFormat::Text => {
            if let Some(patch) = patch {
                print!("{patch}");
                println!(
                    "dry-run: {} of {} files would change for model `{}`",
                    report.files_changed(),
                    report.files.len(),
                    report.model
                );
            } else {
                println!(
                    "repaired model `{}` ({} animations, {} of {} files changed)",
                    report.model,
                    report.animations.len(),
                    report.files_changed(),
                    report.files.len()
                );
            }
        }
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "repair-aj".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
