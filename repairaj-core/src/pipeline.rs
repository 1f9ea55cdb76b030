//! Core repair pipeline.
//!
//! These entry points are I/O-agnostic: all filesystem access and user
//! interaction go through the port traits. Nothing is cached between runs;
//! every plan is derived from the directory tree as it is now.

use crate::discovery::{discover_animations, discover_models};
use crate::error::{RepairError, RepairResult};
use crate::function_file::rewrite_on_load;
use crate::ports::{Choice, Chooser, DiagnosticSink, ProjectFs, RepairEvent, RootResolver};
use crate::settings::RepairSettings;
use crate::{layout, manifest};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use diffy::{DiffOptions, PatchFormatter};
use repairaj_types::{FileWriteResult, RepairReport, TagManifest, ToolInfo, WriteRole};
use sha2::{Digest, Sha256};
use tracing::debug;

/// One whole-file write. `path` is relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub path: Utf8PathBuf,
    pub role: WriteRole,
    pub contents: String,
}

/// Everything a repair will write, derived from one directory snapshot.
#[derive(Debug, Clone)]
pub struct RepairPlan {
    pub project_root: Utf8PathBuf,
    pub models: Vec<String>,
    pub model: String,
    pub animations: Vec<String>,
    pub writes: Vec<PlannedWrite>,
}

/// Resolve the project root and check that it holds an export.
pub fn resolve_project(
    resolver: &dyn RootResolver,
    fs: &dyn ProjectFs,
    sink: &dyn DiagnosticSink,
) -> RepairResult<Utf8PathBuf> {
    let root = resolver.project_root().ok_or(RepairError::NoWorkspace)?;
    sink.record(&RepairEvent::RootResolved { root: root.clone() });

    let data_dir = root.join(layout::data_dir());
    if !fs.exists(&data_dir) {
        return Err(RepairError::MissingDirectory { path: data_dir });
    }
    Ok(root)
}

/// Whether `root` looks like an Animated Java project.
pub fn detect_data_pack(fs: &dyn ProjectFs, root: &Utf8Path) -> bool {
    fs.exists(&root.join(layout::data_dir()))
}

/// The discovered model set of the resolved project.
pub fn list_models(
    resolver: &dyn RootResolver,
    fs: &dyn ProjectFs,
    sink: &dyn DiagnosticSink,
) -> RepairResult<Vec<String>> {
    let root = resolve_project(resolver, fs, sink)?;
    let models = discover_models(fs, &root)?;
    sink.record(&RepairEvent::ModelsDiscovered {
        models: models.clone(),
    });
    Ok(models)
}

/// Discover models and animations, ask for the target model, and derive the
/// content of every file the repair rewrites. Performs no writes.
pub fn plan_repair(
    settings: &RepairSettings,
    resolver: &dyn RootResolver,
    fs: &dyn ProjectFs,
    chooser: &dyn Chooser,
    sink: &dyn DiagnosticSink,
) -> RepairResult<RepairPlan> {
    let root = resolve_project(resolver, fs, sink)?;

    let models = discover_models(fs, &root)?;
    sink.record(&RepairEvent::ModelsDiscovered {
        models: models.clone(),
    });
    if models.is_empty() {
        return Err(RepairError::NoModels {
            path: root.join(layout::functions_root()),
        });
    }

    let model = select_model(settings, chooser, sink, &models)?;

    let animations = discover_animations(fs, &root, &model)?;
    sink.record(&RepairEvent::AnimationsDiscovered {
        model: model.clone(),
        animations: animations.clone(),
    });

    let on_load = layout::model_on_load(&model);
    let original = fs.read_to_string(&root.join(&on_load))?;

    let writes = vec![
        manifest_write(
            WriteRole::VanillaLoadTag,
            layout::vanilla_load_tag(),
            &manifest::vanilla_load(),
        )?,
        manifest_write(
            WriteRole::VanillaTickTag,
            layout::vanilla_tick_tag(),
            &manifest::vanilla_tick(),
        )?,
        manifest_write(
            WriteRole::GlobalOnLoadTag,
            layout::global_on_load_tag(),
            &manifest::global_on_load(&models),
        )?,
        manifest_write(
            WriteRole::GlobalRootOnLoadTag,
            layout::global_root_on_load_tag(),
            &manifest::global_root_on_load(&models),
        )?,
        manifest_write(
            WriteRole::GlobalRootOnTickTag,
            layout::global_root_on_tick_tag(),
            &manifest::global_root_on_tick(&models),
        )?,
        PlannedWrite {
            path: on_load,
            role: WriteRole::ModelOnLoadFunction,
            contents: rewrite_on_load(&model, &animations, &original),
        },
    ];

    debug!(model = %model, writes = writes.len(), "planned repair");

    Ok(RepairPlan {
        project_root: root,
        models,
        model,
        animations,
        writes,
    })
}

fn select_model(
    settings: &RepairSettings,
    chooser: &dyn Chooser,
    sink: &dyn DiagnosticSink,
    models: &[String],
) -> RepairResult<String> {
    match chooser.choose(&settings.prompt_label, models)? {
        Choice::Cancelled => {
            sink.record(&RepairEvent::SelectionCancelled);
            Err(RepairError::UserCancelled)
        }
        Choice::Selected(model) if models.contains(&model) => {
            sink.record(&RepairEvent::ModelSelected {
                model: model.clone(),
            });
            Ok(model)
        }
        Choice::Selected(model) => Err(RepairError::UnknownModel {
            model,
            available: models.to_vec(),
        }),
    }
}

fn manifest_write(
    role: WriteRole,
    path: Utf8PathBuf,
    manifest: &TagManifest,
) -> anyhow::Result<PlannedWrite> {
    let contents = manifest
        .to_compact_json()
        .with_context(|| format!("serialize {}", path))?;
    Ok(PlannedWrite {
        path,
        role,
        contents,
    })
}

/// Write every planned file, in plan order. With `settings.dry_run` the
/// report is produced but nothing is written.
///
/// Every existing target is read before the first write, so an unreadable
/// file fails the run with the tree untouched. After that there is no
/// rollback: a failed write leaves earlier files written and later ones
/// untouched. Running the repair again completes it.
pub fn apply_plan(
    plan: &RepairPlan,
    settings: &RepairSettings,
    fs: &dyn ProjectFs,
    sink: &dyn DiagnosticSink,
    tool: ToolInfo,
) -> RepairResult<RepairReport> {
    let mut report = RepairReport::new(tool, plan.project_root.clone(), plan.model.clone());
    report.models = plan.models.clone();
    report.animations = plan.animations.clone();
    report.dry_run = settings.dry_run;

    let befores = plan
        .writes
        .iter()
        .map(|write| current_contents(plan, write, fs))
        .collect::<RepairResult<Vec<_>>>()?;

    for (write, before) in plan.writes.iter().zip(befores) {
        let abs = plan.project_root.join(&write.path);
        let changed = before.as_deref() != Some(write.contents.as_str());

        if settings.dry_run {
            sink.record(&RepairEvent::FileSkipped {
                path: write.path.clone(),
            });
        } else {
            fs.write_file(&abs, &write.contents)?;
            sink.record(&RepairEvent::FileWritten {
                path: write.path.clone(),
                changed,
            });
        }

        report.files.push(FileWriteResult {
            path: write.path.clone(),
            role: write.role,
            changed,
            before_sha256: before.as_deref().map(|b| sha256_hex(b.as_bytes())),
            after_sha256: sha256_hex(write.contents.as_bytes()),
            bytes: write.contents.len() as u64,
        });
    }

    report.run.ended_at = Some(Utc::now());
    Ok(report)
}

/// Plan and apply in one call. Unexpected failures are also recorded on
/// `sink` with their full cause chain.
pub fn run_repair(
    settings: &RepairSettings,
    resolver: &dyn RootResolver,
    fs: &dyn ProjectFs,
    chooser: &dyn Chooser,
    sink: &dyn DiagnosticSink,
    tool: ToolInfo,
) -> RepairResult<RepairReport> {
    let result = plan_repair(settings, resolver, fs, chooser, sink)
        .and_then(|plan| apply_plan(&plan, settings, fs, sink, tool));

    if let Err(RepairError::Unexpected(inner)) = &result {
        sink.record(&RepairEvent::Failed {
            detail: format!("{:?}", inner),
        });
    }
    result
}

/// Unified diff of every planned write against what is on disk now. A
/// missing file diffs against empty content.
pub fn preview_patch(plan: &RepairPlan, fs: &dyn ProjectFs) -> RepairResult<String> {
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for write in &plan.writes {
        let old = current_contents(plan, write, fs)?.unwrap_or_default();
        if old == write.contents {
            continue;
        }

        let mut opts = DiffOptions::new();
        opts.set_original_filename(format!("a/{}", write.path))
            .set_modified_filename(format!("b/{}", write.path));
        let patch = opts.create_patch(&old, &write.contents);

        out.push_str(&format!("diff --git a/{0} b/{0}\n", write.path));
        out.push_str(&formatter.fmt_patch(&patch).to_string());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    Ok(out)
}

/// `None` when the target does not exist yet. A target that exists but
/// cannot be read as text is an error.
fn current_contents(
    plan: &RepairPlan,
    write: &PlannedWrite,
    fs: &dyn ProjectFs,
) -> RepairResult<Option<String>> {
    let abs = plan.project_root.join(&write.path);
    if !fs.exists(&abs) {
        return Ok(None);
    }
    Ok(Some(fs.read_to_string(&abs)?))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
