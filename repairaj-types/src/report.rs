use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the regenerated files a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteRole {
    /// `#minecraft:load`
    VanillaLoadTag,
    /// `#minecraft:tick`
    VanillaTickTag,
    /// `#animated_java:global/on_load`
    GlobalOnLoadTag,
    /// `#animated_java:global/root/on_load`
    GlobalRootOnLoadTag,
    /// `#animated_java:global/root/on_tick`
    GlobalRootOnTickTag,
    /// `animated_java:<model>/on_load`
    ModelOnLoadFunction,
}

impl WriteRole {
    pub fn as_str(self) -> &'static str {
        match self {
            WriteRole::VanillaLoadTag => "vanilla_load_tag",
            WriteRole::VanillaTickTag => "vanilla_tick_tag",
            WriteRole::GlobalOnLoadTag => "global_on_load_tag",
            WriteRole::GlobalRootOnLoadTag => "global_root_on_load_tag",
            WriteRole::GlobalRootOnTickTag => "global_root_on_tick_tag",
            WriteRole::ModelOnLoadFunction => "model_on_load_function",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Outcome of one repair run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub project_root: Utf8PathBuf,
    pub model: String,

    #[serde(default)]
    pub models: Vec<String>,

    #[serde(default)]
    pub animations: Vec<String>,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub files: Vec<FileWriteResult>,
}

impl RepairReport {
    pub fn new(tool: ToolInfo, project_root: Utf8PathBuf, model: String) -> Self {
        Self {
            schema: crate::schema::REPAIR_AJ_REPORT_V1.to_string(),
            tool,
            run: RunInfo {
                started_at: Some(Utc::now()),
                ended_at: None,
            },
            project_root,
            model,
            models: vec![],
            animations: vec![],
            dry_run: false,
            files: vec![],
        }
    }

    pub fn files_changed(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }
}

/// Per-file result. `path` is relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWriteResult {
    pub path: Utf8PathBuf,
    pub role: WriteRole,

    /// False when the file already held exactly the regenerated content.
    pub changed: bool,

    /// Absent when the file did not exist before the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_sha256: Option<String>,

    pub after_sha256: String,
    pub bytes: u64,
}
