//! Port traits abstracting all I/O and user interaction away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};

/// Locates the project the repair runs against.
pub trait RootResolver {
    /// The active project root, or `None` when nothing is open.
    fn project_root(&self) -> Option<Utf8PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Whole-file project access. Paths are absolute.
pub trait ProjectFs {
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Immediate children of `path`, in no particular order.
    fn list_dir(&self, path: &Utf8Path) -> anyhow::Result<Vec<DirEntry>>;

    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String>;

    /// Replaces the whole file. Missing parent directories are created.
    fn write_file(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()>;
}

/// Answer from a [`Chooser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Selected(String),
    Cancelled,
}

/// Single-choice prompt.
pub trait Chooser {
    fn choose(&self, label: &str, options: &[String]) -> anyhow::Result<Choice>;
}

/// Something worth telling the diagnostic log about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairEvent {
    RootResolved { root: Utf8PathBuf },
    ModelsDiscovered { models: Vec<String> },
    ModelSelected { model: String },
    SelectionCancelled,
    AnimationsDiscovered { model: String, animations: Vec<String> },
    FileWritten { path: Utf8PathBuf, changed: bool },
    FileSkipped { path: Utf8PathBuf },
    Failed { detail: String },
}

/// Append-only side channel for diagnostics.
pub trait DiagnosticSink {
    fn record(&self, event: &RepairEvent);
}
