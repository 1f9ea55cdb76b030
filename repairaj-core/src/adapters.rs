//! Default port implementations.

use crate::ports::{
    Choice, Chooser, DiagnosticSink, DirEntry, EntryKind, ProjectFs, RepairEvent, RootResolver,
};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, error, info};

/// Resolves to `candidate` when it names an existing directory.
#[derive(Debug, Clone, Default)]
pub struct DirRootResolver {
    pub candidate: Option<Utf8PathBuf>,
}

impl DirRootResolver {
    pub fn new(candidate: Option<Utf8PathBuf>) -> Self {
        Self { candidate }
    }

    /// Uses the process working directory. Non-UTF-8 directories resolve to nothing.
    pub fn current_dir() -> Self {
        let candidate = std::env::current_dir()
            .ok()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok());
        Self { candidate }
    }
}

impl RootResolver for DirRootResolver {
    fn project_root(&self) -> Option<Utf8PathBuf> {
        self.candidate.as_ref().filter(|p| p.is_dir()).cloned()
    }
}

/// Real filesystem access.
#[derive(Debug, Clone, Default)]
pub struct FsProject;

impl ProjectFs for FsProject {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    /// Entries whose names are not UTF-8 cannot be model or animation names
    /// and are skipped.
    fn list_dir(&self, path: &Utf8Path) -> anyhow::Result<Vec<DirEntry>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("read_dir {}", path))? {
            let entry = entry.with_context(|| format!("read entry in {}", path))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    debug!("skipping non-UTF-8 entry {:?} in {}", raw, path);
                    continue;
                }
            };
            let ft = entry
                .file_type()
                .with_context(|| format!("file type of {}/{}", path, name))?;
            let kind = if ft.is_dir() {
                EntryKind::Directory
            } else if ft.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            out.push(DirEntry::new(name, kind));
        }
        Ok(out)
    }

    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path))
    }

    fn write_file(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}

/// In-memory project for embedding and testing.
///
/// Directories are implied by the files below them and can also be added
/// empty. Every `write_file` call is recorded in order.
#[derive(Debug, Default)]
pub struct InMemoryProject {
    files: RefCell<BTreeMap<Utf8PathBuf, String>>,
    dirs: RefCell<BTreeSet<Utf8PathBuf>>,
    writes: RefCell<Vec<Utf8PathBuf>>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, path: impl Into<Utf8PathBuf>) -> Self {
        self.add_dir(&path.into());
        self
    }

    pub fn with_file(self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.borrow_mut().insert(path, contents.into());
        self
    }

    pub fn file(&self, path: &Utf8Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes.borrow().clone()
    }

    fn add_dir(&self, path: &Utf8Path) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }
}

impl ProjectFs for InMemoryProject {
    fn exists(&self, path: &Utf8Path) -> bool {
        self.dirs.borrow().contains(path) || self.files.borrow().contains_key(path)
    }

    fn list_dir(&self, path: &Utf8Path) -> anyhow::Result<Vec<DirEntry>> {
        if !self.dirs.borrow().contains(path) {
            anyhow::bail!("read_dir {}: no such directory", path);
        }
        let mut out = Vec::new();
        for dir in self.dirs.borrow().iter() {
            if dir.parent() == Some(path)
                && let Some(name) = dir.file_name()
            {
                out.push(DirEntry::new(name, EntryKind::Directory));
            }
        }
        for file in self.files.borrow().keys() {
            if file.parent() == Some(path)
                && let Some(name) = file.file_name()
            {
                out.push(DirEntry::new(name, EntryKind::File));
            }
        }
        Ok(out)
    }

    fn read_to_string(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .with_context(|| format!("read {}: no such file", path))
    }

    fn write_file(&self, path: &Utf8Path, contents: &str) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Answers every prompt with the same preset, or cancels when there is none.
#[derive(Debug, Clone, Default)]
pub struct PresetChooser {
    pub answer: Option<String>,
}

impl PresetChooser {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    pub fn cancelling() -> Self {
        Self { answer: None }
    }
}

impl Chooser for PresetChooser {
    fn choose(&self, label: &str, _options: &[String]) -> anyhow::Result<Choice> {
        debug!(label, answer = ?self.answer, "preset choice");
        Ok(match &self.answer {
            Some(a) => Choice::Selected(a.clone()),
            None => Choice::Cancelled,
        })
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &RepairEvent) {
        match event {
            RepairEvent::RootResolved { root } => debug!(%root, "project root resolved"),
            RepairEvent::ModelsDiscovered { models } => {
                debug!(count = models.len(), ?models, "models discovered")
            }
            RepairEvent::ModelSelected { model } => info!(%model, "repairing model"),
            RepairEvent::SelectionCancelled => debug!("model selection cancelled"),
            RepairEvent::AnimationsDiscovered { model, animations } => {
                debug!(%model, ?animations, "animations discovered")
            }
            RepairEvent::FileWritten { path, changed } => {
                info!(%path, changed, "wrote file")
            }
            RepairEvent::FileSkipped { path } => debug!(%path, "dry-run: not written"),
            RepairEvent::Failed { detail } => error!("{}", detail),
        }
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<RepairEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RepairEvent> {
        self.events.borrow().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &RepairEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    #[test]
    fn dir_root_resolver_requires_existing_dir() {
        let (_temp, root) = temp_root();
        assert_eq!(
            DirRootResolver::new(Some(root.clone())).project_root(),
            Some(root.clone())
        );
        assert!(
            DirRootResolver::new(Some(root.join("missing")))
                .project_root()
                .is_none()
        );
        assert!(DirRootResolver::new(None).project_root().is_none());
    }

    #[test]
    fn dir_root_resolver_rejects_files() {
        let (_temp, root) = temp_root();
        let file = root.join("file.txt");
        std::fs::write(&file, "x").expect("write");
        assert!(DirRootResolver::new(Some(file)).project_root().is_none());
    }

    #[test]
    fn fs_project_lists_kinds() {
        let (_temp, root) = temp_root();
        std::fs::create_dir_all(root.join("b_dir")).expect("mkdir");
        std::fs::write(root.join("a_file"), "x").expect("write");

        let mut entries = FsProject.list_dir(&root).expect("list");
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry::new("a_file", EntryKind::File),
                DirEntry::new("b_dir", EntryKind::Directory),
            ]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn fs_project_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_temp, root) = temp_root();
        std::fs::create_dir_all(root.join("dragon")).expect("mkdir");
        let raw = root.as_std_path().join(OsStr::from_bytes(b"backup\xff.zip"));
        std::fs::write(raw, "x").expect("write");

        let entries = FsProject.list_dir(&root).expect("list");
        assert_eq!(entries, vec![DirEntry::new("dragon", EntryKind::Directory)]);
    }

    #[test]
    fn fs_project_write_creates_parents() {
        let (_temp, root) = temp_root();
        let target = root.join("nested").join("deeper").join("tag.json");

        FsProject.write_file(&target, "{}").expect("write");
        assert!(FsProject.exists(&target));
        assert_eq!(FsProject.read_to_string(&target).expect("read"), "{}");
    }

    #[test]
    fn fs_project_list_missing_dir_errors() {
        let (_temp, root) = temp_root();
        let err = FsProject.list_dir(&root.join("nope")).unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
    }

    #[test]
    fn in_memory_lists_immediate_children_only() {
        let project = InMemoryProject::new()
            .with_dir("/p/fns/dragon/animations/idle")
            .with_file("/p/fns/dragon/on_load.mcfunction", "")
            .with_file("/p/fns/readme.txt", "");

        let mut names: Vec<(String, EntryKind)> = project
            .list_dir(Utf8Path::new("/p/fns"))
            .expect("list")
            .into_iter()
            .map(|e| (e.name, e.kind))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                ("dragon".to_string(), EntryKind::Directory),
                ("readme.txt".to_string(), EntryKind::File),
            ]
        );
    }

    #[test]
    fn in_memory_records_writes() {
        let project = InMemoryProject::new();
        project
            .write_file(Utf8Path::new("/p/a/b.json"), "{}")
            .expect("write");
        assert_eq!(project.writes(), vec![Utf8PathBuf::from("/p/a/b.json")]);
        assert!(project.exists(Utf8Path::new("/p/a")));
        assert_eq!(project.file(Utf8Path::new("/p/a/b.json")).as_deref(), Some("{}"));
    }

    #[test]
    fn in_memory_missing_file_errors() {
        let project = InMemoryProject::new();
        assert!(project.read_to_string(Utf8Path::new("/nope")).is_err());
        assert!(project.list_dir(Utf8Path::new("/nope")).is_err());
    }

    #[test]
    fn preset_chooser_answers_or_cancels() {
        let options = vec!["a".to_string()];
        assert_eq!(
            PresetChooser::new("a").choose("pick", &options).unwrap(),
            Choice::Selected("a".to_string())
        );
        assert_eq!(
            PresetChooser::cancelling().choose("pick", &options).unwrap(),
            Choice::Cancelled
        );
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(&RepairEvent::SelectionCancelled);
        sink.record(&RepairEvent::Failed {
            detail: "boom".to_string(),
        });
        assert_eq!(
            sink.events(),
            vec![
                RepairEvent::SelectionCancelled,
                RepairEvent::Failed {
                    detail: "boom".to_string()
                },
            ]
        );
    }
}
