//! Model and animation discovery.
//!
//! Both sets are derived from directory names alone and sorted, so the
//! result does not depend on the order the filesystem lists entries in.

use crate::layout;
use crate::ports::ProjectFs;
use anyhow::Context;
use camino::Utf8Path;

/// Sorted names of the model directories, without the reserved `global`.
pub fn discover_models(fs: &dyn ProjectFs, root: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let dir = root.join(layout::functions_root());
    let mut names = subdirectory_names(fs, &dir).context("discover models")?;
    names.retain(|n| n != layout::RESERVED_MODEL);
    Ok(names)
}

/// Sorted names of `model`'s animation directories.
pub fn discover_animations(
    fs: &dyn ProjectFs,
    root: &Utf8Path,
    model: &str,
) -> anyhow::Result<Vec<String>> {
    let dir = root.join(layout::animations_dir(model));
    subdirectory_names(fs, &dir).with_context(|| format!("discover animations of {model}"))
}

fn subdirectory_names(fs: &dyn ProjectFs, dir: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let mut names: Vec<String> = fs
        .list_dir(dir)?
        .into_iter()
        .filter(|e| e.is_dir())
        .map(|e| e.name)
        .collect();
    // Byte order, which is not UTF-16 code-unit order above U+FFFF.
    names.sort();
    Ok(names)
}
