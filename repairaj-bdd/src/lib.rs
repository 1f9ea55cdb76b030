//! Fixture helpers for the cucumber acceptance suite.
//!
//! Scenarios live in `features/`; this crate stays out of the production
//! dependency graph.

use camino::Utf8Path;
use fs_err as fs;

/// Model discovery root, relative to the project root.
pub const FUNCTIONS_ROOT: &str = "AnimatedJava/data/animated_java/functions";

/// `"a, b,c"` -> `["a", "b", "c"]`
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lays out an export with one directory per model. Every model except
/// `global` gets an empty `animations` directory and an empty `on_load`.
pub fn create_export(root: &Utf8Path, models: &[String]) -> std::io::Result<()> {
    for model in models {
        let dir = root.join(FUNCTIONS_ROOT).join(model);
        fs::create_dir_all(&dir)?;
        if model != "global" {
            fs::create_dir_all(dir.join("animations"))?;
            fs::write(dir.join("on_load.mcfunction"), "")?;
        }
    }
    Ok(())
}
