//! Fixed on-disk layout of an Animated Java export.
//!
//! Every path here is relative to the project root.

use camino::Utf8PathBuf;

/// Top-level directory the exporter writes; its presence marks a project.
pub const DATA_DIR: &str = "AnimatedJava";

/// Function namespace used by the exporter.
pub const NAMESPACE: &str = "animated_java";

/// Directory under the function root that holds shared functions, not a model.
pub const RESERVED_MODEL: &str = "global";

pub const FUNCTION_EXTENSION: &str = "mcfunction";

pub const ANIMATIONS_DIR: &str = "animations";

pub fn data_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(DATA_DIR)
}

/// Model discovery root: `AnimatedJava/data/animated_java/functions`.
pub fn functions_root() -> Utf8PathBuf {
    data_dir().join("data").join(NAMESPACE).join("functions")
}

pub fn animations_dir(model: &str) -> Utf8PathBuf {
    functions_root().join(model).join(ANIMATIONS_DIR)
}

pub fn model_on_load(model: &str) -> Utf8PathBuf {
    functions_root()
        .join(model)
        .join(format!("on_load.{FUNCTION_EXTENSION}"))
}

fn vanilla_tags() -> Utf8PathBuf {
    data_dir()
        .join("data")
        .join("minecraft")
        .join("tags")
        .join("functions")
}

fn global_tags() -> Utf8PathBuf {
    data_dir()
        .join("data")
        .join(NAMESPACE)
        .join("tags")
        .join("functions")
        .join(RESERVED_MODEL)
}

pub fn vanilla_load_tag() -> Utf8PathBuf {
    vanilla_tags().join("load.json")
}

pub fn vanilla_tick_tag() -> Utf8PathBuf {
    vanilla_tags().join("tick.json")
}

pub fn global_on_load_tag() -> Utf8PathBuf {
    global_tags().join("on_load.json")
}

pub fn global_root_on_load_tag() -> Utf8PathBuf {
    global_tags().join("root").join("on_load.json")
}

pub fn global_root_on_tick_tag() -> Utf8PathBuf {
    global_tags().join("root").join("on_tick.json")
}
