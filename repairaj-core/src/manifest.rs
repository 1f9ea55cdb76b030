//! Tag manifest builders.

use crate::layout::NAMESPACE;
use repairaj_types::TagManifest;

/// `#minecraft:load`: the global load entry point and the internal loader.
pub fn vanilla_load() -> TagManifest {
    TagManifest::new([
        format!("{NAMESPACE}:global/on_load"),
        format!("{NAMESPACE}:global/internal/gu/load"),
    ])
}

/// `#minecraft:tick`
pub fn vanilla_tick() -> TagManifest {
    TagManifest::new([format!("{NAMESPACE}:global/on_tick")])
}

/// `#animated_java:global/on_load`
pub fn global_on_load(models: &[String]) -> TagManifest {
    per_model(models, "on_load")
}

/// `#animated_java:global/root/on_load`
pub fn global_root_on_load(models: &[String]) -> TagManifest {
    per_model(models, "root/on_load")
}

/// `#animated_java:global/root/on_tick`
pub fn global_root_on_tick(models: &[String]) -> TagManifest {
    per_model(models, "root/on_tick")
}

fn per_model(models: &[String], function: &str) -> TagManifest {
    TagManifest::new(
        models
            .iter()
            .map(|m| format!("{NAMESPACE}:{m}/{function}")),
    )
}
