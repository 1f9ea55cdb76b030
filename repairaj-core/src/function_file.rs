//! Rewrite of a model's `on_load` function.
//!
//! The exporter sometimes leaves `data remove storage` lines for a model's
//! animation storage that do not match the animations actually present,
//! and omits the per-animation frame objectives. The rewrite puts both
//! back at the top of the file, one per discovered animation.
//!
//! Lines are compared by literal prefix only; nothing else in the file is
//! interpreted.

/// Command that registers a scoreboard objective.
pub const ADD_OBJECTIVE: &str = "scoreboard objectives add";

/// Command that removes a storage entry.
pub const REMOVE_STORAGE: &str = "data remove storage";

/// `data remove storage aj.<model>:animations`: every line starting with
/// this is dropped and regenerated.
pub fn storage_removal_prefix(model: &str) -> String {
    format!("{REMOVE_STORAGE} aj.{model}:animations")
}

pub fn frame_objective_line(animation: &str) -> String {
    format!("{ADD_OBJECTIVE} aj.{animation}.frame dummy")
}

pub fn storage_removal_line(model: &str, animation: &str) -> String {
    format!("{} {animation}", storage_removal_prefix(model))
}

/// Returns the new contents of `model`'s `on_load` function.
///
/// Output is: one frame objective per animation, then one storage removal
/// per animation, then the original lines minus any storage removal for
/// this model. Every other original line is kept, in order, including
/// objective lines identical to regenerated ones; only the storage
/// removal block converges across runs. `animations` is used in the order
/// given.
pub fn rewrite_on_load(model: &str, animations: &[String], original: &str) -> String {
    let prefix = storage_removal_prefix(model);

    let mut lines: Vec<String> = Vec::with_capacity(animations.len() * 2);
    lines.extend(animations.iter().map(|a| frame_objective_line(a)));
    lines.extend(animations.iter().map(|a| storage_removal_line(model, a)));
    lines.extend(
        original
            .split('\n')
            .filter(|line| !line.starts_with(&prefix))
            .map(str::to_string),
    );
    lines.join("\n")
}
