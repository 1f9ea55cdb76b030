//! Clap-free settings for the repair pipeline.

/// Label shown by the model prompt.
pub const MODEL_PROMPT: &str = "Select the model to repair";

#[derive(Debug, Clone)]
pub struct RepairSettings {
    /// Compute everything but write nothing.
    pub dry_run: bool,

    pub prompt_label: String,
}

impl Default for RepairSettings {
    fn default() -> Self {
        Self {
            dry_run: false,
            prompt_label: MODEL_PROMPT.to_string(),
        }
    }
}
