use serde::{Deserialize, Serialize};

/// A function tag file (`data/<ns>/tags/functions/**.json`).
///
/// Only `values` is emitted. Order is significant: the game runs the
/// referenced functions in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagManifest {
    pub values: Vec<String>,
}

impl TagManifest {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Single-line JSON, the form the exporter itself writes.
    pub fn to_compact_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
