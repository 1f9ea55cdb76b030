//! Shared DTOs (schemas-as-code) for the repair-aj workspace.
//!
//! # Design constraints
//! - Tag manifests are read by the game; their shape is fixed.
//! - Reports are written for humans and scripts. Prefer adding optional
//!   fields over changing semantics.

pub mod manifest;
pub mod report;

pub use manifest::TagManifest;
pub use report::{FileWriteResult, RepairReport, RunInfo, ToolInfo, WriteRole};

/// Schema identifiers.
pub mod schema {
    pub const REPAIR_AJ_REPORT_V1: &str = "repair-aj.report.v1";
}
