//! Embeddable core library for repair-aj.
//!
//! Provides a clap-free, I/O-abstracted entry point for regenerating the
//! tag manifests and the per-model `on_load` function that Animated Java
//! exports sometimes leave inconsistent.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`RootResolver`](ports::RootResolver): locate the project root
//! - [`ProjectFs`](ports::ProjectFs): list, read and write project files
//! - [`Chooser`](ports::Chooser): pick the model to repair
//! - [`DiagnosticSink`](ports::DiagnosticSink): side-channel log
//!
//! The [`adapters`] module provides default filesystem-backed and
//! in-memory implementations.
//!
//! # Entry points
//!
//! - [`plan_repair`](pipeline::plan_repair): discover and derive contents
//! - [`apply_plan`](pipeline::apply_plan): write the planned files
//! - [`run_repair`](pipeline::run_repair): both, in one call

pub mod adapters;
pub mod discovery;
pub mod error;
pub mod function_file;
pub mod layout;
pub mod manifest;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use error::RepairError;
pub use repairaj_types::{RepairReport, TagManifest, WriteRole};
