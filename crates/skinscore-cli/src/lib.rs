//! Shared utilities for skinscore-cli
//!
//! Input expansion and report formatting used by the command implementations.

pub mod input;
pub mod output;

pub use input::expand_inputs;
pub use output::{format_report, AnalysisOutput};
