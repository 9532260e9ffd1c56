//! Application logic for the `sql-doc-lint` CLI.
//!
//! Separated from the binary entry point so the commands can be tested
//! without spawning a process.

mod anchors;
mod check;
mod convert;
mod helpers;
mod types;

pub use anchors::run_anchors;
pub use check::run_check;
pub use convert::convert_format;
pub use helpers::{calculate_exit_code, create_output_options};
pub use types::{CheckParams, CheckResult};
