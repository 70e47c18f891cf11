//! quill CLI library: option handling and command bodies for the `quill` binary.
//!
//! `run` builds a [`ReflectionRunner`](quill::ReflectionRunner) from env plus flags and runs the
//! loop; `check` asks each provider one question; `graph` renders the loop topology.

pub mod check;
pub mod graph;
pub mod run;

pub use check::{check_providers, format_check_result, CheckResult, DEFAULT_CHECK_QUESTION};
pub use graph::{render_graph, GraphFormat};
pub use run::{
    build_config, format_transcript, run_reflection, transcript_json, RunError, RunOptions,
    DEFAULT_TOPIC,
};
