//! Command-line workflow support

pub mod orchestration;

pub use orchestration::{run_label_workflow, WorkflowResult};
