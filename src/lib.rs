pub mod boundary;
pub mod cli;
pub mod config;
pub mod context;
pub mod decision;
pub mod error;
pub mod github;
pub mod inputs;
pub mod properties;
pub mod ui;

pub use decision::{decide, ChangedFilesPattern, LabelDecision, LabelFormat};
pub use error::{LabelerError, Result};
