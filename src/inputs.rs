//! Workflow step inputs.
//!
//! The runner exposes each `with:` input as an environment variable named
//! `INPUT_<NAME>`, upper-cased with spaces turned into underscores. Hyphens
//! are kept, so `repo-token` arrives as `INPUT_REPO-TOKEN`.

use std::env;

use crate::error::{LabelerError, Result};

pub const GRADLE_PROPERTIES_PATH: &str = "gradle-properties-path";
pub const REPO_TOKEN: &str = "repo-token";
pub const CHANGED_FILES: &str = "changed-files";
pub const LABEL_FORMAT: &str = "label-format";
pub const VERSION_KEY: &str = "version-key";

/// Environment variable carrying the named input
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read an input, trimmed. Empty values count as absent.
///
/// # Returns
/// * `Ok(Some(value))` - Input supplied
/// * `Ok(None)` - Optional input not supplied
/// * `Err` - Required input not supplied
pub fn get_input(name: &str, required: bool) -> Result<Option<String>> {
    let value = env::var(input_env_name(name))
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    if required && value.is_none() {
        return Err(LabelerError::config(format!(
            "Input required and not supplied: {}",
            name
        )));
    }

    Ok(value)
}

/// All inputs this step understands. Requiredness is checked later, once
/// CLI flags and the config file have had their say.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInputs {
    pub gradle_properties_path: Option<String>,
    pub repo_token: Option<String>,
    pub changed_files: Option<String>,
    pub label_format: Option<String>,
    pub version_key: Option<String>,
}

impl ActionInputs {
    pub fn from_env() -> Result<Self> {
        Ok(ActionInputs {
            gradle_properties_path: get_input(GRADLE_PROPERTIES_PATH, false)?,
            repo_token: get_input(REPO_TOKEN, false)?,
            changed_files: get_input(CHANGED_FILES, false)?,
            label_format: get_input(LABEL_FORMAT, false)?,
            version_key: get_input(VERSION_KEY, false)?,
        })
    }
}
