//! Reader for Gradle/Java `.properties` files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{LabelerError, Result};

/// Key holding the version in a typical Android `gradle.properties`
pub const DEFAULT_VERSION_KEY: &str = "VERSION_NAME";

/// Parsed key/value pairs from a properties file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties text.
    ///
    /// Accepts `key=value`, `key: value` and `key value`. Lines starting with
    /// `#` or `!` are comments and never continue. An odd number of trailing
    /// backslashes continues the logical line. Later duplicates overwrite
    /// earlier ones.
    pub fn parse(content: &str) -> Result<Self> {
        let re = Regex::new(r"^([^=:\s]+)(?:\s*[=:]\s*|\s+|$)(.*)$")
            .map_err(|e| LabelerError::config(format!("Invalid properties pattern: {}", e)))?;

        let mut entries = HashMap::new();
        for line in logical_lines(content) {
            if line.is_empty() || is_comment(&line) {
                continue;
            }

            if let Some(caps) = re.captures(&line) {
                let key = caps[1].to_string();
                let value = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                entries.insert(key, value);
            }
        }

        Ok(Properties { entries })
    }

    /// Read and parse a properties file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('!')
}

/// An odd run of trailing backslashes continues the line; an even run is escaped.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Join backslash-continued lines and trim each logical line.
fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for raw in content.lines() {
        let continuing = !current.is_empty();
        let segment = if continuing {
            raw.trim_start()
        } else {
            raw.trim()
        };

        // comments end at the natural line, whatever they end with
        if !continuing && is_comment(segment) {
            lines.push(segment.to_string());
            continue;
        }

        if continues(segment) {
            current.push_str(&segment[..segment.len() - 1]);
        } else {
            current.push_str(segment);
            lines.push(current.trim().to_string());
            current.clear();
        }
    }

    if !current.is_empty() {
        lines.push(current.trim().to_string());
    }

    lines
}

/// Read the version string stored under `key` in the properties file at `path`.
///
/// # Returns
/// * `Ok(String)` - The non-empty version value
/// * `Err` - If the file is missing or unreadable, or the key is missing or empty
pub fn read_version(path: impl AsRef<Path>, key: &str) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LabelerError::config(format!(
            "The file path for gradle.properties does not exist or is not found: {}",
            path.display()
        )));
    }

    debug!(path = %path.display(), "reading properties");
    let properties = Properties::load(path).map_err(|e| {
        LabelerError::config(format!("Could not read {}: {}", path.display(), e))
    })?;

    match properties.get(key) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        Some(_) => Err(LabelerError::config(format!(
            "Key '{}' is empty in {}",
            key,
            path.display()
        ))),
        None => Err(LabelerError::config(format!(
            "Key '{}' not found in {}",
            key,
            path.display()
        ))),
    }
}
