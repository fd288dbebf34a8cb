use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::decision::ChangedFilesPattern;
use crate::error::{LabelerError, Result};
use crate::inputs::{ActionInputs, GRADLE_PROPERTIES_PATH, REPO_TOKEN};
use crate::properties::DEFAULT_VERSION_KEY;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Optional defaults read from `versionlabel.toml`.
///
/// Every field may be omitted; values from step inputs and CLI flags win.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub gradle_properties_path: Option<String>,

    #[serde(default)]
    pub changed_files: Option<String>,

    #[serde(default)]
    pub label_format: Option<String>,

    #[serde(default)]
    pub version_key: Option<String>,

    #[serde(default)]
    pub api_url: Option<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionlabel.toml` in current directory
/// 3. `.versionlabel.toml` in user config directory
/// 4. Empty configuration if no file found
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or empty configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./versionlabel.toml").exists() {
        fs::read_to_string("./versionlabel.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".versionlabel.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| LabelerError::config(format!("Invalid config file: {}", e)))
}

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub properties: Option<String>,
    pub changed_files: Option<String>,
    pub label_format: Option<String>,
    pub version_key: Option<String>,
    pub dry_run: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub properties_path: PathBuf,
    pub repo_token: String,
    pub changed_files: Option<ChangedFilesPattern>,
    pub label_format: Option<String>,
    pub version_key: String,
    pub api_url: String,
    pub dry_run: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn first_of(values: [Option<String>; 3]) -> Option<String> {
    values.into_iter().find_map(non_empty)
}

impl Settings {
    /// Merge CLI flags, step inputs and file config, in that precedence.
    ///
    /// The repository token is taken from the `repo-token` input, falling back
    /// to `GITHUB_TOKEN`. The API base URL honours `GITHUB_API_URL`.
    ///
    /// # Returns
    /// * `Err` - If the properties path or token is missing, or the glob is malformed
    pub fn resolve(cli: CliOverrides, inputs: ActionInputs, file: FileConfig) -> Result<Self> {
        let properties_path = first_of([
            cli.properties,
            inputs.gradle_properties_path,
            file.gradle_properties_path,
        ])
        .ok_or_else(|| {
            LabelerError::config(format!(
                "Input required and not supplied: {}",
                GRADLE_PROPERTIES_PATH
            ))
        })?;

        let repo_token = non_empty(inputs.repo_token)
            .or_else(|| non_empty(env::var("GITHUB_TOKEN").ok()))
            .ok_or_else(|| {
                LabelerError::config(format!(
                    "Input required and not supplied: {}",
                    REPO_TOKEN
                ))
            })?;

        let changed_files =
            match first_of([cli.changed_files, inputs.changed_files, file.changed_files]) {
                Some(pattern) => ChangedFilesPattern::parse(&pattern)?,
                None => None,
            };

        let label_format = first_of([cli.label_format, inputs.label_format, file.label_format]);

        let version_key = first_of([cli.version_key, inputs.version_key, file.version_key])
            .unwrap_or_else(|| DEFAULT_VERSION_KEY.to_string());

        let api_url = non_empty(env::var("GITHUB_API_URL").ok())
            .or_else(|| non_empty(file.api_url))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Settings {
            properties_path: PathBuf::from(properties_path),
            repo_token: repo_token.trim().to_string(),
            changed_files,
            label_format,
            version_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            dry_run: cli.dry_run,
        })
    }
}
