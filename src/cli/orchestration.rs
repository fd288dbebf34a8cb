//! Main labeling workflow
//!
//! Kept apart from `main.rs` so the workflow runs against any
//! [PullRequestApi] and can be driven without clap or a real network.

use tracing::debug;

use crate::config::Settings;
use crate::context::RunContext;
use crate::decision::{decide, LabelDecision};
use crate::error::Result;
use crate::github::PullRequestApi;
use crate::properties;
use crate::ui;

/// Result of a completed labeling workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version read from the properties file
    pub version: String,

    /// Label computed from the version and label format
    pub label: String,

    /// Whether the label was written to the pull request
    pub applied: bool,

    /// Why the label was not written, if it was not
    pub skipped_reason: Option<String>,
}

impl WorkflowResult {
    fn new(version: String, decision: LabelDecision) -> Self {
        WorkflowResult {
            version,
            label: decision.label,
            applied: false,
            skipped_reason: None,
        }
    }
}

/// Run one labeling pass:
/// 1. Read the version from the properties file
/// 2. List changed files, only if a changed-files pattern is configured
/// 3. Decide whether to label and compute the label
/// 4. Add the label unless skipped or in dry-run mode
///
/// # Returns
/// * `Ok(WorkflowResult)` - Whether or not a label was applied
/// * `Err` - On a configuration or remote failure; nothing is labeled
pub fn run_label_workflow(
    settings: &Settings,
    context: &RunContext,
    api: &dyn PullRequestApi,
) -> Result<WorkflowResult> {
    let version = properties::read_version(&settings.properties_path, &settings.version_key)?;
    ui::display_status(&format!(
        "Read version number {} from {}",
        version,
        settings.properties_path.display()
    ));

    let changed_files = match &settings.changed_files {
        Some(_) => {
            let files = api.list_changed_files(&context.repo, context.pr_number)?;
            debug!(count = files.len(), "found changed files");
            for file in &files {
                debug!("  {}", file);
            }
            files
        }
        None => Vec::new(),
    };

    let decision = decide(
        &version,
        &changed_files,
        settings.changed_files.as_ref(),
        settings.label_format.as_deref(),
    );
    let mut result = WorkflowResult::new(version, decision.clone());

    if !decision.should_apply {
        let pattern = settings
            .changed_files
            .as_ref()
            .map(|p| p.as_str())
            .unwrap_or_default();
        ui::display_status(&format!(
            "No matching changes found in files at path {}, skipping label.",
            pattern
        ));
        result.skipped_reason = Some(format!("no changed files match {}", pattern));
        return Ok(result);
    }

    if let Some(pattern) = &settings.changed_files {
        debug!(matching = ?pattern.matching(&changed_files), "changed files matched");
    }

    if settings.dry_run {
        ui::display_status(&format!(
            "Dry run: would add label '{}' to {}#{}",
            decision.label, context.repo, context.pr_number
        ));
        result.skipped_reason = Some("dry run".to_string());
        return Ok(result);
    }

    api.add_labels(
        &context.repo,
        context.pr_number,
        std::slice::from_ref(&decision.label),
    )?;
    ui::display_success(&format!(
        "Added label '{}' to {}#{}",
        decision.label, context.repo, context.pr_number
    ));
    result.applied = true;

    Ok(result)
}
