use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use version_labeler::boundary;
use version_labeler::cli::run_label_workflow;
use version_labeler::config::{self, CliOverrides, Settings};
use version_labeler::context::RunContext;
use version_labeler::github::GitHubClient;
use version_labeler::inputs::ActionInputs;
use version_labeler::ui;

#[derive(clap::Parser)]
#[command(
    name = "version-labeler",
    version,
    about = "Label a pull request with the version from gradle.properties"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Path to the gradle.properties file")]
    properties: Option<String>,

    #[arg(long, help = "Only label when a changed file matches this glob")]
    changed_files: Option<String>,

    #[arg(long, help = "Label template, {version} is replaced by the version")]
    label_format: Option<String>,

    #[arg(long, help = "Properties key holding the version (default VERSION_NAME)")]
    version_key: Option<String>,

    #[arg(long, help = "Repository as owner/repo (default $GITHUB_REPOSITORY)")]
    repo: Option<String>,

    #[arg(long, help = "Pull request number (default from the event payload)")]
    pr: Option<u64>,

    #[arg(long, help = "Compute the label without applying it")]
    dry_run: bool,
}

fn init_tracing() {
    let default_level = match std::env::var("RUNNER_DEBUG").as_deref() {
        Ok("1") => "debug",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let file_config = config::load_config(args.config.as_deref())?;
    let inputs = ActionInputs::from_env()?;
    let cli = CliOverrides {
        properties: args.properties,
        changed_files: args.changed_files,
        label_format: args.label_format,
        version_key: args.version_key,
        dry_run: args.dry_run,
    };
    let settings = Settings::resolve(cli, inputs, file_config)?;
    tracing::debug!(path = %settings.properties_path.display(), "running task");

    let context = RunContext::resolve(args.repo.as_deref(), args.pr)?;
    let client = GitHubClient::new(&settings.api_url, &settings.repo_token)?;

    let result = run_label_workflow(&settings, &context, &client)?;
    tracing::debug!(?result, "workflow finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match boundary::guard(|| run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            ui::report_failure(&failure.to_string());
            ExitCode::from(failure.exit_code())
        }
    }
}
