pub mod annotate;
pub mod config;
pub mod error;
pub mod history;
pub mod license;
pub mod manifest;
pub mod reconcile;
pub mod report;
pub mod scan;
pub mod tool;
pub mod util;

use anyhow::Result;
use chrono::Datelike;

use config::RunConfig;
use report::model::{RunSummary, ToolInfo};
use tool::git::GitCli;
use tool::reuse::ReuseCli;
use tool::runner::SystemRunner;
use tool::{ComplianceTool, VersionControl};

pub const TOOL_NAME: &str = "autoreuse";

/// Run the whole pipeline against the real `reuse` and `git` programs.
pub fn run(config: &RunConfig, tool_info: ToolInfo) -> Result<RunSummary> {
    let runner = SystemRunner::new(&config.root);
    let reuse = ReuseCli::new(runner.clone(), config.reuse_program.as_str());
    let git = GitCli::new(runner, config.git_program.as_str());
    let year = chrono::Local::now().year();

    run_with(&reuse, &git, config, tool_info, year)
}

/// Run the pipeline with explicit collaborators: scan and annotate, then
/// reconcile the manifest and license files.
pub fn run_with(
    tool: &impl ComplianceTool,
    vcs: &impl VersionControl,
    config: &RunConfig,
    tool_info: ToolInfo,
    current_year: i32,
) -> Result<RunSummary> {
    tracing::info!(root = %config.root.display(), "checking license compliance");

    let outcome = scan::scan(tool, vcs, current_year)?;
    if outcome.licenses.is_empty() {
        tracing::warn!("lint report lists no licensed files");
    }
    tracing::info!(
        files = outcome.files_scanned,
        annotated = outcome.annotated.len(),
        licenses = outcome.licenses.len(),
        "scan complete"
    );

    let reconciliation = reconcile::reconcile(
        &config.root,
        &config.manifest_path(),
        &config.layout,
        &outcome.licenses,
    )?;

    Ok(RunSummary::new(tool_info, outcome, reconciliation))
}
