use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autoreuse_core::config::RunConfig;
use autoreuse_core::report::{model::ToolInfo, render};

mod args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = args::Args::parse();

    let config = RunConfig {
        root: args.root,
        manifest: args.manifest,
        reuse_program: args.reuse_program,
        git_program: args.git_program,
        ..Default::default()
    };

    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    tracing::debug!(
        root = %config.root.display(),
        manifest = %config.manifest_path().display(),
        reuse = %config.reuse_program,
        git = %config.git_program,
        "resolved configuration"
    );

    let summary = autoreuse_core::run(&config, tool)?;

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&summary)?,
        args::OutputFormat::Text => render::render_text(&summary),
    };

    match args.out {
        Some(path) => std::fs::write(&path, &output)
            .with_context(|| format!("failed to write summary to {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(())
}
