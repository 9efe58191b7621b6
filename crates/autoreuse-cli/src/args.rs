use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "autoreuse",
    version,
    about = "Fill in missing REUSE copyright/license annotations from git history and sync LICENSE files"
)]
pub struct Args {
    /// Repository root; all tools run here
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Project manifest, relative to the root
    #[arg(long, default_value = "pyproject.toml")]
    pub manifest: PathBuf,

    /// `reuse` executable
    #[arg(long = "reuse", default_value = "reuse")]
    pub reuse_program: String,

    /// `git` executable
    #[arg(long = "git", default_value = "git")]
    pub git_program: String,

    /// Summary format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the summary to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
