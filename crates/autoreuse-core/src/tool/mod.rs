//! Seams to the two external collaborators.
//!
//! The core only talks to `ComplianceTool` and `VersionControl`. The
//! process-backed implementations live in `reuse` and `git`; tests supply
//! in-memory fakes.

pub mod git;
pub mod reuse;
pub mod runner;

use anyhow::Result;

use crate::history::YearSpan;
use crate::report::lint::LintReport;

/// A single request to the annotate tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Add license identifiers to a file.
    Licenses { path: String, licenses: Vec<String> },
    /// Merge a copyright statement for one author into a file.
    Copyright {
        path: String,
        author: String,
        years: YearSpan,
    },
}

impl Annotation {
    pub fn path(&self) -> &str {
        match self {
            Annotation::Licenses { path, .. } | Annotation::Copyright { path, .. } => path,
        }
    }

    /// Arguments following `annotate` on the command line.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        match self {
            Annotation::Licenses { path, licenses } => {
                for license in licenses {
                    args.push("--license".to_string());
                    args.push(license.clone());
                }
                args.push(path.clone());
            }
            Annotation::Copyright {
                path,
                author,
                years,
            } => {
                args.push("--merge-copyrights".to_string());
                args.push("--copyright".to_string());
                args.push(author.clone());
                for year in years.years() {
                    args.push("--year".to_string());
                    args.push(year.to_string());
                }
                args.push(path.clone());
            }
        }
        args
    }
}

/// The lint/annotate/download utility.
pub trait ComplianceTool {
    /// Machine-readable lint report. The tool's exit status is not checked:
    /// a non-compliant tree is the normal input.
    fn report(&self) -> Result<LintReport>;

    fn annotate(&self, annotation: &Annotation) -> Result<()>;

    /// Print the annotate usage text as a diagnostic aid.
    fn annotate_help(&self) -> Result<()>;

    /// Fetch every referenced license text that is not on disk yet.
    fn download_missing(&self) -> Result<()>;

    /// Human-readable lint; fails unless the tree is compliant.
    fn lint(&self) -> Result<()>;
}

/// Read access to version-control metadata.
pub trait VersionControl {
    /// One `YYYY-MM-DD-Author` line per commit touching `path`, following
    /// renames. Empty when the file was never committed.
    fn history(&self, path: &str) -> Result<Vec<String>>;

    /// Locally configured user name, if any.
    fn user_name(&self) -> Result<Option<String>>;
}
