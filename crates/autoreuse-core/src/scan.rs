//! Compliance scanning.
//!
//! One linear pass over the lint report: licenses from every file feed the
//! run-wide `LicenseSet`, and files without any copyright statement get
//! their licenses and authors annotated. Files that already carry copyright
//! are never touched, which keeps re-runs idempotent.

use anyhow::Result;

use crate::annotate::{add_authors, add_licenses};
use crate::error::ComplianceError;
use crate::history::{self, AuthorYears};
use crate::license::LicenseSet;
use crate::report::lint::FileRecord;
use crate::report::model::{AnnotatedFile, AuthorCredit};
use crate::tool::{ComplianceTool, VersionControl};

/// Attribution used for files that have no commit history yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub identity: Option<String>,
    pub year: i32,
}

impl Fallback {
    pub fn capture(vcs: &impl VersionControl, year: i32) -> Result<Self> {
        Ok(Self {
            identity: vcs.user_name()?,
            year,
        })
    }
}

/// Result of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub files_scanned: usize,
    pub annotated: Vec<AnnotatedFile>,
    pub licenses: LicenseSet,
}

/// Scan the tree, fill in missing annotations, fetch missing license texts
/// and run the final lint gate.
pub fn scan(
    tool: &impl ComplianceTool,
    vcs: &impl VersionControl,
    current_year: i32,
) -> Result<ScanOutcome> {
    let fallback = Fallback::capture(vcs, current_year)?;
    if fallback.identity.is_none() {
        tracing::debug!("no local identity configured");
    }

    let report = tool.report()?;
    tracing::info!(files = report.files.len(), "lint report loaded");

    let mut outcome = ScanOutcome {
        files_scanned: report.files.len(),
        ..Default::default()
    };

    for record in &report.files {
        for declared in record.spdx_expressions.iter().map(|e| e.value.as_str()) {
            outcome.licenses.add_declared(declared);
        }

        if record.has_copyright() {
            continue;
        }

        outcome
            .annotated
            .push(annotate_file(tool, vcs, record, &fallback)?);
    }

    tool.download_missing()?;
    tool.lint()?;

    Ok(outcome)
}

fn annotate_file(
    tool: &impl ComplianceTool,
    vcs: &impl VersionControl,
    record: &FileRecord,
    fallback: &Fallback,
) -> Result<AnnotatedFile> {
    let path = record.path.as_str();
    let licenses = record.licenses();

    add_licenses(tool, path, &licenses)?;

    let mut authors = history::inspect(vcs, path)?;
    let local_identity = authors.is_empty();
    if local_identity {
        let Some(identity) = fallback.identity.as_deref() else {
            return Err(ComplianceError::NoAuthor {
                path: path.to_string(),
            }
            .into());
        };
        tracing::warn!(
            path,
            author = identity,
            year = fallback.year,
            "no commit history, attributing to local identity"
        );
        authors = AuthorYears::single(identity, fallback.year);
    }

    add_authors(tool, path, &authors)?;
    tracing::info!(path, authors = authors.len(), "annotated");

    Ok(AnnotatedFile {
        path: path.to_string(),
        licenses,
        authors: AuthorCredit::from_map(&authors),
        local_identity,
    })
}
