use serde::{Deserialize, Serialize};

use crate::history::{AuthorYears, YearSpan};
use crate::license::LicenseSet;
use crate::reconcile::ReconcileOutcome;
use crate::scan::ScanOutcome;

/// Summary of a successful run.
///
/// Emitted by the CLI as JSON or text once every step has passed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    pub tool: ToolInfo,
    pub files_scanned: usize,
    pub annotated: Vec<AnnotatedFile>,
    /// Sorted identifiers found across all files.
    pub licenses: Vec<String>,
    pub reconciliation: ReconcileOutcome,
}

impl RunSummary {
    pub fn new(tool: ToolInfo, scan: ScanOutcome, reconciliation: ReconcileOutcome) -> Self {
        Self {
            tool,
            files_scanned: scan.files_scanned,
            annotated: scan.annotated,
            licenses: license_list(&scan.licenses),
            reconciliation,
        }
    }
}

fn license_list(licenses: &LicenseSet) -> Vec<String> {
    licenses.iter().map(str::to_string).collect()
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// A file that received license and copyright annotations in this run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedFile {
    pub path: String,
    pub licenses: Vec<String>,
    pub authors: Vec<AuthorCredit>,
    /// Authorship came from the local identity, not from history.
    pub local_identity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorCredit {
    pub author: String,
    pub years: YearSpan,
}

impl AuthorCredit {
    pub fn from_map(authors: &AuthorYears) -> Vec<Self> {
        authors
            .spans()
            .map(|(author, years)| Self {
                author: author.to_string(),
                years,
            })
            .collect()
    }
}
