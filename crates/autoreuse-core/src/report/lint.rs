use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// Subset of the `reuse lint --json` document this tool relies on.
///
/// Unknown fields are ignored so newer tool versions keep parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LintReport {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl LintReport {
    pub fn parse(json: &str) -> Result<Self, ComplianceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One repository file as seen by the lint tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    #[serde(default)]
    pub spdx_expressions: Vec<ReportEntry>,
    #[serde(default)]
    pub copyrights: Vec<ReportEntry>,
}

impl FileRecord {
    /// Declared license expressions, in report order.
    pub fn licenses(&self) -> Vec<String> {
        self.spdx_expressions
            .iter()
            .map(|e| e.value.clone())
            .collect()
    }

    pub fn has_copyright(&self) -> bool {
        !self.copyrights.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub value: String,
    #[serde(default)]
    pub source: Option<String>,
}
