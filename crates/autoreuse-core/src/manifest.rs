//! Typed access to the project manifest (`pyproject.toml`).
//!
//! The document is held as a `toml_edit::DocumentMut`, so key order,
//! comments and formatting outside the fields touched here survive a
//! load/save round trip.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use toml_edit::{Array, DocumentMut, Item, TableLike, Value};

use crate::error::ComplianceError;
use crate::util::fs::atomic_write;

const PROJECT: &str = "project";
const LICENSE: &str = "license";
const LICENSE_FILES: &str = "license-files";

#[derive(Debug, Clone)]
pub struct ProjectManifest {
    path: PathBuf,
    doc: DocumentMut,
    original: String,
}

impl ProjectManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(path, text)
    }

    /// Parse manifest text that claims to come from `path`.
    pub fn parse(path: &Path, text: String) -> Result<Self> {
        let doc = text.parse::<DocumentMut>().map_err(|e| ComplianceError::InvalidManifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            doc,
            original: text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `[project].license`, which must be an SPDX expression string.
    pub fn license_expression(&self) -> Result<&str, ComplianceError> {
        let project = self.project()?;
        let item = project
            .get(LICENSE)
            .ok_or_else(|| self.invalid("missing `project.license`"))?;
        item.as_str()
            .ok_or_else(|| self.invalid("`project.license` must be an SPDX expression string"))
    }

    /// `[project].license-files`, if present and a list of strings.
    #[cfg(test)]
    fn license_files(&self) -> Option<Vec<String>> {
        let array = self.project().ok()?.get(LICENSE_FILES)?.as_array()?;
        array
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// Replace `[project].license-files`. An existing key keeps its position.
    pub fn set_license_files(&mut self, files: &[String]) -> Result<(), ComplianceError> {
        let mut array = Array::new();
        for file in files {
            array.push(file.as_str());
        }
        let invalid = self.invalid("missing `[project]` table");
        let project = self
            .doc
            .get_mut(PROJECT)
            .and_then(Item::as_table_like_mut)
            .ok_or(invalid)?;
        project.insert(LICENSE_FILES, Item::Value(Value::Array(array)));
        Ok(())
    }

    /// Whether the in-memory document differs from what was loaded.
    pub fn is_modified(&self) -> bool {
        self.doc.to_string() != self.original
    }

    /// Atomically write the document back if it changed.
    ///
    /// Returns whether the file was written.
    pub fn save(&mut self) -> Result<bool> {
        if !self.is_modified() {
            return Ok(false);
        }
        let rendered = self.doc.to_string();
        atomic_write(&self.path, rendered.as_bytes())
            .with_context(|| format!("failed to save manifest {}", self.path.display()))?;
        self.original = rendered;
        Ok(true)
    }

    fn project(&self) -> Result<&dyn TableLike, ComplianceError> {
        self.doc
            .get(PROJECT)
            .and_then(Item::as_table_like)
            .ok_or_else(|| self.invalid("missing `[project]` table"))
    }

    fn invalid(&self, reason: &str) -> ComplianceError {
        ComplianceError::InvalidManifest {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
