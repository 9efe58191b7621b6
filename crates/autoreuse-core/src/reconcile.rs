//! License reconciliation.
//!
//! Checks the manifest's license expression against the licenses found in
//! files, mirrors the primary license text into the top-level `LICENSE`
//! file, and records every license text in `[project].license-files`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::LicenseLayout;
use crate::error::ComplianceError;
use crate::license::LicenseSet;
use crate::license::expression::LicenseExpression;
use crate::manifest::ProjectManifest;
use crate::util::fs::copy_if_changed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub expression: String,
    pub primary_license: String,
    pub license_files: Vec<String>,
    pub top_level_license_updated: bool,
    pub manifest_updated: bool,
}

/// Reconcile the manifest at `manifest_path` with the licenses in `used`.
///
/// No manifest change is written unless every declared license is used and
/// has a text file under `root`.
pub fn reconcile(
    root: &Path,
    manifest_path: &Path,
    layout: &LicenseLayout,
    used: &LicenseSet,
) -> Result<ReconcileOutcome> {
    let mut manifest = ProjectManifest::load(manifest_path)?;
    let expression = manifest.license_expression()?.to_string();
    let parsed = LicenseExpression::parse(&expression)
        .with_context(|| format!("invalid license expression {expression:?}"))?;
    let declared = parsed.license_keys();
    let primary = parsed.primary_license().to_string();

    for license in &declared {
        if !used.contains(license) {
            return Err(ComplianceError::UnusedLicense {
                license: license.clone(),
            }
            .into());
        }
    }

    let primary_file = existing_text_file(root, layout, &primary)?;
    let top_level = layout.top_level_path(root);
    let top_level_license_updated = copy_if_changed(&root.join(&primary_file), &top_level)?;
    if top_level_license_updated {
        tracing::info!(license = %primary, path = %top_level.display(), "top-level license updated");
    }

    let license_files = declared
        .iter()
        .map(|license| existing_text_file(root, layout, license))
        .collect::<Result<Vec<_>>>()?;

    manifest.set_license_files(&license_files)?;
    let manifest_updated = manifest.save()?;
    if manifest_updated {
        tracing::info!(path = %manifest.path().display(), files = ?license_files, "manifest license files updated");
    }

    Ok(ReconcileOutcome {
        expression,
        primary_license: primary,
        license_files,
        top_level_license_updated,
        manifest_updated,
    })
}

/// Relative path of `license`'s text file, which must exist under `root`.
fn existing_text_file(root: &Path, layout: &LicenseLayout, license: &str) -> Result<String> {
    let relative = layout.text_file(license);
    if !root.join(&relative).is_file() {
        return Err(ComplianceError::MissingLicenseFile {
            license: license.to_string(),
            path: relative,
        }
        .into());
    }
    Ok(relative)
}
