use anyhow::Result;

use crate::error::ComplianceError;
use crate::history::AuthorYears;
use crate::tool::{Annotation, ComplianceTool};

/// Add every license in `licenses` to `path` with a single annotate call.
///
/// An empty list fails before the tool is touched; a file must never be
/// annotated without a license.
pub fn add_licenses(tool: &impl ComplianceTool, path: &str, licenses: &[String]) -> Result<()> {
    if licenses.is_empty() {
        return Err(ComplianceError::NoLicense {
            path: path.to_string(),
        }
        .into());
    }

    annotate_or_help(
        tool,
        &Annotation::Licenses {
            path: path.to_string(),
            licenses: licenses.to_vec(),
        },
    )
}

/// Merge one copyright statement per author into `path`.
///
/// Each call carries the author's first year, plus the last year when it
/// differs.
pub fn add_authors(tool: &impl ComplianceTool, path: &str, authors: &AuthorYears) -> Result<()> {
    for (author, years) in authors.spans() {
        annotate_or_help(
            tool,
            &Annotation::Copyright {
                path: path.to_string(),
                author: author.to_string(),
                years,
            },
        )?;
    }
    Ok(())
}

/// Run `annotation`; on failure show the annotate usage text before
/// returning the original error.
fn annotate_or_help(tool: &impl ComplianceTool, annotation: &Annotation) -> Result<()> {
    if let Err(err) = tool.annotate(annotation) {
        if let Err(help_err) = tool.annotate_help() {
            tracing::warn!(error = %help_err, "could not show annotate usage");
        }
        return Err(err);
    }
    Ok(())
}
