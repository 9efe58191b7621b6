use crate::TOOL_NAME;
use crate::report::model::RunSummary;

pub fn render_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", TOOL_NAME, summary.tool.version));
    out.push_str(&format!("Files scanned: {}\n", summary.files_scanned));
    out.push_str(&format!("Files annotated: {}\n", summary.annotated.len()));
    for file in &summary.annotated {
        out.push_str(&format!("  - {} [{}]\n", file.path, file.licenses.join(", ")));
        for credit in &file.authors {
            let years = credit
                .years
                .years()
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join("-");
            let origin = if file.local_identity {
                " (local identity)"
            } else {
                ""
            };
            out.push_str(&format!("      {} {}{}\n", years, credit.author, origin));
        }
    }
    out.push_str(&format!("Licenses in use: {}\n", summary.licenses.join(", ")));

    let rec = &summary.reconciliation;
    out.push_str(&format!(
        "Declared license: {} (primary {})\n",
        rec.expression, rec.primary_license
    ));
    out.push_str(&format!(
        "LICENSE: {}\n",
        if rec.top_level_license_updated {
            "updated"
        } else {
            "unchanged"
        }
    ));
    out.push_str(&format!(
        "Manifest license-files: {} ({})\n",
        rec.license_files.join(", "),
        if rec.manifest_updated {
            "updated"
        } else {
            "unchanged"
        }
    ));
    out
}
