use thiserror::Error;

/// Fatal conditions raised while bringing a tree into compliance.
///
/// Every variant aborts the run. Operations return `anyhow::Result` and
/// callers recover the kind with `downcast_ref::<ComplianceError>()`.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("copyright author missing from {path}")]
    NoAuthor { path: String },

    #[error("no license specified in REUSE.toml for {path}")]
    NoLicense { path: String },

    #[error("license {license} appears in the manifest but is not used to license any file")]
    UnusedLicense { license: String },

    #[error("license {license} appears in the manifest but {path} does not exist")]
    MissingLicenseFile { license: String, path: String },

    #[error("`{command}` failed with {}", describe_status(.status))]
    ToolFailed { command: String, status: Option<i32> },

    #[error("malformed history entry {line:?}: {reason}")]
    MalformedHistory { line: String, reason: String },

    #[error("malformed lint report: {0}")]
    MalformedReport(#[from] serde_json::Error),

    #[error("invalid manifest {path}: {reason}")]
    InvalidManifest { path: String, reason: String },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
