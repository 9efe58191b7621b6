#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn autoreuse_cmd() -> Command {
    Command::cargo_bin("autoreuse").expect("binary should be built")
}

#[test]
fn help_describes_the_tool() {
    autoreuse_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn missing_reuse_program_fails() {
    let dir = tempfile::tempdir().unwrap();

    autoreuse_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("--reuse")
        .arg("autoreuse-test-no-such-reuse")
        .arg("--git")
        .arg("autoreuse-test-no-such-git")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn debug_logging_reports_resolved_configuration() {
    let dir = tempfile::tempdir().unwrap();

    autoreuse_cmd()
        .env("RUST_LOG", "debug")
        .arg("--root")
        .arg(dir.path())
        .arg("--reuse")
        .arg("autoreuse-test-no-such-reuse")
        .arg("--git")
        .arg("autoreuse-test-no-such-git")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("resolved configuration"))
        .stderr(predicate::str::contains("autoreuse-test-no-such-reuse"));
}

/// A throwaway repository plus shell stand-ins for `reuse` and `git`.
///
/// The fake `reuse` appends each invocation to `calls.log` next to itself.
#[cfg(unix)]
struct Sandbox {
    repo: TempDir,
    bin: TempDir,
}

#[cfg(unix)]
impl Sandbox {
    fn new(license: &str, report: &str) -> Self {
        let repo = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();

        fs::write(
            repo.path().join("pyproject.toml"),
            format!("[project]\nname = \"demo\"\nlicense = \"{license}\"\n"),
        )
        .unwrap();
        fs::create_dir(repo.path().join("LICENSES")).unwrap();
        fs::write(repo.path().join("LICENSES/MIT.txt"), "MIT License text\n").unwrap();
        fs::write(bin.path().join("report.json"), report).unwrap();

        let sandbox = Self { repo, bin };
        sandbox.script(
            "reuse",
            r#"here="$(dirname "$0")"
echo "$*" >> "$here/calls.log"
if [ "$1" = lint ] && [ "$2" = --json ]; then
  cat "$here/report.json"
  exit 1
fi
if [ "$1" = lint ]; then
  echo "Congratulations! Your project is compliant"
  exit "${FAKE_LINT_EXIT:-0}"
fi
exit 0"#,
        );
        sandbox.script(
            "git",
            r#"if [ "$1" = config ]; then
  echo "Test User"
  exit 0
fi
if [ "$1" = log ]; then
  echo "2021-01-01-Alice"
  echo "2023-05-05-Alice"
  exit 0
fi
exit 1"#,
        );
        sandbox
    }

    fn script(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn program(&self, name: &str) -> PathBuf {
        self.bin.path().join(name)
    }

    fn command(&self) -> Command {
        let mut cmd = autoreuse_cmd();
        cmd.arg("--root")
            .arg(self.repo.path())
            .arg("--reuse")
            .arg(self.program("reuse"))
            .arg("--git")
            .arg(self.program("git"));
        cmd
    }

    fn calls(&self) -> String {
        fs::read_to_string(self.bin.path().join("calls.log")).unwrap_or_default()
    }

    fn repo_file(&self, name: &str) -> String {
        fs::read_to_string(self.repo.path().join(name)).unwrap()
    }
}

#[cfg(unix)]
const ONE_UNANNOTATED: &str = r#"{"files": [
    {"path": "src/a.py", "spdx_expressions": [{"value": "MIT"}], "copyrights": []},
    {"path": "src/b.py", "spdx_expressions": [{"value": "MIT"}], "copyrights": [{"value": "2020 Bob"}]}
]}"#;

#[cfg(unix)]
#[test]
fn annotates_and_syncs_license_files() {
    let sandbox = Sandbox::new("MIT", ONE_UNANNOTATED);

    sandbox
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Files annotated: 1"))
        .stdout(predicate::str::contains("2021-2023 Alice"))
        .stdout(predicate::str::contains("Congratulations"));

    let calls = sandbox.calls();
    assert!(calls.contains("annotate --license MIT src/a.py"));
    assert!(calls.contains(
        "annotate --merge-copyrights --copyright Alice --year 2021 --year 2023 src/a.py"
    ));
    assert!(!calls.contains("src/b.py"));
    assert!(calls.contains("download --all"));

    assert_eq!(sandbox.repo_file("LICENSE"), "MIT License text\n");
    assert!(
        sandbox
            .repo_file("pyproject.toml")
            .contains("license-files = [\"LICENSES/MIT.txt\"]")
    );
}

#[cfg(unix)]
#[test]
fn json_summary_is_valid() {
    let sandbox = Sandbox::new("MIT", ONE_UNANNOTATED);

    let output = sandbox
        .command()
        .arg("--format")
        .arg("json")
        .output()
        .expect("command should run");
    assert!(output.status.success());

    // The passthrough lint output precedes the summary on stdout.
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json_start = stdout.find('{').expect("summary present");
    let parsed: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();

    assert_eq!(parsed["tool"]["name"], "autoreuse-cli");
    assert_eq!(parsed["files_scanned"], 2);
    assert_eq!(parsed["annotated"][0]["path"], "src/a.py");
    assert_eq!(parsed["annotated"][0]["authors"][0]["years"]["first"], 2021);
    assert_eq!(parsed["licenses"][0], "MIT");
    assert_eq!(parsed["reconciliation"]["primary_license"], "MIT");
    assert_eq!(parsed["reconciliation"]["manifest_updated"], true);
}

#[cfg(unix)]
#[test]
fn out_flag_writes_summary_file() {
    let sandbox = Sandbox::new("MIT", ONE_UNANNOTATED);
    let out = sandbox.bin.path().join("summary.txt");

    sandbox.command().arg("--out").arg(&out).assert().success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("autoreuse 0.1.0"));
}

#[cfg(unix)]
#[test]
fn unused_declared_license_fails() {
    let sandbox = Sandbox::new("MIT OR Apache-2.0", ONE_UNANNOTATED);
    let before = sandbox.repo_file("pyproject.toml");

    sandbox
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "license Apache-2.0 appears in the manifest but is not used",
        ));

    assert_eq!(sandbox.repo_file("pyproject.toml"), before);
}

#[cfg(unix)]
#[test]
fn failing_final_lint_aborts_before_reconciliation() {
    let sandbox = Sandbox::new("MIT", ONE_UNANNOTATED);

    sandbox
        .command()
        .env("FAKE_LINT_EXIT", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lint` failed with exit code 1"));

    assert!(!sandbox.repo.path().join("LICENSE").exists());
}

#[cfg(unix)]
#[test]
fn file_without_license_fails() {
    let sandbox = Sandbox::new(
        "MIT",
        r#"{"files": [{"path": "bare.py", "spdx_expressions": [], "copyrights": []}]}"#,
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no license specified"));

    assert!(!sandbox.calls().contains("annotate"));
}

#[cfg(unix)]
#[test]
fn compliant_tree_is_left_alone_on_rerun() {
    let sandbox = Sandbox::new(
        "MIT",
        r#"{"files": [{"path": "a.py", "spdx_expressions": [{"value": "MIT"}], "copyrights": [{"value": "2021 Alice"}]}]}"#,
    );

    sandbox.command().assert().success();
    let manifest = sandbox.repo_file("pyproject.toml");
    let license = sandbox.repo_file("LICENSE");

    sandbox
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("LICENSE: unchanged"));

    assert_eq!(sandbox.repo_file("pyproject.toml"), manifest);
    assert_eq!(sandbox.repo_file("LICENSE"), license);
    assert!(!sandbox.calls().contains("annotate"));
}
