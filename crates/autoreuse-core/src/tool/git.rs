use anyhow::Result;

use super::VersionControl;
use super::runner::{CommandRunner, Invocation};

/// Commit date and author name, one line per commit.
const AUTHOR_DATE_FORMAT: &str = "--pretty=format:%as-%aN";

/// `VersionControl` backed by the `git` command-line program.
#[derive(Debug, Clone)]
pub struct GitCli<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> GitCli<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl<R: CommandRunner> VersionControl for GitCli<R> {
    fn history(&self, path: &str) -> Result<Vec<String>> {
        let inv = Invocation::new(
            &self.program,
            ["log", "--follow", AUTHOR_DATE_FORMAT, "--", path],
        );
        let out = self.runner.run(&inv)?.check(&inv)?;
        Ok(out
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    fn user_name(&self) -> Result<Option<String>> {
        // `git config` exits 1 when the key is unset.
        let inv = Invocation::new(&self.program, ["config", "user.name"]);
        let out = self.runner.run(&inv)?;
        let name = out.stdout.trim();
        if !out.success() || name.is_empty() {
            return Ok(None);
        }
        Ok(Some(name.to_string()))
    }
}
