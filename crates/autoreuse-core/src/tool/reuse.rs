use anyhow::{Context, Result};

use super::runner::{CommandRunner, Invocation, OutputMode};
use super::{Annotation, ComplianceTool};
use crate::report::lint::LintReport;

/// `ComplianceTool` backed by the `reuse` command-line program.
#[derive(Debug, Clone)]
pub struct ReuseCli<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> ReuseCli<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.program, args)
    }
}

impl<R: CommandRunner> ComplianceTool for ReuseCli<R> {
    fn report(&self) -> Result<LintReport> {
        let inv = self.invocation(["lint", "--json"]);
        let out = self.runner.run(&inv)?;
        let report = LintReport::parse(&out.stdout)
            .with_context(|| format!("could not parse output of `{}`", inv.command_line()))?;
        Ok(report)
    }

    fn annotate(&self, annotation: &Annotation) -> Result<()> {
        let inv = self
            .invocation(std::iter::once("annotate".to_string()).chain(annotation.to_args()))
            .output(OutputMode::Discard);
        self.runner.run(&inv)?.check(&inv)?;
        Ok(())
    }

    fn annotate_help(&self) -> Result<()> {
        let inv = self
            .invocation(["annotate", "--help"])
            .env("COLUMNS", "80")
            .output(OutputMode::Inherit);
        self.runner.run(&inv)?.check(&inv)?;
        Ok(())
    }

    fn download_missing(&self) -> Result<()> {
        let inv = self
            .invocation(["download", "--all"])
            .output(OutputMode::Inherit);
        self.runner.run(&inv)?.check(&inv)?;
        Ok(())
    }

    fn lint(&self) -> Result<()> {
        let inv = self.invocation(["lint"]).output(OutputMode::Inherit);
        self.runner.run(&inv)?.check(&inv)?;
        Ok(())
    }
}
