//! Runs one statement at a time against everything accepted so far.

mod assemble;
mod delta;
mod diagnostic;
mod error;

pub use assemble::Entry;
pub use error::ExecError;

use assemble::assemble;
use delta::Delta;
use diagnostic::Diagnostic;

use crate::process::{Output, Status};
use crate::skeleton::Skeleton;
use crate::toolchain::{Formatted, Toolchain};

use anyhow::Context;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Engine {
    skeleton: Skeleton,
    path: PathBuf,
    dir: PathBuf,
    shown: usize,
    history: Vec<Entry>,
    remainder: String,
    max_fixes: usize,
}

impl Engine {
    pub fn new<P: Into<PathBuf>, D: Into<PathBuf>>(
        skeleton: Skeleton,
        path: P,
        dir: D,
        max_fixes: usize,
    ) -> Self {
        Self {
            skeleton,
            path: path.into(),
            dir: dir.into(),
            shown: 0,
            history: Vec::new(),
            remainder: String::new(),
            max_fixes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[cfg(test)]
    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    #[cfg(test)]
    pub fn shown(&self) -> usize {
        self.shown
    }

    #[cfg(test)]
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn take_remainder(&mut self) -> String {
        mem::take(&mut self.remainder)
    }

    /// Runs the program with `statement` appended. On success the statement
    /// joins the history and its own output, if any, is returned.
    pub fn exec<T: Toolchain>(
        &mut self,
        toolchain: &mut T,
        statement: &str,
    ) -> Result<Option<String>, ExecError> {
        let mut candidate = Entry::new(statement);
        let mut fixed: Vec<String> = Vec::new();
        let mut rounds = 0;

        loop {
            let run = self.attempt(toolchain, &candidate)?;

            if run.status.success() {
                return Ok(self.commit(candidate, &run.text));
            }

            if is_runtime_failure(&run) {
                let delta = Delta::extract(&run.text, self.shown);
                debug!(status = %run.status, "program failed");
                return Err(ExecError::Runtime(String::from(
                    delta.text.trim_end_matches('\n'),
                )));
            }

            let diags = Diagnostic::parse_all(&run.text);
            let fresh: Vec<String> = diagnostic::unused_names(&diags)
                .into_iter()
                .filter(|name| !fixed.contains(name))
                .collect();

            if fresh.is_empty() {
                for d in diags.iter() {
                    debug!(file = %d.file, line = d.line, column = d.column, "{}", d.message);
                }
                return Err(ExecError::Compile(String::from(run.text.trim_end_matches('\n'))));
            }
            if rounds == self.max_fixes {
                return Err(ExecError::TooManyFixes(rounds));
            }
            rounds += 1;

            for name in fresh {
                debug!(name = %name, round = rounds, "discarding unused variable");
                candidate.discard(&name);
                fixed.push(name);
            }
        }
    }

    fn attempt<T: Toolchain>(&self, toolchain: &mut T, candidate: &Entry) -> Result<Output, ExecError> {
        let source = assemble(&self.skeleton, &self.history, candidate);
        fs::write(&self.path, source).context("failed to write file")?;

        match toolchain.format(&self.path)? {
            Formatted::Source(source) => {
                fs::write(&self.path, source).context("failed to write file")?;
            }
            Formatted::Rejected(msg) if diagnostic::is_incomplete(&msg) => {
                debug!("statement is incomplete");
                return Err(ExecError::Incomplete);
            }
            Formatted::Rejected(msg) => {
                return Err(ExecError::Compile(format!("failed to process imports: {}", msg)));
            }
        }

        Ok(toolchain.run(&self.path, &self.dir)?)
    }

    fn commit(&mut self, candidate: Entry, output: &str) -> Option<String> {
        let delta = Delta::extract(output, self.shown);
        let lines = delta.lines();
        info!(
            fixes = candidate.fixes.len(),
            lines,
            history = self.history.len() + 1,
            "statement accepted"
        );
        self.shown += lines;
        self.remainder = delta.remainder.clone();
        self.history.push(candidate);
        delta.display()
    }
}

/// `go run` reports how the built program ended on its last line, either
/// `exit status N` or `signal: NAME` once it relays an interrupt.
fn is_runtime_failure(run: &Output) -> bool {
    if let Status::Signaled(_) = run.status {
        return true;
    }
    run.text
        .trim_end_matches('\n')
        .rsplit('\n')
        .next()
        .map_or(false, |last| {
            last.starts_with("exit status ") || last.starts_with("signal: ")
        })
}
