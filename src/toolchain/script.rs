use super::{Formatted, Toolchain};
use crate::process::{Output, Status};

use nix::sys::signal::Signal;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
enum Step {
    Reject(String),
    Run(Output),
}

/// Plays back canned formatter rejections and run results in order. Formats
/// that are not scripted pass the program through unchanged.
#[derive(Clone, Debug, Default)]
pub struct Script {
    steps: VecDeque<Step>,
    /// Every program handed to the formatter.
    pub programs: Vec<String>,
    pub inits: Vec<PathBuf>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok<T: Into<String>>(self, text: T) -> Self {
        self.push_run(text, Status::Exited(0))
    }

    pub fn failed<T: Into<String>>(self, text: T, code: i32) -> Self {
        self.push_run(text, Status::Exited(code))
    }

    pub fn signaled<T: Into<String>>(self, text: T) -> Self {
        self.push_run(text, Status::Signaled(Signal::SIGINT))
    }

    pub fn rejected<T: Into<String>>(mut self, msg: T) -> Self {
        self.steps.push_back(Step::Reject(msg.into()));
        self
    }

    pub fn pending(&self) -> usize {
        self.steps.len()
    }

    fn push_run<T: Into<String>>(mut self, text: T, status: Status) -> Self {
        self.steps.push_back(Step::Run(Output {
            text: text.into(),
            status,
        }));
        self
    }
}

impl Toolchain for Script {
    fn init(&mut self, dir: &Path) -> anyhow::Result<()> {
        self.inits.push(dir.to_path_buf());
        Ok(())
    }

    fn format(&mut self, path: &Path) -> anyhow::Result<Formatted> {
        let program = fs::read_to_string(path)?;
        self.programs.push(program.clone());
        if let Some(Step::Reject(_)) = self.steps.front() {
            if let Some(Step::Reject(msg)) = self.steps.pop_front() {
                return Ok(Formatted::Rejected(msg));
            }
        }
        Ok(Formatted::Source(program))
    }

    fn run(&mut self, _path: &Path, _dir: &Path) -> anyhow::Result<Output> {
        match self.steps.pop_front() {
            Some(Step::Run(out)) => Ok(out),
            other => panic!("unscripted run, next step {:?}", other),
        }
    }
}
