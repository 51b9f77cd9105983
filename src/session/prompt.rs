extern crate rustyline;

use super::{Input, Reader};

use anyhow::Context;
use rustyline::{error::ReadlineError, Editor};

pub struct PromptReader(Editor<()>);

impl Reader for PromptReader {
    fn next_line(&mut self) -> anyhow::Result<Input> {
        self.read("> ")
    }

    fn more_line(&mut self) -> anyhow::Result<Input> {
        self.read("... ")
    }
}

impl PromptReader {
    pub fn new() -> Self {
        Self(Editor::<()>::new())
    }

    fn read(&mut self, prompt: &str) -> anyhow::Result<Input> {
        match self.0.readline(prompt) {
            Ok(s) => {
                if !s.trim().is_empty() {
                    self.0.add_history_entry(s.as_str());
                }
                Ok(Input::Line(s))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e).context("failed to read input"),
        }
    }
}
