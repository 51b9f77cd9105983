use super::{Input, Reader};
use anyhow::Context;
use std::io::{BufRead, Lines};

/// Reads lines without prompting, for piped input.
pub struct IOReader<R>(Lines<R>);

impl<R: BufRead> IOReader<R> {
    pub fn new(reader: R) -> Self {
        Self(reader.lines())
    }
}

impl<R: BufRead> Reader for IOReader<R> {
    fn next_line(&mut self) -> anyhow::Result<Input> {
        match self.0.next() {
            Some(line) => Ok(Input::Line(line.context("failed to read input")?)),
            None => Ok(Input::Eof),
        }
    }
}
