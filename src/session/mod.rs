mod console;
mod io;
mod prompt;

pub use console::{Console, Stdio};
pub use io::IOReader;
pub use prompt::PromptReader;

#[cfg(test)]
pub use console::Transcript;

use crate::engine::{Engine, ExecError};
use crate::process::Running;
use crate::shell;
use crate::toolchain::Toolchain;

use tracing::debug;

const QUIT: [&str; 2] = [".quit", ".exit"];
const SHELL_PREFIX: char = ':';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted,
    Eof,
}

pub trait Reader: Sized {
    fn next_line(&mut self) -> anyhow::Result<Input>;
    fn more_line(&mut self) -> anyhow::Result<Input> {
        self.next_line()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub struct Session<R, T, C> {
    reader: R,
    toolchain: T,
    engine: Engine,
    console: C,
    running: Running,
}

fn is_quit(line: &str) -> bool {
    QUIT.iter().any(|q| *q == line)
}

impl<R: Reader, T: Toolchain, C: Console> Session<R, T, C> {
    pub fn new(reader: R, toolchain: T, engine: Engine, console: C, running: Running) -> Self {
        Self {
            reader,
            toolchain,
            engine,
            console,
            running,
        }
    }

    #[cfg(test)]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn next(&mut self) -> anyhow::Result<Step> {
        let line = match self.reader.next_line()? {
            Input::Line(s) => s,
            Input::Interrupted => return Ok(Step::Continue),
            Input::Eof => return Ok(Step::Quit),
        };
        let line = line.trim();

        if is_quit(line) {
            return Ok(Step::Quit);
        }
        if line.is_empty() {
            return Ok(Step::Continue);
        }
        if let Some(command) = line.strip_prefix(SHELL_PREFIX) {
            self.shell(command);
            return Ok(Step::Continue);
        }

        let mut statement = String::from(line);
        loop {
            match self.engine.exec(&mut self.toolchain, &statement) {
                Ok(Some(out)) => self.console.out(&out),
                Ok(None) => (),
                Err(ExecError::Incomplete) => {
                    let more = match self.reader.more_line()? {
                        Input::Line(s) => s,
                        Input::Interrupted => return Ok(Step::Continue),
                        Input::Eof => anyhow::bail!("failed to read input: unexpected end of input"),
                    };
                    let trimmed = more.trim();
                    if is_quit(trimmed) {
                        return Ok(Step::Quit);
                    }
                    // A shell command abandons the unfinished statement.
                    if let Some(command) = trimmed.strip_prefix(SHELL_PREFIX) {
                        debug!("statement dropped for shell command");
                        self.shell(command);
                        return Ok(Step::Continue);
                    }
                    statement.push('\n');
                    statement.push_str(more.trim_end());
                    debug!(lines = statement.lines().count(), "statement continues");
                    continue;
                }
                Err(e) => self.console.err(&format!("{:#}\n", e)),
            }
            return Ok(Step::Continue);
        }
    }

    fn shell(&mut self, command: &str) {
        let argv = match shell::split(command) {
            Ok(argv) if !argv.is_empty() => argv,
            Ok(_) => return self.console.err("bad command: empty command\n"),
            Err(e) => return self.console.err(&format!("bad command: {}\n", e)),
        };

        match shell::exec(&argv, self.engine.dir(), &self.running) {
            Ok(out) if out.status.success() => self.console.out(&out.text),
            Ok(out) if out.text.trim().is_empty() => {
                self.console.err(&format!("command failed: {}\n", out.status))
            }
            Ok(out) => self.console.err(&format!(
                "command failed: {}\n",
                out.text.trim_end_matches('\n')
            )),
            Err(e) => self.console.err(&format!("command failed: {:#}\n", e)),
        }
    }

    /// Reads until quit or end of input, then shows what the program printed
    /// after the last statement.
    pub fn all(&mut self) -> anyhow::Result<()> {
        while let Step::Continue = self.next()? {}

        let remainder = self.engine.take_remainder();
        if !remainder.is_empty() {
            self.console.out(&remainder);
        }
        Ok(())
    }
}
