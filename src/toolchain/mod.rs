mod go;
#[cfg(test)]
mod script;

pub use go::Go;
#[cfg(test)]
pub use script::Script;

use crate::process::Output;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formatted {
    /// The program with imports resolved and formatting applied.
    Source(String),
    /// The formatter could not parse the program; its diagnostics.
    Rejected(String),
}

/// What the session needs from a compiler: a module to work in, a
/// formatter that fixes imports, and a way to build and run one file.
pub trait Toolchain {
    fn init(&mut self, dir: &Path) -> anyhow::Result<()>;
    fn format(&mut self, path: &Path) -> anyhow::Result<Formatted>;
    fn run(&mut self, path: &Path, dir: &Path) -> anyhow::Result<Output>;
}
