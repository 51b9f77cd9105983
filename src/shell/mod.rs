//! Commands typed after `:`, run next to the program instead of inside it.

mod parse;

pub use parse::split;

use crate::process::{self, Output, Running};

use std::path::Path;
use std::process::Command;

pub fn exec(argv: &[String], dir: &Path, running: &Running) -> anyhow::Result<Output> {
    let (name, args) = match argv.split_first() {
        Some(split) => split,
        None => anyhow::bail!("empty command"),
    };
    let mut cmd = Command::new(name);
    cmd.args(args).current_dir(dir);
    process::combined(cmd, Some(running))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn runs_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let out = exec(&split("ls").unwrap(), dir.path(), &Running::new()).unwrap();
        assert_eq!(out.text, "marker.txt\n");
        assert!(out.status.success());
    }

    #[test]
    fn failure_keeps_output() {
        let dir = tempfile::tempdir().unwrap();
        let argv = split("sh -c 'echo nope >&2; exit 4'").unwrap();
        let out = exec(&argv, dir.path(), &Running::new()).unwrap();
        assert_eq!(out.text, "nope\n");
        assert!(!out.status.success());
    }

    #[test]
    fn empty_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(exec(&[], dir.path(), &Running::new()).is_err());
    }
}
