use super::{Formatted, Toolchain};
use crate::config::Config;
use crate::process::{self, Output, Running};

use anyhow::Context;
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

const MODULE: &str = "igo.localhost";

#[derive(Debug)]
pub struct Go {
    go: PathBuf,
    goimports: Option<PathBuf>,
    gofmt: PathBuf,
    running: Running,
}

impl Go {
    pub fn new(config: &Config, running: Running) -> Self {
        Self {
            go: config.go.clone(),
            goimports: Some(config.goimports.clone()),
            gofmt: config.gofmt.clone(),
            running,
        }
    }
}

fn split(path: &Path) -> anyhow::Result<(&Path, &OsStr)> {
    let name = path
        .file_name()
        .with_context(|| format!("Not a file: {}", path.display()))?;
    let dir = match path.parent() {
        Some(dir) if dir != Path::new("") => dir,
        _ => Path::new("."),
    };
    Ok((dir, name))
}

fn formatted(out: std::process::Output) -> Formatted {
    if out.status.success() {
        Formatted::Source(String::from_utf8_lossy(&out.stdout).into_owned())
    } else {
        let err = String::from_utf8_lossy(&out.stderr);
        Formatted::Rejected(String::from(err.trim_end()))
    }
}

impl Toolchain for Go {
    fn init(&mut self, dir: &Path) -> anyhow::Result<()> {
        let mut cmd = Command::new(&self.go);
        cmd.args(&["mod", "init", MODULE]).current_dir(dir);
        let out = process::combined(cmd, None)?;
        if !out.status.success() {
            anyhow::bail!("failed to run \"go mod init\": {}", out.text.trim());
        }
        debug!(dir = %dir.display(), "module initialized");
        Ok(())
    }

    fn format(&mut self, path: &Path) -> anyhow::Result<Formatted> {
        let (dir, name) = split(path)?;

        if let Some(goimports) = self.goimports.clone() {
            match Command::new(&goimports).arg(name).current_dir(dir).output() {
                Ok(out) => return Ok(formatted(out)),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(
                        "{} not found, falling back to {}; imports will not be resolved",
                        goimports.display(),
                        self.gofmt.display()
                    );
                    self.goimports = None;
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Invalid command: {}", goimports.display()))
                }
            }
        }

        let out = Command::new(&self.gofmt)
            .arg(name)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Invalid command: {}", self.gofmt.display()))?;
        Ok(formatted(out))
    }

    fn run(&mut self, path: &Path, dir: &Path) -> anyhow::Result<Output> {
        let target = path.strip_prefix(dir).unwrap_or(path);
        let mut cmd = Command::new(&self.go);
        cmd.arg("run").arg(target).current_dir(dir);
        process::combined(cmd, Some(&self.running))
    }
}
