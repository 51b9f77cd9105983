use crate::skeleton::Skeleton;
use crate::toolchain::Toolchain;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Where the program lives. A scratch module is deleted when dropped; a
/// user's file gets its original content back.
#[derive(Debug)]
pub enum Workspace {
    Scratch {
        dir: TempDir,
        path: PathBuf,
    },
    File {
        dir: PathBuf,
        path: PathBuf,
        original: Vec<u8>,
    },
}

impl Workspace {
    pub fn scratch<T: Toolchain>(toolchain: &mut T) -> anyhow::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("igo")
            .tempdir()
            .context("failed to create temporary directory")?;
        toolchain.init(dir.path())?;
        let path = dir.path().join("main.go");
        debug!(dir = %dir.path().display(), "scratch workspace ready");
        Ok(Self::Scratch { dir, path })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let original = fs::read(path).with_context(|| format!("bad file {:?}", path.display().to_string()))?;
        let dir = match path.parent() {
            Some(dir) if dir != Path::new("") => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self::File {
            dir,
            path: path.to_path_buf(),
            original,
        })
    }

    pub fn dir(&self) -> &Path {
        match self {
            Self::Scratch { dir, .. } => dir.path(),
            Self::File { dir, .. } => dir,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Scratch { path, .. } | Self::File { path, .. } => path,
        }
    }

    pub fn skeleton(&self) -> anyhow::Result<Skeleton> {
        match self {
            Self::Scratch { .. } => Ok(Skeleton::empty()),
            Self::File { path, original, .. } => {
                let source = std::str::from_utf8(original)
                    .with_context(|| format!("bad file {:?}", path.display().to_string()))?;
                Skeleton::parse(source)
            }
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Self::File { path, original, .. } = self {
            if let Err(e) = fs::write(&*path, &*original) {
                warn!("failed to restore {}: {}", path.display(), e);
            }
        }
    }
}
