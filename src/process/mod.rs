//! Child processes whose stdout and stderr land in one buffer, in the order
//! they were written.

mod running;
mod sighook;
mod status;

pub use running::Running;
pub use sighook::sighook;
pub use status::Status;

use anyhow::Context;
use nix::fcntl::OFlag;
use nix::unistd::{pipe2, Pid};
use std::fs::File;
use std::io::Read;
use std::os::unix::io::FromRawFd;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub status: Status,
}

/// Spawns `cmd` in its own process group with stdin closed and both output
/// streams writing into a single pipe, then waits for it.
///
/// While the child runs its pid is published through `running`, so an
/// interrupt can be forwarded to the whole group.
pub fn combined(mut cmd: Command, running: Option<&Running>) -> anyhow::Result<Output> {
    let (read, write) = pipe2(OFlag::O_CLOEXEC).context("Failed to create a pipe.")?;
    let (mut reader, writer) = unsafe { (File::from_raw_fd(read), File::from_raw_fd(write)) };
    let writer2 = writer.try_clone().context("Failed to create a pipe.")?;

    let name = cmd.get_program().to_string_lossy().into_owned();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .stderr(Stdio::from(writer2))
        .process_group(0);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Invalid command: {}", name))?;
    // The write ends must be closed here or the read below never sees EOF.
    drop(cmd);

    if let Some(running) = running {
        running.store(Pid::from_raw(child.id() as i32))?;
    }

    let mut buf = Vec::new();
    let read = reader.read_to_end(&mut buf);
    let status = child.wait();

    if let Some(running) = running {
        running.reset()?;
    }

    read.context("Failed to read the output.")?;
    let status = status.context("Failed to wait the process.")?;

    Ok(Output {
        text: String::from_utf8_lossy(&buf).into_owned(),
        status: status.into(),
    })
}
