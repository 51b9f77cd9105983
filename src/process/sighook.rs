extern crate signal_hook;

use super::Running;

use anyhow::Context;
use nix::sys::signal::{killpg, Signal};
use signal_hook::consts::signal;
use signal_hook::iterator::Signals;
use std::thread;
use tracing::{debug, warn};

/// Children run in their own process group, so the terminal's Ctrl-C only
/// reaches us. Relay it to the group in `running`, whatever reads the input.
pub fn sighook(running: &Running) -> anyhow::Result<()> {
    let mut signals = Signals::new(&[signal::SIGINT]).context("Failed to initialize signals.")?;

    let running = running.clone();
    thread::spawn(move || {
        for _ in signals.forever() {
            match running.get() {
                Ok(Some(pid)) => match killpg(pid, Signal::SIGINT) {
                    Ok(()) => debug!(%pid, "interrupted"),
                    Err(e) => warn!("Failed to interrupt {}: {}", pid, e),
                },
                Ok(None) => (),
                Err(e) => warn!("Signal hook: {}", e),
            }
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{combined, Status};
    use nix::sys::signal::raise;
    use pretty_assertions::assert_eq;
    use std::process::Command;
    use std::time::{Duration, Instant};

    #[test]
    fn interrupt_reaches_the_running_group() {
        let running = Running::new();
        sighook(&running).unwrap();

        let child = running.clone();
        let handle = thread::spawn(move || {
            let mut cmd = Command::new("sleep");
            cmd.arg("30");
            combined(cmd, Some(&child))
        });

        let start = Instant::now();
        while running.get().unwrap().is_none() {
            assert!(start.elapsed() < Duration::from_secs(10), "child never started");
            thread::sleep(Duration::from_millis(10));
        }
        raise(Signal::SIGINT).unwrap();

        let out = handle.join().unwrap().unwrap();
        assert_eq!(out.status, Status::Signaled(Signal::SIGINT));
        assert!(start.elapsed() < Duration::from_secs(20));
    }
}
