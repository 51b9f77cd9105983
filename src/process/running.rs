use nix::unistd::Pid;
use std::sync::{Arc, Mutex};

/// Process group of the child currently being waited on, shared with the
/// signal thread.
#[derive(Debug, Default)]
pub struct Running(Arc<Mutex<Option<Pid>>>);

impl Clone for Running {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl Running {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> anyhow::Result<Option<Pid>> {
        let lock = match self.0.lock() {
            Ok(l) => l,
            Err(e) => anyhow::bail!("Failed to get the lock: {}", e),
        };

        Ok(*lock)
    }

    pub fn store(&self, pid: Pid) -> anyhow::Result<()> {
        let mut lock = match self.0.lock() {
            Ok(l) => l,
            Err(e) => anyhow::bail!("Failed to get the lock: {}", e),
        };

        *lock = Some(pid);
        Ok(())
    }

    pub fn reset(&self) -> anyhow::Result<()> {
        let mut lock = match self.0.lock() {
            Ok(l) => l,
            Err(e) => anyhow::bail!("Failed to get the lock: {}", e),
        };

        *lock = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_slot() {
        let running = Running::new();
        let other = running.clone();
        running.store(Pid::from_raw(42)).unwrap();
        assert_eq!(other.get().unwrap(), Some(Pid::from_raw(42)));
        other.reset().unwrap();
        assert_eq!(running.get().unwrap(), None);
    }
}
