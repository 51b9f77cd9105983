use nix::sys::signal::Signal;
use std::convert::TryFrom;
use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    Signaled(Signal),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Status::Exited(c) => write!(f, "exit status {}", c),
            Status::Signaled(s) => write!(f, "signal: {}", s),
        }
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Status::Exited(code),
            (None, Some(sig)) => match Signal::try_from(sig) {
                Ok(sig) => Status::Signaled(sig),
                Err(_) => Status::Exited(128 + sig),
            },
            (None, None) => Status::Exited(-1),
        }
    }
}

impl Status {
    pub fn success(&self) -> bool {
        *self == Status::Exited(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_exit_is_success() {
        assert!(Status::Exited(0).success());
        assert!(!Status::Exited(2).success());
        assert!(!Status::Signaled(Signal::SIGINT).success());
    }

    #[test]
    fn display_matches_go_run() {
        assert_eq!(Status::Exited(1).to_string(), "exit status 1");
    }

    #[test]
    fn converts_raw_wait_status() {
        assert_eq!(Status::from(ExitStatus::from_raw(0)), Status::Exited(0));
        assert_eq!(Status::from(ExitStatus::from_raw(3 << 8)), Status::Exited(3));
        assert_eq!(
            Status::from(ExitStatus::from_raw(Signal::SIGINT as i32)),
            Status::Signaled(Signal::SIGINT)
        );
    }
}
