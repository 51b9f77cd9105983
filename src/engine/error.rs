use thiserror::Error;

/// Why a statement was not accepted.
#[derive(Debug, Error)]
pub enum ExecError {
    /// More input is needed before the statement parses.
    #[error("unexpected end of input")]
    Incomplete,

    #[error("{0}")]
    Compile(String),

    /// The program built but failed while running; its output since the
    /// last accepted statement.
    #[error("{0}")]
    Runtime(String),

    #[error("gave up after {0} rounds of fixing unused variables")]
    TooManyFixes(usize),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}
