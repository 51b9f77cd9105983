use std::io::{self, Write};

/// Where the session's output and error messages go.
pub trait Console {
    fn out(&mut self, text: &str);
    fn err(&mut self, text: &str);
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Stdio;

impl Console for Stdio {
    fn out(&mut self, text: &str) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush());
    }

    fn err(&mut self, text: &str) {
        let _ = io::stderr().write_all(text.as_bytes());
    }
}

#[cfg(test)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    pub out: String,
    pub err: String,
}

#[cfg(test)]
impl Console for Transcript {
    fn out(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn err(&mut self, text: &str) {
        self.err.push_str(text);
    }
}
