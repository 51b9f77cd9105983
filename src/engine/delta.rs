/// The sentinel line printed right after the newest statement; splits its
/// output from the output of code that follows the splice point.
const MARKER: &str = "\x00igo:EOF\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delta<'a> {
    /// Output of the newest statement only.
    pub text: &'a str,
    /// Output printed after the sentinel.
    pub remainder: String,
}

impl<'a> Delta<'a> {
    /// Skips the first `shown` lines of `output` (the previous statements
    /// print them again on every run) and stops at the sentinel.
    pub fn extract(output: &'a str, shown: usize) -> Self {
        let start = if shown == 0 {
            0
        } else {
            output
                .match_indices('\n')
                .nth(shown - 1)
                .map_or(output.len(), |(i, _)| i + 1)
        };

        let (end, rest) = match output[start..].find(MARKER) {
            Some(i) => (start + i, &output[start + i + MARKER.len()..]),
            None => (output.len(), ""),
        };

        let remainder = if rest.is_empty() {
            String::new()
        } else {
            format!("{}\n", rest.strip_suffix('\n').unwrap_or(rest))
        };

        Self {
            text: &output[start..end],
            remainder,
        }
    }

    pub fn lines(&self) -> usize {
        self.text.matches('\n').count()
    }

    /// What the user sees: nothing, or the text ending in one newline.
    pub fn display(&self) -> Option<String> {
        let text = self.text.strip_suffix('\n').unwrap_or(self.text);
        if text.is_empty() {
            None
        } else {
            Some(format!("{}\n", text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_statement_output() {
        let d = Delta::extract("42\n\x00igo:EOF\n", 0);
        assert_eq!(d.text, "42\n");
        assert_eq!(d.lines(), 1);
        assert_eq!(d.remainder, "");
        assert_eq!(d.display().as_deref(), Some("42\n"));
    }

    #[test]
    fn skips_lines_already_shown() {
        let d = Delta::extract("a\nb\nc\nd\n\x00igo:EOF\n", 2);
        assert_eq!(d.text, "c\nd\n");
        assert_eq!(d.lines(), 2);
    }

    #[test]
    fn silent_statement_has_nothing_to_show() {
        let d = Delta::extract("a\n\x00igo:EOF\n", 1);
        assert_eq!(d.text, "");
        assert_eq!(d.display(), None);
    }

    #[test]
    fn keeps_output_after_sentinel_as_remainder() {
        let d = Delta::extract("x\n\x00igo:EOF\ndeferred\nbye", 0);
        assert_eq!(d.text, "x\n");
        assert_eq!(d.remainder, "deferred\nbye\n");
    }

    #[test]
    fn missing_sentinel_runs_to_end() {
        let d = Delta::extract("a\nb\npanic: boom\nexit status 2\n", 1);
        assert_eq!(d.text, "b\npanic: boom\nexit status 2\n");
        assert_eq!(d.remainder, "");
    }

    #[test]
    fn fewer_lines_than_shown() {
        let d = Delta::extract("a\n", 5);
        assert_eq!(d.text, "");
    }

    #[test]
    fn unterminated_line_is_shown_with_newline() {
        let d = Delta::extract("hello\x00igo:EOF\n", 0);
        assert_eq!(d.text, "hello");
        assert_eq!(d.lines(), 0);
        assert_eq!(d.display().as_deref(), Some("hello\n"));
    }
}
