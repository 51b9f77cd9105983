use crate::skeleton::Skeleton;

/// Go statement printing the sentinel; `println` writes to stderr, which the
/// runner merges with stdout.
const SENTINEL_STMT: &str = "println(\"\\x00igo:EOF\")";

/// An accepted statement and the discards synthesized to make it compile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub statement: String,
    pub fixes: Vec<String>,
}

impl Entry {
    pub fn new<T: Into<String>>(statement: T) -> Self {
        Self {
            statement: statement.into(),
            fixes: Vec::new(),
        }
    }

    /// Reads `name` once so the compiler stops calling it unused.
    pub fn discard(&mut self, name: &str) {
        self.fixes.push(format!("_ = {}", name));
    }

    fn write_to(&self, buf: &mut String) {
        push_line(buf, &self.statement);
        for fix in self.fixes.iter() {
            push_line(buf, fix);
        }
    }
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    if !line.ends_with('\n') {
        buf.push('\n');
    }
}

/// Builds the whole program: the skeleton up to the splice point, every
/// accepted entry, the candidate, the sentinel, then the rest of the
/// skeleton.
pub fn assemble(skeleton: &Skeleton, history: &[Entry], candidate: &Entry) -> String {
    let mut buf = String::with_capacity(skeleton.source().len() + 64);
    buf.push_str(skeleton.prefix());
    buf.push('\n');
    for entry in history.iter() {
        entry.write_to(&mut buf);
    }
    candidate.write_to(&mut buf);
    push_line(&mut buf, SENTINEL_STMT);
    buf.push_str(skeleton.suffix());
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splices_history_then_candidate_then_sentinel() {
        let mut first = Entry::new("x := 41");
        first.discard("x");
        let history = vec![first];
        let mut candidate = Entry::new("y := x");
        candidate.discard("y");

        let src = assemble(&Skeleton::empty(), &history, &candidate);
        assert_eq!(
            src,
            "package main\n\nfunc main() {\n\
             x := 41\n_ = x\n\
             y := x\n_ = y\n\
             println(\"\\x00igo:EOF\")\n\
             }\n"
        );
    }

    #[test]
    fn multi_line_statements_stay_intact() {
        let candidate = Entry::new("for i := 0; i < 2; i++ {\nprintln(i)\n}");
        let src = assemble(&Skeleton::empty(), &[], &candidate);
        assert!(src.contains("{\nfor i := 0; i < 2; i++ {\nprintln(i)\n}\nprintln("));
    }

    #[test]
    fn keeps_code_after_the_splice_point() {
        let sk = Skeleton::parse("package main\n\nfunc main() {\n\tdefer println(\"bye\")\n}\n").unwrap();
        let src = assemble(&sk, &[], &Entry::new("println(1)"));
        assert!(src.ends_with("println(1)\nprintln(\"\\x00igo:EOF\")\n}\n"));
        assert!(src.starts_with("package main\n\nfunc main() {\n\tdefer println(\"bye\")\n\n"));
    }
}
