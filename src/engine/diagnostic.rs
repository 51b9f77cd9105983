use once_cell::sync::Lazy;
use regex::Regex;

static RECORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\.{1,2}/)?[^\s:]+):(\d+):(\d+):\s*(.+)$").expect("valid diagnostic pattern")
});

const FOUND_EOF: &str = "found 'EOF'";
const UNUSED: &str = "declared and not used: ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Class<'a> {
    /// The statement stops before its syntax does.
    Incomplete,
    /// A local binding nothing reads.
    Unused(&'a str),
    Other,
}

impl Diagnostic {
    pub fn parse(line: &str) -> Option<Self> {
        let caps = RECORD.captures(line.trim_end_matches('\r'))?;
        Some(Self {
            file: String::from(&caps[1]),
            line: caps[2].parse().ok()?,
            column: caps[3].parse().ok()?,
            message: String::from(&caps[4]),
        })
    }

    pub fn parse_all(output: &str) -> Vec<Self> {
        output.lines().filter_map(Self::parse).collect()
    }

    pub fn class(&self) -> Class {
        let msg = self.message.as_str();
        if msg.contains(FOUND_EOF) {
            return Class::Incomplete;
        }
        if let Some(name) = msg.strip_prefix(UNUSED) {
            return Class::Unused(name.trim());
        }
        // Compilers before Go 1.20 put the name first.
        for suffix in [" declared and not used", " declared but not used"].iter() {
            if let Some(name) = msg.strip_suffix(*suffix) {
                if !name.contains(char::is_whitespace) {
                    return Class::Unused(name);
                }
            }
        }
        Class::Other
    }
}

/// Whether formatter or compiler output says the input ended too early.
pub fn is_incomplete(output: &str) -> bool {
    let diags = Diagnostic::parse_all(output);
    if diags.is_empty() {
        return output.contains(FOUND_EOF);
    }
    diags.iter().any(|d| d.class() == Class::Incomplete)
}

/// Distinct unused identifiers, in the order the compiler reported them.
pub fn unused_names(diags: &[Diagnostic]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for diag in diags {
        if let Class::Unused(name) = diag.class() {
            if !names.iter().any(|n| n == name) {
                names.push(String::from(name));
            }
        }
    }
    names
}
