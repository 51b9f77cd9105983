//! The program a session grows: its text and the point where statements are
//! spliced in.

use anyhow::Context;

const EMPTY: &str = "package main\n\nfunc main() {}\n";
const MAIN_STUB: &str = "\n\nfunc main() {}\n";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skeleton {
    source: String,
    offset: usize,
}

impl Skeleton {
    pub fn empty() -> Self {
        Self {
            source: String::from(EMPTY),
            offset: EMPTY.len() - 2,
        }
    }

    /// Finds the closing brace of `func main()` in `source`, forcing the
    /// package to `main` and appending an empty `main` when there is none.
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        let tokens = scan(source).context("failed to parse")?;
        let (start, end) = package_name(&tokens).context("failed to parse: missing package clause")?;

        if &source[start..end] != "main" {
            let rewritten = format!("{}main{}", &source[..start], &source[end..]);
            return Self::parse(&rewritten);
        }

        Ok(match main_body_end(&tokens) {
            Some(offset) => Self {
                source: String::from(source),
                offset,
            },
            None => {
                let source = format!("{}{}", source, MAIN_STUB);
                let offset = source.len() - 2;
                Self { source, offset }
            }
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn prefix(&self) -> &str {
        &self.source[..self.offset]
    }

    pub fn suffix(&self) -> &str {
        &self.source[self.offset..]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Ident,
    Punct(u8),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Token {
    kind: Kind,
    start: usize,
    end: usize,
    depth: usize,
    close: Option<usize>,
}

impl Token {
    fn is_ident(&self, src: &str, name: &str) -> bool {
        self.kind == Kind::Ident && &src[self.start..self.end] == name
    }
}

struct Tokens<'a> {
    src: &'a str,
    list: Vec<Token>,
}

fn position(src: &str, offset: usize) -> (usize, usize) {
    let before = &src.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let col = offset - before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1) + 1;
    (line, col)
}

fn fail<T>(src: &str, offset: usize, msg: &str) -> anyhow::Result<T> {
    let (line, col) = position(src, offset);
    anyhow::bail!("{}:{}: {}", line, col, msg)
}

fn is_ident_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric() || b >= 0x80
}

/// End of a quoted literal starting at `start`, one past the closing quote.
fn skip_quoted(src: &str, start: usize, quote: u8, what: &str) -> anyhow::Result<usize> {
    let bytes = src.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => break,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    fail(src, start, &format!("{} not terminated", what))
}

fn scan(src: &str) -> anyhow::Result<Tokens> {
    let bytes = src.as_bytes();
    let mut list: Vec<Token> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match b {
            b'/' if next == Some(b'/') => {
                i = src[i..].find('\n').map_or(bytes.len(), |n| i + n);
            }
            b'/' if next == Some(b'*') => match src[i + 2..].find("*/") {
                Some(n) => i += n + 4,
                None => return fail(src, i, "comment not terminated"),
            },
            b'"' => i = skip_quoted(src, i, b'"', "string literal")?,
            b'\'' => i = skip_quoted(src, i, b'\'', "rune literal")?,
            b'`' => match src[i + 1..].find('`') {
                Some(n) => i += n + 2,
                None => return fail(src, i, "raw string literal not terminated"),
            },
            b'0'..=b'9' => {
                while i < bytes.len() && (is_ident_byte(bytes[i]) || bytes[i] == b'.') {
                    i += 1;
                }
            }
            b if is_ident_byte(b) => {
                let start = i;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                list.push(Token {
                    kind: Kind::Ident,
                    start,
                    end: i,
                    depth: open.len(),
                    close: None,
                });
            }
            b if b.is_ascii_whitespace() => i += 1,
            b'{' | b'(' | b'[' => {
                open.push(list.len());
                list.push(Token {
                    kind: Kind::Punct(b),
                    start: i,
                    end: i + 1,
                    depth: open.len() - 1,
                    close: None,
                });
                i += 1;
            }
            b'}' | b')' | b']' => {
                let expected = match b {
                    b'}' => b'{',
                    b')' => b'(',
                    _ => b'[',
                };
                match open.pop() {
                    Some(idx) if list[idx].kind == Kind::Punct(expected) => {
                        list[idx].close = Some(i);
                    }
                    _ => return fail(src, i, &format!("unexpected '{}'", b as char)),
                }
                list.push(Token {
                    kind: Kind::Punct(b),
                    start: i,
                    end: i + 1,
                    depth: open.len(),
                    close: None,
                });
                i += 1;
            }
            _ => {
                list.push(Token {
                    kind: Kind::Punct(b),
                    start: i,
                    end: i + 1,
                    depth: open.len(),
                    close: None,
                });
                i += 1;
            }
        }
    }

    if let Some(idx) = open.pop() {
        let token = list[idx];
        if let Kind::Punct(b) = token.kind {
            return fail(src, token.start, &format!("'{}' is never closed", b as char));
        }
    }

    Ok(Tokens { src, list })
}

fn package_name(tokens: &Tokens) -> Option<(usize, usize)> {
    match tokens.list.as_slice() {
        [kw, name, ..] if kw.is_ident(tokens.src, "package") && name.kind == Kind::Ident => {
            Some((name.start, name.end))
        }
        _ => None,
    }
}

fn main_body_end(tokens: &Tokens) -> Option<usize> {
    tokens.list.windows(5).find_map(|w| match w {
        [func, name, lp, rp, body]
            if func.depth == 0
                && func.is_ident(tokens.src, "func")
                && name.is_ident(tokens.src, "main")
                && lp.kind == Kind::Punct(b'(')
                && rp.kind == Kind::Punct(b')')
                && body.kind == Kind::Punct(b'{') =>
        {
            body.close
        }
        _ => None,
    })
}
