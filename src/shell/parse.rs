extern crate unindent;

use combine::parser::char::{hex_digit, spaces, string};
use combine::stream::position;
use combine::{any, attempt, choice, eof, many, many1, one_of, satisfy, sep_end_by, token, value};
use combine::{EasyParser, Parser, Stream};
use unindent::unindent;

/// Splits a command line into words the way a shell would, without any
/// expansion.
pub fn split(input: &str) -> anyhow::Result<Vec<String>> {
    match words().skip(eof()).easy_parse(position::Stream::new(input)) {
        Ok((words, _)) => Ok(words),
        Err(e) => anyhow::bail!(e.to_string().replace('\n', " ").trim().to_string()),
    }
}

fn words<I: Stream<Token = char>>() -> impl Parser<I, Output = Vec<String>> {
    spaces().with(sep_end_by(word(), spaces()))
}

fn word<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    many1(choice((
        attempt(raw_unindent()),
        raw_str(),
        attempt(lit_unindent()),
        lit_str(),
        bare(),
    )))
    .map(|parts: Vec<String>| parts.concat())
}

fn bare<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    many1(choice((
        token('\\').with(any()),
        satisfy(|c: char| !c.is_whitespace() && c != '\'' && c != '"' && c != '\\'),
    )))
}

fn hex(digits: &str) -> u32 {
    digits.chars().fold(0u32, |acc, d| {
        acc.saturating_mul(16).saturating_add(d.to_digit(16).unwrap_or(0))
    })
}

fn lit_unindent<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    string("\"\"")
        .with(lit_str())
        .skip(string("\"\""))
        .map(|s| unindent(&s))
}

fn lit_str<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    token('"')
        .with(many(satisfy(|c| c != '"').then(|c| {
            if c == '\\' {
                choice((
                    one_of("abefnrtv\\\"".chars()).map(|seq| match seq {
                        'a' => '\x07',
                        'b' => '\x08',
                        'e' => '\x1b',
                        'f' => '\x0c',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'v' => '\x0b',
                        '"' => '"',
                        _ => '\\',
                    }),
                    // Words are UTF-8, so `\xHH` stops at 7f.
                    token('x')
                        .with(one_of("01234567".chars()).and(hex_digit()))
                        .map(|(hi, lo): (char, char)| char::from(hex(&format!("{}{}", hi, lo)) as u8)),
                    one_of("uU".chars())
                        .and(token('{'))
                        .with(many1(hex_digit()).map(|s: String| {
                            std::char::from_u32(hex(&s)).unwrap_or(std::char::REPLACEMENT_CHARACTER)
                        }))
                        .skip(token('}')),
                ))
                .left()
            } else {
                value(c).right()
            }
        })))
        .skip(token('"'))
}

fn raw_unindent<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    string("''")
        .with(raw_str())
        .skip(string("''"))
        .map(|s| unindent(&s))
}

fn raw_str<I: Stream<Token = char>>() -> impl Parser<I, Output = String> {
    token('\'')
        .with(many(choice((
            attempt(string("\\\\")).map(|_| '\\'),
            attempt(string("\\\'")).map(|_| '\''),
            satisfy(|c| c != '\''),
        ))))
        .skip(token('\''))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ok(input: &str) -> Vec<String> {
        split(input).unwrap()
    }

    #[test]
    fn plain_words() {
        assert_eq!(ok("go   vet  ./..."), vec!["go", "vet", "./..."]);
        assert_eq!(ok("  true "), vec!["true"]);
        assert!(ok("").is_empty());
    }

    #[test]
    fn quotes_join_adjacent_text() {
        assert_eq!(ok(r#"echo "a b"'c d'e"#), vec!["echo", "a bc de"]);
        assert_eq!(ok(r#"printf '' x"#), vec!["printf", "", "x"]);
    }

    #[test]
    fn escapes() {
        assert_eq!(ok(r"a\ b"), vec!["a b"]);
        assert_eq!(ok(r#""tab\there" "\x41\u{263a}""#), vec!["tab\there", "A\u{263a}"]);
        assert_eq!(ok(r"'it\'s' 'back\\slash'"), vec!["it's", "back\\slash"]);
        assert_eq!(ok(r#"'raw \n'"#), vec!["raw \\n"]);
    }

    #[test]
    fn hex_escape_is_ascii_only() {
        assert_eq!(ok(r#""\x7f\x0a""#), vec!["\x7f\n"]);
        assert!(split(r#""\xff""#).is_err());
        assert!(split(r#""\x8""#).is_err());
    }

    #[test]
    fn triple_quotes_unindent() {
        let words = ok("cat '''\n    one\n      two\n    '''");
        assert_eq!(words, vec!["cat", "one\n  two\n"]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(split("echo 'open").is_err());
        assert!(split("echo \"open").is_err());
        assert!(split("trailing\\").is_err());
    }
}
