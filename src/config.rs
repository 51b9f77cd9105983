use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(
    name = "igo",
    about = "Interactive Go: each line is appended to main() and the program is run again",
    version
)]
pub struct Config {
    /// Go source file to extend (a scratch module is used when omitted)
    pub file: Option<PathBuf>,

    /// The go command
    #[arg(long, env = "IGO_GO", default_value = "go")]
    pub go: PathBuf,

    /// Formatter that also resolves imports
    #[arg(long, env = "IGO_GOIMPORTS", default_value = "goimports")]
    pub goimports: PathBuf,

    /// Formatter used when goimports is not installed
    #[arg(long, env = "IGO_GOFMT", default_value = "gofmt")]
    pub gofmt: PathBuf,

    /// Rounds of unused-variable fixes tried per statement
    #[arg(long, default_value_t = 10)]
    pub max_fixes: usize,

    /// Log filter, e.g. "debug" or "igo=trace"
    #[arg(long, env = "IGO_LOG", default_value = "warn")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(&["igo"]).unwrap();
        assert_eq!(config.file, None);
        assert_eq!(config.max_fixes, 10);
    }

    #[test]
    fn file_and_flags() {
        let config =
            Config::try_parse_from(&["igo", "--max-fixes", "3", "--go", "/opt/go/bin/go", "x.go"])
                .unwrap();
        assert_eq!(config.file, Some(PathBuf::from("x.go")));
        assert_eq!(config.go, PathBuf::from("/opt/go/bin/go"));
        assert_eq!(config.max_fixes, 3);
    }

    #[test]
    fn at_most_one_file() {
        assert!(Config::try_parse_from(&["igo", "a.go", "b.go"]).is_err());
    }
}
