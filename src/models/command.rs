//! Command data model: the program and arguments a probe launches

use crate::error::{AppError, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator accepted in front of the benchmarked command
pub const ARG_SEPARATOR: &str = "--";

/// An immutable program + argument vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Command {
    argv: Vec<String>,
}

impl Command {
    /// Build a command from an already tokenized argument vector
    pub fn new<I, S>(argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            return Err(AppError::validation("Command cannot be empty"));
        }
        Ok(Self { argv })
    }

    /// Build a command from raw command line arguments, dropping one leading `--`
    pub fn from_args(args: &[String]) -> Result<Self> {
        Self::new(strip_separator(args).iter().cloned())
    }

    /// Split a shell-style command string the way a POSIX shell would
    pub fn parse_shell(line: &str) -> Result<Self> {
        let words = shell_words::split(line)
            .with_context(|| format!("Invalid command string '{}'", line))?;
        if words.is_empty() {
            return Err(AppError::parse(format!("Command string '{}' contains no words", line)));
        }
        Self::new(words)
    }

    /// Program name or path (argv[0])
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the program
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// The complete argument vector
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Space-joined label used in single-command mode
    pub fn label(&self) -> String {
        self.argv.join(" ")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<Vec<String>> for Command {
    type Error = AppError;

    fn try_from(argv: Vec<String>) -> Result<Self> {
        Self::new(argv)
    }
}

impl From<Command> for Vec<String> {
    fn from(command: Command) -> Self {
        command.argv
    }
}

/// Drop a single leading `--` from raw positional arguments
pub fn strip_separator(args: &[String]) -> &[String] {
    match args.first() {
        Some(first) if first == ARG_SEPARATOR => &args[1..],
        _ => args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_shell_simple() {
        let command = Command::parse_shell("bun src/index.tsx").unwrap();
        assert_eq!(command.argv(), &strings(&["bun", "src/index.tsx"])[..]);
        assert_eq!(command.program(), "bun");
        assert_eq!(command.args(), &strings(&["src/index.tsx"])[..]);
    }

    #[test]
    fn test_parse_shell_quoted_argument() {
        let command = Command::parse_shell(r#"echo "hello world""#).unwrap();
        assert_eq!(command.argv(), &strings(&["echo", "hello world"])[..]);

        let command = Command::parse_shell("sh -c 'printf x; sleep 1'").unwrap();
        assert_eq!(command.argv(), &strings(&["sh", "-c", "printf x; sleep 1"])[..]);
    }

    #[test]
    fn test_parse_shell_unbalanced_quote_is_parse_error() {
        let error = Command::parse_shell(r#"echo "hello"#).unwrap_err();
        assert_eq!(error.category(), "PARSE");
        assert!(error.to_string().contains("echo \"hello"));
    }

    #[test]
    fn test_parse_shell_blank_string() {
        let error = Command::parse_shell("   ").unwrap_err();
        assert_eq!(error.category(), "PARSE");
    }

    #[test]
    fn test_separator_is_stripped() {
        let with_separator = Command::from_args(&strings(&["--", "lazygit"])).unwrap();
        let without = Command::from_args(&strings(&["lazygit"])).unwrap();
        assert_eq!(with_separator, without);
    }

    #[test]
    fn test_only_one_separator_is_stripped() {
        let command = Command::from_args(&strings(&["--", "--", "x"])).unwrap();
        assert_eq!(command.argv(), &strings(&["--", "x"])[..]);

        // A separator later in the vector belongs to the command
        let command = Command::from_args(&strings(&["git", "--", "log"])).unwrap();
        assert_eq!(command.label(), "git -- log");
    }

    #[test]
    fn test_empty_commands_are_rejected() {
        assert!(Command::from_args(&[]).is_err());
        assert!(Command::from_args(&strings(&["--"])).is_err());
        assert!(Command::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_display_and_serde() {
        let command = Command::new(["vim", "-u", "NONE"]).unwrap();
        assert_eq!(command.to_string(), "vim -u NONE");

        let json = serde_json::to_string(&command).unwrap();
        assert_eq!(json, r#"["vim","-u","NONE"]"#);
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
        assert!(serde_json::from_str::<Command>("[]").is_err());
    }
}
