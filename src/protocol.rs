//! Line-oriented command protocol
//!
//! One command per line. The keyword and its path argument are separated by
//! spaces, tabs or carriage returns; `write` additionally takes a quoted
//! payload that may contain spaces:
//!
//! ```text
//! create_dir /docs
//! create /docs/todo
//! write /docs/todo "buy milk"
//! read /docs/todo
//! find todo
//! exit
//! ```

use crate::error::{ShellError, ShellResult};
use std::fmt;

const SEPARATORS: &[char] = &[' ', '\t', '\r'];

/// A parsed protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    CreateDir(String),
    Read(String),
    Write { path: String, data: String },
    Delete(String),
    DeleteRecursive(String),
    Find(String),
    Exit,
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotfs::protocol::Command;
    ///
    /// let cmd = Command::parse("write /a \"hello world\"").unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Write { path: "/a".into(), data: "hello world".into() })
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// ```
    pub fn parse(line: &str) -> ShellResult<Option<Command>> {
        let line = line.trim_end_matches(['\n', '\r']);

        let (keyword, rest) = match next_token(line) {
            Some(token) => token,
            None => return Ok(None),
        };

        if keyword == "exit" {
            return Ok(Some(Command::Exit));
        }

        if !matches!(
            keyword,
            "create" | "create_dir" | "read" | "write" | "delete" | "delete_r" | "find"
        ) {
            return Err(ShellError::UnknownCommand(keyword.to_string()));
        }

        let (param, rest) = next_token(rest)
            .ok_or_else(|| ShellError::Malformed(format!("{} requires an argument", keyword)))?;
        let param = param.to_string();

        let command = match keyword {
            "create" => Command::Create(param),
            "create_dir" => Command::CreateDir(param),
            "read" => Command::Read(param),
            "write" => Command::Write {
                path: param,
                data: quoted_payload(rest)?.to_string(),
            },
            "delete" => Command::Delete(param),
            "delete_r" => Command::DeleteRecursive(param),
            _ => Command::Find(param),
        };

        Ok(Some(command))
    }

    /// Protocol keyword for this command
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Create(_) => "create",
            Command::CreateDir(_) => "create_dir",
            Command::Read(_) => "read",
            Command::Write { .. } => "write",
            Command::Delete(_) => "delete",
            Command::DeleteRecursive(_) => "delete_r",
            Command::Find(_) => "find",
            Command::Exit => "exit",
        }
    }
}

/// First separator-delimited token of `s` and the remainder after it
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start_matches(SEPARATORS);
    if s.is_empty() {
        return None;
    }
    let end = s.find(SEPARATORS).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Text between the first pair of double quotes in `rest`
fn quoted_payload(rest: &str) -> ShellResult<&str> {
    let inner = rest
        .trim_start_matches(SEPARATORS)
        .strip_prefix('"')
        .ok_or_else(|| ShellError::Malformed("write payload must be quoted".to_string()))?;

    let end = inner
        .find('"')
        .ok_or_else(|| ShellError::Malformed("unterminated write payload".to_string()))?;

    Ok(&inner[..end])
}

/// Result of one command, rendered as protocol text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `ok`
    Ok,
    /// `ok <byte-length>`
    Written(usize),
    /// `contenuto <data>`
    Content(String),
    /// One `ok <path>` line per match
    Found(Vec<String>),
    /// `no`
    No,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => writeln!(f, "ok"),
            Response::Written(len) => writeln!(f, "ok {}", len),
            Response::Content(data) => writeln!(f, "contenuto {}", data),
            Response::Found(paths) => {
                for path in paths {
                    writeln!(f, "ok {}", path)?;
                }
                Ok(())
            }
            Response::No => writeln!(f, "no"),
        }
    }
}
