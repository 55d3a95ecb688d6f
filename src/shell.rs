//! Command shell
//!
//! Reads protocol lines, applies them to a [`Namespace`] and writes the
//! responses. Unknown commands and blank lines produce no output; a malformed
//! line for a known command is answered with `no`.

use crate::config::ShellConfig;
use crate::core::Namespace;
use crate::error::{ShellError, ShellResult};
use crate::protocol::{Command, Response};
use std::io::{BufRead, Write};
use tracing::{debug, info, trace, warn};

/// Why [`Shell::run`] stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// An `exit` command was read
    Exit,
    /// The input stream ended
    EndOfInput,
}

/// What to do with one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Reply(Response),
    Silent,
    Exit,
}

/// Namespace plus command loop
///
/// # Examples
///
/// ```
/// use slotfs::Shell;
///
/// let script = "create_dir /d\ncreate /d/f\nwrite /d/f \"hi there\"\nread /d/f\nexit\n";
/// let mut out = Vec::new();
/// Shell::new().run(script.as_bytes(), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "ok\nok\nok 8\ncontenuto hi there\n");
/// ```
pub struct Shell {
    namespace: Namespace,
    config: ShellConfig,
}

impl Shell {
    /// Shell over an empty namespace with default configuration
    pub fn new() -> Self {
        ShellBuilder::new().build()
    }

    pub fn builder() -> ShellBuilder {
        ShellBuilder::new()
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Apply one command; `None` for `exit`
    pub fn execute(&mut self, command: Command) -> Option<Response> {
        let keyword = command.keyword();
        let ns = &mut self.namespace;

        let result = match command {
            Command::Create(path) => ns.create_file(&path).map(|_| Response::Ok),
            Command::CreateDir(path) => ns.create_dir(&path).map(|_| Response::Ok),
            Command::Read(path) => ns.read(&path).map(|data| Response::Content(data.to_string())),
            Command::Write { path, data } => ns.write(&path, &data).map(Response::Written),
            Command::Delete(path) => ns.delete(&path).map(|()| Response::Ok),
            Command::DeleteRecursive(path) => ns.delete_recursive(&path).map(|()| Response::Ok),
            Command::Find(name) => ns.find(&name).map(Response::Found),
            Command::Exit => return None,
        };

        Some(result.unwrap_or_else(|err| {
            debug!(command = keyword, kind = err.kind(), "{}", err);
            Response::No
        }))
    }

    /// Parse and apply one input line
    pub fn handle_line(&mut self, line: &str) -> Step {
        match Command::parse(line) {
            Ok(Some(command)) => match self.execute(command) {
                Some(response) => Step::Reply(response),
                None => Step::Exit,
            },
            Ok(None) => {
                trace!("blank line");
                Step::Silent
            }
            Err(ShellError::UnknownCommand(keyword)) => {
                warn!("Ignoring unknown command {:?}", keyword);
                Step::Silent
            }
            Err(err) => {
                warn!("{}", err);
                Step::Reply(Response::No)
            }
        }
    }

    /// Run the command loop until `exit` or end of input
    ///
    /// Input bytes that are not valid UTF-8 are replaced, not rejected. Only
    /// I/O errors on the streams end the loop early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> ShellResult<Outcome> {
        info!("Shell started");
        let flush_each = self.config.shell.flush_each_response;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                output.flush()?;
                info!("End of input, shell stopped");
                return Ok(Outcome::EndOfInput);
            }

            let line = String::from_utf8_lossy(&buf);
            match self.handle_line(&line) {
                Step::Reply(response) => {
                    write!(output, "{}", response)?;
                    if flush_each {
                        output.flush()?;
                    }
                }
                Step::Silent => {}
                Step::Exit => {
                    output.flush()?;
                    info!("Exit requested, shell stopped");
                    return Ok(Outcome::Exit);
                }
            }
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Shell`]
///
/// # Examples
///
/// ```
/// use slotfs::{Namespace, ShellBuilder};
///
/// let mut ns = Namespace::new();
/// ns.create_dir("/seeded").unwrap();
///
/// let shell = ShellBuilder::new()
///     .namespace(ns)
///     .flush_each_response(false)
///     .build();
/// assert!(shell.namespace().find("seeded").is_ok());
/// ```
pub struct ShellBuilder {
    config: ShellConfig,
    namespace: Option<Namespace>,
}

impl ShellBuilder {
    pub fn new() -> Self {
        ShellBuilder {
            config: ShellConfig::default(),
            namespace: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ShellConfig) -> Self {
        self.config = config;
        self
    }

    pub fn flush_each_response(mut self, flush: bool) -> Self {
        self.config.shell.flush_each_response = flush;
        self
    }

    /// Start from an existing namespace instead of an empty one
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = Some(namespace);
        self
    }

    pub fn build(self) -> Shell {
        debug!(
            "Building shell (flush_each_response={})",
            self.config.shell.flush_each_response
        );
        Shell {
            namespace: self.namespace.unwrap_or_default(),
            config: self.config,
        }
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}
