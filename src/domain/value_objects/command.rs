//! Structured shell commands
//!
//! Commands stay argv lists until they have to cross an ssh connection,
//! where they are rendered into a single quoted script. Values from the
//! configuration (paths, repository URLs) are never spliced into a shell
//! string unquoted.

use std::fmt;

/// A single program invocation: program name plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Build a command from an argv list (`["rake", "db:migrate"]`).
    ///
    /// Returns `None` for an empty list or an empty program name.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self::new(program.clone()).args(args.iter().cloned()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// One pipeline step: commands chained with `&&`, optionally run inside a
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    commands: Vec<Command>,
    cwd: Option<String>,
}

impl Step {
    pub fn single(command: Command) -> Self {
        Self {
            commands: vec![command],
            cwd: None,
        }
    }

    /// Chain commands; each runs only if the previous one succeeded
    pub fn chain(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            cwd: None,
        }
    }

    /// Run the step inside `dir`
    pub fn in_dir(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    /// Render as a single shell script for `ssh host <script>`.
    ///
    /// The working directory becomes a leading `cd`, so a failed `cd`
    /// prevents every command of the step from running.
    pub fn script(&self) -> String {
        match &self.cwd {
            Some(dir) => format!("cd {} && {}", shell_quote(dir), self),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

/// Where a step runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// On this machine, in the local working copy
    Local,
    /// On `host` over ssh (`user@host` or an ssh config alias)
    Remote { host: String },
}

impl ExecutionMode {
    pub fn remote(host: impl Into<String>) -> Self {
        ExecutionMode::Remote { host: host.into() }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Local => f.write_str("local"),
            ExecutionMode::Remote { host } => f.write_str(host),
        }
    }
}

/// Quote a word for POSIX sh.
///
/// Words made only of safe characters are left bare so rendered commands
/// stay readable (`sv d /svc/app`); everything else is single-quoted.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}
