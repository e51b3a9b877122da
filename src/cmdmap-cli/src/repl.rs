//! Reading command lines and dispatching them.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use cmdmap::{CommandMap, CommandMapError};
use cmdmap_utils_string::tokens;

use crate::output::Printer;

/// Line reader with a loopback queue.
///
/// Lines pushed with [`push`](Self::push) are returned before anything is
/// read from the underlying reader.
pub struct LineSource<R> {
    queued: VecDeque<String>,
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            queued: VecDeque::new(),
            reader,
        }
    }

    /// Queue text; each of its lines is returned separately.
    pub fn push(&mut self, text: &str) {
        self.queued.extend(text.lines().map(str::to_string));
    }

    /// Next line without its terminator, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.queued.pop_front() {
            return Ok(Some(line));
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// What happened to one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An action ran.
    Ran,
    /// Nothing matched.
    NoMatch,
    /// The command is reserved but not implemented.
    NotImplemented(String),
    /// The action ran and returned an error.
    Failed(String),
}

impl Outcome {
    /// Numeric status: 0 ran, 1 no match, 2 not implemented, 3 action failed.
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Ran => 0,
            Outcome::NoMatch => 1,
            Outcome::NotImplemented(_) => 2,
            Outcome::Failed(_) => 3,
        }
    }

    /// Process exit code for one-shot mode.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Dispatch tokens and report misses and action failures through `printer`.
pub fn execute<S: AsRef<str>>(
    map: &CommandMap<'_>,
    printer: &Printer,
    tokens: &[S],
) -> anyhow::Result<Outcome> {
    match map.call(tokens) {
        Ok(true) => Ok(Outcome::Ran),
        Ok(false) => {
            printer.line(&miss_message(map, tokens))?;
            Ok(Outcome::NoMatch)
        }
        Err(CommandMapError::NotImplemented { key }) => {
            printer.line(&format!("not implemented: {key}"))?;
            Ok(Outcome::NotImplemented(key))
        }
        Err(err @ CommandMapError::Action(_)) => {
            tracing::warn!(error = %err, "command failed");
            printer.line(&format!("error: {err}"))?;
            Ok(Outcome::Failed(err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

fn miss_message<S: AsRef<str>>(map: &CommandMap<'_>, tokens: &[S]) -> String {
    let line = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = tokens.first() {
        let candidates = map.candidates(first.as_ref());
        if candidates.len() > 1 {
            return format!(
                "ambiguous command '{}': {}",
                first.as_ref(),
                candidates.join(", ")
            );
        }
    }
    format!("unknown command: {line}")
}

/// Read-dispatch loop.
pub struct Repl<'r, 'a> {
    map: &'r CommandMap<'a>,
    printer: &'r Printer,
    stop: &'r AtomicBool,
    prompt: String,
}

impl<'r, 'a> Repl<'r, 'a> {
    /// Create a loop that ends at end of input or once `stop` is raised.
    pub fn new(
        map: &'r CommandMap<'a>,
        printer: &'r Printer,
        stop: &'r AtomicBool,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            map,
            printer,
            stop,
            prompt: prompt.into(),
        }
    }

    /// Run until end of input or until stopped.
    ///
    /// A failing action is reported and the loop continues. Output errors
    /// end the loop.
    pub fn run<R: BufRead>(&self, lines: &mut LineSource<R>) -> anyhow::Result<()> {
        while !self.stop.load(Ordering::SeqCst) {
            if !self.prompt.is_empty() {
                self.printer.prompt(&self.prompt)?;
            }
            let Some(line) = lines.next_line()? else {
                break;
            };
            let words = tokens(&line);
            if words.is_empty() {
                continue;
            }
            tracing::debug!(line = %line, "dispatching");
            execute(self.map, self.printer, &words)?;
        }
        Ok(())
    }
}
