//! Built-in actions available to command tables.

use std::sync::atomic::{AtomicBool, Ordering};

use cmdmap::{ActionResult, CommandMap, Key};
use parking_lot::Mutex;

use crate::output::Printer;

/// Names a command table may use in `action = "..."`.
pub const BUILTIN_NAMES: &[&str] = &["echo", "paths", "quit"];

/// State shared by the built-in actions.
#[derive(Debug)]
pub struct Builtins<'p> {
    printer: &'p Printer,
    quit: AtomicBool,
    paths: Mutex<Vec<String>>,
}

impl<'p> Builtins<'p> {
    /// Create the builtins writing through `printer`.
    pub fn new(printer: &'p Printer) -> Self {
        Self {
            printer,
            quit: AtomicBool::new(false),
            paths: Mutex::new(Vec::new()),
        }
    }

    /// Print the arguments separated by single spaces.
    pub fn echo(&self, args: &[String]) -> ActionResult {
        self.printer.line(&args.join(" "))?;
        Ok(())
    }

    /// Print every registered command path.
    pub fn paths(&self, _args: &[String]) -> ActionResult {
        for path in self.paths.lock().iter() {
            self.printer.line(path)?;
        }
        Ok(())
    }

    /// Ask the read loop to stop after the current line.
    pub fn quit(&self, _args: &[String]) -> ActionResult {
        self.quit.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Flag raised by [`quit`](Self::quit).
    pub fn quit_flag(&self) -> &AtomicBool {
        &self.quit
    }

    /// Record the paths of `map` for the `paths` action.
    pub fn set_paths(&self, map: &CommandMap<'_>) {
        *self.paths.lock() = map.paths().iter().map(|path| render_path(path)).collect();
    }
}

/// Render a key path as space-separated words.
pub fn render_path(path: &[Key]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
