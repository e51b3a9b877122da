//! Output sinks.
//!
//! Actions never print to a global stream. They write through a [`Printer`]
//! handed to them, which can carry a stack of line prefixes. Prefixes are
//! pushed with [`Printer::scoped_prefix`] and popped when the guard drops.

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;

/// Line-oriented, thread-safe output sink.
pub struct Printer {
    sink: Mutex<Box<dyn Write + Send>>,
    prefixes: Mutex<Vec<String>>,
}

impl Printer {
    /// Create a printer over any writer.
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
            prefixes: Mutex::new(Vec::new()),
        }
    }

    /// Write one line, preceded by the active prefixes.
    pub fn line(&self, text: &str) -> io::Result<()> {
        let prefix = self.prefixes.lock().concat();
        let mut sink = self.sink.lock();
        writeln!(sink, "{prefix}{text}")?;
        sink.flush()
    }

    /// Write a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) -> io::Result<()> {
        let mut sink = self.sink.lock();
        sink.write_all(text.as_bytes())?;
        sink.flush()
    }

    /// Push a prefix for every line written until the guard is dropped.
    pub fn scoped_prefix(&self, prefix: impl Into<String>) -> PrefixGuard<'_> {
        self.prefixes.lock().push(prefix.into());
        PrefixGuard { printer: self }
    }
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer")
            .field("prefixes", &*self.prefixes.lock())
            .finish_non_exhaustive()
    }
}

/// Pops its prefix from the printer when dropped.
#[must_use = "the prefix is removed as soon as the guard is dropped"]
pub struct PrefixGuard<'p> {
    printer: &'p Printer,
}

impl Drop for PrefixGuard<'_> {
    fn drop(&mut self) {
        self.printer.prefixes.lock().pop();
    }
}

/// Writer that duplicates everything into several sinks.
///
/// Each sink receives the whole buffer, so the reported count is always the
/// full buffer length. With no sinks, nothing is written and 0 is reported.
pub struct Tee {
    sinks: Vec<Box<dyn Write + Send>>,
}

impl Tee {
    /// Create a tee over the given sinks.
    pub fn new(sinks: Vec<Box<dyn Write + Send>>) -> Self {
        Self { sinks }
    }
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.sinks.is_empty() {
            return Ok(0);
        }
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
