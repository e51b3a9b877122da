//! Test suites for the command map.

mod dispatch_tests;

use std::sync::Mutex;

use crate::bind::ActionResult;

/// Records every call made through it, tagged by handler.
#[derive(Default)]
pub(crate) struct Calls(Mutex<Vec<(String, Vec<String>)>>);

impl Calls {
    pub(crate) fn record(&self, tag: &str, args: &[String]) -> ActionResult {
        self.0
            .lock()
            .map_err(|e| e.to_string())?
            .push((tag.to_string(), args.to_vec()));
        Ok(())
    }

    pub(crate) fn take(&self) -> Vec<(String, Vec<String>)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Shorthand for an expected call record.
pub(crate) fn call(tag: &str, args: &[&str]) -> (String, Vec<String>) {
    (
        tag.to_string(),
        args.iter().map(|s| s.to_string()).collect(),
    )
}
