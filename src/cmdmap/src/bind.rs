//! Deferred calls.
//!
//! A [`Bind`] pairs a borrowed handler with arguments supplied ahead of time.
//! Invoking it appends the remaining arguments at call time.

use std::fmt;

use crate::error::BoxError;
use crate::item::{Item, Table};

/// Outcome of a leaf action.
pub type ActionResult = std::result::Result<(), BoxError>;

/// Signature of every leaf action.
pub type Handler<'a> = dyn Fn(&[String]) -> ActionResult + Send + Sync + 'a;

/// A handler with some leading arguments already supplied.
///
/// The handler is borrowed; the map that stores a `Bind` never manages the
/// handler's lifetime. The arguments are owned.
#[derive(Clone)]
pub struct Bind<'a> {
    handler: &'a Handler<'a>,
    args: Vec<String>,
}

impl<'a> Bind<'a> {
    /// Create a deferred call with no pre-bound arguments.
    pub fn new(handler: &'a Handler<'a>) -> Self {
        Self {
            handler,
            args: Vec::new(),
        }
    }

    /// Create a deferred call with pre-bound arguments.
    pub fn with_args<I, S>(handler: &'a Handler<'a>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            handler,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The pre-bound arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Append more pre-bound arguments, returning the extended call.
    pub fn bind_more<I, S>(mut self, more: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(more.into_iter().map(Into::into));
        self
    }

    /// Call the handler with the pre-bound arguments followed by `extra`.
    pub fn invoke<S: AsRef<str>>(&self, extra: &[S]) -> ActionResult {
        let mut args = Vec::with_capacity(self.args.len() + extra.len());
        args.extend(self.args.iter().cloned());
        args.extend(extra.iter().map(|s| s.as_ref().to_string()));
        (self.handler)(&args)
    }
}

impl fmt::Debug for Bind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bind").field("args", &self.args).finish_non_exhaustive()
    }
}

impl fmt::Display for Bind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bind(")?;
        for arg in &self.args {
            write!(f, "{arg}, ")?;
        }
        f.write_str("...)")
    }
}

/// Bind one handler to many argument rows.
///
/// The first element of each row becomes the key; the whole row, key
/// included, is bound to `handler`. Empty rows are skipped. The result feeds
/// straight into [`CommandMap::update`](crate::CommandMap::update).
pub fn bindmap<'a, R, S>(handler: &'a Handler<'a>, rows: R) -> Table<'a>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: Into<String>,
{
    rows.into_iter()
        .filter_map(|row| {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            let key = row.first()?.clone();
            Some((Item::Text(key), Item::Action(Bind::with_args(handler, row))))
        })
        .collect()
}
