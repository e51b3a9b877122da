//! Construction input.
//!
//! Command paths are described as flat sequences of [`Item`]s: a key,
//! optionally followed by more keys, and finally a payload. For example
//! `["deploy", "canary", Action(f), "eu"]` registers `deploy canary` as `f`
//! with `"eu"` pre-bound.

use crate::bind::{Bind, Handler};
use crate::key::Key;

/// A nested mapping. Each pair is applied like the sequence `[key, value]`;
/// later pairs win when keys repeat.
pub type Table<'a> = Vec<(Item<'a>, Item<'a>)>;

/// One element of a construction sequence.
#[derive(Debug, Clone)]
pub enum Item<'a> {
    /// A command name.
    Text(String),
    /// A non-string scalar. Never a valid key; bound as its decimal text.
    Int(i64),
    /// The default key in key position, the unset marker in payload position.
    Nil,
    /// A nested mapping.
    Table(Table<'a>),
    /// A leaf action. Items following it are bound as extra arguments.
    Action(Bind<'a>),
}

impl<'a> Item<'a> {
    /// Wrap a handler with no pre-bound arguments.
    pub fn action(handler: &'a Handler<'a>) -> Self {
        Item::Action(Bind::new(handler))
    }

    /// Name of this variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Text(_) => "string",
            Item::Int(_) => "integer",
            Item::Nil => "nil",
            Item::Table(_) => "table",
            Item::Action(_) => "action",
        }
    }
}

impl From<&str> for Item<'_> {
    fn from(text: &str) -> Self {
        Item::Text(text.to_string())
    }
}

impl From<String> for Item<'_> {
    fn from(text: String) -> Self {
        Item::Text(text)
    }
}

impl From<i64> for Item<'_> {
    fn from(value: i64) -> Self {
        Item::Int(value)
    }
}

impl From<Key> for Item<'_> {
    fn from(key: Key) -> Self {
        match key {
            Key::Name(name) => Item::Text(name),
            Key::Default => Item::Nil,
        }
    }
}

impl<'a> From<Bind<'a>> for Item<'a> {
    fn from(bind: Bind<'a>) -> Self {
        Item::Action(bind)
    }
}

impl<'a> From<Table<'a>> for Item<'a> {
    fn from(table: Table<'a>) -> Self {
        Item::Table(table)
    }
}

/// Build a `Vec<Item>` from anything convertible into [`Item`].
///
/// ```
/// use cmdmap::{items, ActionResult, Bind, Item};
///
/// fn show(_: &[String]) -> ActionResult { Ok(()) }
///
/// let seq = items!["show", "cpu", Bind::new(&show), Item::Nil];
/// assert_eq!(seq.len(), 4);
/// ```
#[macro_export]
macro_rules! items {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::Item::from($item)),*]
    };
}
