//! Building and merging command maps from flat sequences.
//!
//! Every sequence is first parsed into an [`Insertion`] plan. Parsing is the
//! only fallible step, so a rejected sequence never leaves a level half
//! promoted.

use crate::bind::Bind;
use crate::error::{CommandMapError, Result};
use crate::item::{Item, Table};
use crate::key::Key;
use crate::map::{CommandMap, Entry};

/// A validated insertion: a key and what to do with it.
#[derive(Debug)]
struct Insertion<'a> {
    key: Key,
    payload: Payload<'a>,
}

#[derive(Debug)]
enum Payload<'a> {
    /// Bare key: reserve it.
    Bare,
    /// Nested mapping.
    Table(Vec<Insertion<'a>>),
    /// Leaf action, extra items already bound.
    Action(Bind<'a>),
    /// Explicit unset marker.
    Unset,
    /// Deeper path continuing with another key.
    Path(Box<Insertion<'a>>),
    /// A lone scalar with nothing after it. Stores nothing.
    Scalar,
}

impl Insertion<'_> {
    fn is_unset(&self) -> bool {
        matches!(self.payload, Payload::Unset)
    }
}

fn parse_key(item: Item<'_>) -> Result<Key> {
    match item {
        Item::Text(name) => Ok(Key::Name(name)),
        Item::Nil => Ok(Key::Default),
        other @ (Item::Int(_) | Item::Table(_) | Item::Action(_)) => {
            Err(CommandMapError::InvalidKeyType {
                found: other.kind(),
            })
        }
    }
}

fn parse_arg(item: Item<'_>) -> Result<String> {
    match item {
        Item::Text(text) => Ok(text),
        Item::Int(value) => Ok(value.to_string()),
        other @ (Item::Nil | Item::Table(_) | Item::Action(_)) => {
            Err(CommandMapError::InvalidArgument {
                found: other.kind(),
            })
        }
    }
}

fn parse_sequence<'a>(seq: Vec<Item<'a>>) -> Result<Option<Insertion<'a>>> {
    let mut items = seq.into_iter();
    let Some(first) = items.next() else {
        return Ok(None);
    };
    let key = parse_key(first)?;
    let payload = parse_payload(items.collect())?;
    Ok(Some(Insertion { key, payload }))
}

fn parse_payload(rest: Vec<Item<'_>>) -> Result<Payload<'_>> {
    let len = rest.len();
    let mut items = rest.into_iter();
    let Some(head) = items.next() else {
        return Ok(Payload::Bare);
    };

    match head {
        // Anything after a mapping is ignored.
        Item::Table(table) => Ok(Payload::Table(parse_table(table)?)),
        Item::Action(bind) => {
            let extra = items.map(parse_arg).collect::<Result<Vec<_>>>()?;
            Ok(Payload::Action(bind.bind_more(extra)))
        }
        Item::Nil => Ok(Payload::Unset),
        head @ (Item::Text(_) | Item::Int(_)) => {
            if len == 1 {
                return Ok(Payload::Scalar);
            }
            let key = parse_key(head)?;
            let payload = parse_payload(items.collect())?;
            Ok(Payload::Path(Box::new(Insertion { key, payload })))
        }
    }
}

fn parse_table(table: Table<'_>) -> Result<Vec<Insertion<'_>>> {
    table
        .into_iter()
        .map(|(key, value)| {
            Ok(Insertion {
                key: parse_key(key)?,
                payload: parse_payload(vec![value])?,
            })
        })
        .collect()
}

impl<'a> CommandMap<'a> {
    /// Build a map from a mapping.
    pub fn from_table(table: Table<'a>) -> Result<Self> {
        let mut map = Self::new();
        map.update(table)?;
        Ok(map)
    }

    /// Build a map from a single flat sequence.
    pub fn from_path(seq: Vec<Item<'a>>) -> Result<Self> {
        let mut map = Self::new();
        map.extend(seq)?;
        Ok(map)
    }

    /// Incorporate one flat sequence `[key, ...payload]`.
    ///
    /// The payload is empty (reserve the key), a [`Item::Table`] (merge a
    /// nested mapping), an [`Item::Action`] followed by pre-bound arguments,
    /// [`Item::Nil`] (explicitly unset), or another key continuing the path.
    /// When the slot is already taken, actions are promoted to subcommands
    /// instead of being lost; see the crate docs for the full rules.
    ///
    /// On error nothing is modified.
    pub fn extend(&mut self, seq: Vec<Item<'a>>) -> Result<&mut Self> {
        if let Some(insertion) = parse_sequence(seq)? {
            self.apply(insertion);
        }
        Ok(self)
    }

    /// Apply each pair of a mapping as `[key, value]`, in order.
    ///
    /// Stops at the first invalid pair; pairs before it stay applied.
    pub fn update(&mut self, table: Table<'a>) -> Result<()> {
        for (key, value) in table {
            self.extend(vec![key, value])?;
        }
        Ok(())
    }

    /// Apply several flat sequences, in order. Empty sequences are skipped.
    ///
    /// Stops at the first invalid sequence; sequences before it stay applied.
    pub fn update_paths<I>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<Item<'a>>>,
    {
        for seq in paths {
            self.extend(seq)?;
        }
        Ok(())
    }

    fn apply(&mut self, insertion: Insertion<'a>) {
        let Insertion { key: given, payload } = insertion;
        let key = self.lookup_key(given.as_key_ref()).to_key();
        if key != given {
            tracing::debug!(%given, %key, "insertion key resolved to existing command");
        }

        if let Payload::Bare = payload {
            self.insert_new(key, Entry::Unset);
            return;
        }

        match self.entries.get(&key) {
            None | Some(Entry::Unset) => return self.apply_fresh(key, payload),
            Some(Entry::Subcommand(_) | Entry::Action(_)) => {}
        }
        let Some(slot) = self.entries.get_mut(&key) else {
            return;
        };

        match slot {
            Entry::Subcommand(sub) => match payload {
                Payload::Table(entries) => {
                    tracing::debug!(%key, "merging mapping into subcommand");
                    sub.apply_all(entries);
                }
                Payload::Action(bind) => {
                    tracing::debug!(%key, "setting default action of subcommand");
                    sub.insert(Key::Default, Entry::Action(bind));
                }
                Payload::Path(inner) => sub.apply(*inner),
                Payload::Unset | Payload::Scalar | Payload::Bare => {}
            },
            Entry::Action(_) => match payload {
                Payload::Table(entries) => {
                    let redefined = entries
                        .iter()
                        .rev()
                        .find(|entry| entry.key == given)
                        .is_some_and(|entry| !entry.is_unset());
                    let mut sub = CommandMap::new();
                    sub.apply_all(entries);
                    let previous = std::mem::replace(slot, Entry::Unset);
                    if redefined {
                        tracing::debug!(%key, "mapping redefines key, dropping previous action");
                    } else {
                        tracing::debug!(%key, "promoting action to subcommand");
                        sub.insert(Key::Default, previous);
                    }
                    *slot = Entry::Subcommand(sub);
                }
                Payload::Action(bind) => *slot = Entry::Action(bind),
                Payload::Path(inner) => {
                    tracing::debug!(%key, "promoting action to subcommand for nested path");
                    let previous = std::mem::replace(slot, Entry::Unset);
                    let mut sub = CommandMap::new();
                    sub.insert(Key::Default, previous);
                    sub.apply(*inner);
                    *slot = Entry::Subcommand(sub);
                }
                Payload::Unset | Payload::Scalar | Payload::Bare => {}
            },
            Entry::Unset => {}
        }
    }

    fn apply_fresh(&mut self, key: Key, payload: Payload<'a>) {
        let entry = match payload {
            Payload::Table(entries) => {
                let mut sub = CommandMap::new();
                sub.apply_all(entries);
                Entry::Subcommand(sub)
            }
            Payload::Action(bind) => Entry::Action(bind),
            Payload::Unset | Payload::Bare => Entry::Unset,
            Payload::Path(inner) => {
                let mut sub = CommandMap::new();
                sub.apply(*inner);
                Entry::Subcommand(sub)
            }
            Payload::Scalar => {
                tracing::debug!(%key, "ignoring lone scalar payload");
                return;
            }
        };
        self.insert(key, entry);
    }

    fn apply_all(&mut self, entries: Vec<Insertion<'a>>) {
        for entry in entries {
            self.apply(entry);
        }
    }
}
