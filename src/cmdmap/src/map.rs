//! The command map and its prefix-tolerant lookup and dispatch.

use indexmap::IndexMap;
use indexmap::map::Entry as SlotEntry;

use crate::bind::Bind;
use crate::error::{CommandMapError, Result};
use crate::key::{Key, KeyRef};

/// Value stored under a key.
#[derive(Debug, Clone)]
pub enum Entry<'a> {
    /// A nested level reached by resolving one token.
    Subcommand(CommandMap<'a>),
    /// A leaf action.
    Action(Bind<'a>),
    /// Reserved but not implemented yet.
    Unset,
}

impl<'a> Entry<'a> {
    /// Name of this variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Subcommand(_) => "subcommand",
            Entry::Action(_) => "action",
            Entry::Unset => "unset",
        }
    }

    /// The nested map, if this is a subcommand.
    pub fn as_subcommand(&self) -> Option<&CommandMap<'a>> {
        match self {
            Entry::Subcommand(sub) => Some(sub),
            Entry::Action(_) | Entry::Unset => None,
        }
    }

    /// The deferred call, if this is an action.
    pub fn as_action(&self) -> Option<&Bind<'a>> {
        match self {
            Entry::Action(bind) => Some(bind),
            Entry::Subcommand(_) | Entry::Unset => None,
        }
    }

    /// Check if this entry is an unset placeholder.
    pub fn is_unset(&self) -> bool {
        matches!(self, Entry::Unset)
    }
}

/// Hierarchical command dispatcher with abbreviation-tolerant keys.
///
/// Each level maps command names (and at most one default key) to an
/// [`Entry`]. A probe string resolves to a stored name only when exactly one
/// name at that level starts with it.
#[derive(Debug, Clone, Default)]
pub struct CommandMap<'a> {
    pub(crate) entries: IndexMap<Key, Entry<'a>>,
}

impl<'a> CommandMap<'a> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of entries at this level, default key included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this level has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries of this level in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Entry<'a>)> {
        self.entries.iter()
    }

    /// Iterate over the command names of this level.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().filter_map(Key::as_name)
    }

    /// Resolve a probe to the only command name that starts with it.
    ///
    /// Returns `None` when no name, or more than one, starts with `probe`.
    pub fn resolve_key(&self, probe: &str) -> Option<&str> {
        let mut matches = self.names().filter(|name| name.starts_with(probe));
        match (matches.next(), matches.next()) {
            (Some(name), None) => Some(name),
            _ => None,
        }
    }

    /// All command names that start with `prefix`, in insertion order.
    pub fn candidates(&self, prefix: &str) -> Vec<&str> {
        self.names().filter(|name| name.starts_with(prefix)).collect()
    }

    /// Check if a probe resolves. The default key is matched exactly.
    pub fn contains<'k>(&self, key: impl Into<KeyRef<'k>>) -> bool {
        match key.into() {
            KeyRef::Name(probe) => self.resolve_key(probe).is_some(),
            KeyRef::Default => self.entries.contains_key(&KeyRef::Default),
        }
    }

    /// Look up an entry by probe, falling back to the literal key.
    ///
    /// A missing entry reads as `None`.
    pub fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&Entry<'a>> {
        let key = key.into();
        self.entries.get(&self.lookup_key(key))
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> Option<&mut Entry<'a>> {
        let key = self.lookup_key(key.into()).to_key();
        self.entries.get_mut(&key)
    }

    /// Remove an entry by probe, falling back to the literal key.
    pub fn delete<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> Result<Entry<'a>> {
        let probe = key.into();
        let key = self.lookup_key(probe).to_key();
        self.entries
            .shift_remove(&key)
            .ok_or_else(|| CommandMapError::KeyNotFound {
                key: probe.to_string(),
            })
    }

    /// Store an entry at an exact key, replacing any previous value.
    ///
    /// Unlike [`extend`](Self::extend), no prefix resolution takes place.
    pub fn insert(&mut self, key: impl Into<Key>, entry: Entry<'a>) -> Option<Entry<'a>> {
        self.entries.insert(key.into(), entry)
    }

    /// Store an entry at an exact key only if the key is absent.
    ///
    /// Returns `false` and leaves the map untouched when the key exists.
    pub fn insert_new(&mut self, key: impl Into<Key>, entry: Entry<'a>) -> bool {
        match self.entries.entry(key.into()) {
            SlotEntry::Occupied(_) => false,
            SlotEntry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }

    /// Dispatch a token sequence.
    ///
    /// Returns `Ok(true)` when a leaf action ran and `Ok(false)` when nothing
    /// matched and this level has no default. A default subcommand is
    /// dispatched with the original tokens. Reaching an unset command is an
    /// error.
    pub fn call<S: AsRef<str>>(&self, tokens: &[S]) -> Result<bool> {
        if let Some((first, rest)) = tokens.split_first() {
            let first = first.as_ref();
            if !first.is_empty()
                && let Some(name) = self.resolve_key(first)
            {
                tracing::trace!(token = first, key = name, "resolved token");
                match self.entries.get(&KeyRef::Name(name)) {
                    Some(Entry::Subcommand(sub)) => return sub.call(rest),
                    Some(Entry::Action(bind)) => {
                        bind.invoke(rest).map_err(CommandMapError::Action)?;
                        return Ok(true);
                    }
                    Some(Entry::Unset) => {
                        return Err(CommandMapError::NotImplemented {
                            key: name.to_string(),
                        });
                    }
                    None => {}
                }
            }
        }

        match self.entries.get(&KeyRef::Default) {
            Some(Entry::Action(bind)) => {
                tracing::trace!("falling back to default action");
                bind.invoke(tokens).map_err(CommandMapError::Action)?;
                Ok(true)
            }
            Some(Entry::Subcommand(sub)) => {
                tracing::trace!("falling back to default subcommand");
                sub.call(tokens)
            }
            Some(Entry::Unset) | None => Ok(false),
        }
    }

    /// Every path that ends in an action or an unset placeholder.
    ///
    /// Default-key steps appear as [`Key::Default`].
    pub fn paths(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_paths(&mut prefix, &mut out);
        out
    }

    fn collect_paths(&self, prefix: &mut Vec<Key>, out: &mut Vec<Vec<Key>>) {
        for (key, entry) in &self.entries {
            prefix.push(key.clone());
            match entry {
                Entry::Subcommand(sub) => sub.collect_paths(prefix, out),
                Entry::Action(_) | Entry::Unset => out.push(prefix.clone()),
            }
            prefix.pop();
        }
    }

    /// The stored key a probe refers to: its unique resolution, else the
    /// probe itself.
    pub(crate) fn lookup_key<'k>(&'k self, key: KeyRef<'k>) -> KeyRef<'k> {
        match key {
            KeyRef::Name(probe) => KeyRef::Name(self.resolve_key(probe).unwrap_or(probe)),
            KeyRef::Default => KeyRef::Default,
        }
    }
}

impl<'m, 'a> IntoIterator for &'m CommandMap<'a> {
    type Item = (&'m Key, &'m Entry<'a>);
    type IntoIter = indexmap::map::Iter<'m, Key, Entry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
