//! Map keys.
//!
//! A level of a command map is keyed either by a command name or by the
//! distinguished default key, which holds the fallback action of that level.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

/// Owned key of a command map entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A command name.
    Name(String),
    /// The fallback slot.
    Default,
}

impl Key {
    /// Borrow this key.
    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Key::Name(name) => KeyRef::Name(name),
            Key::Default => KeyRef::Default,
        }
    }

    /// The command name, or `None` for the default key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Default => None,
        }
    }
}

// KeyRef must hash exactly like Key so it can be used as an indexmap probe.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_key_ref().fmt(f)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<Option<String>> for Key {
    fn from(name: Option<String>) -> Self {
        name.map_or(Key::Default, Key::Name)
    }
}

/// Borrowed key used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'k> {
    /// A command name or abbreviation of one.
    Name(&'k str),
    /// The fallback slot.
    Default,
}

impl KeyRef<'_> {
    /// Convert into an owned key.
    pub fn to_key(self) -> Key {
        match self {
            KeyRef::Name(name) => Key::Name(name.to_string()),
            KeyRef::Default => Key::Default,
        }
    }
}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            KeyRef::Name(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            KeyRef::Default => 1u8.hash(state),
        }
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        *self == key.as_key_ref()
    }
}

impl fmt::Display for KeyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRef::Name(name) => f.write_str(name),
            KeyRef::Default => f.write_str("<default>"),
        }
    }
}

impl<'k> From<&'k str> for KeyRef<'k> {
    fn from(name: &'k str) -> Self {
        KeyRef::Name(name)
    }
}

impl<'k> From<&'k String> for KeyRef<'k> {
    fn from(name: &'k String) -> Self {
        KeyRef::Name(name)
    }
}

impl<'k> From<&'k Key> for KeyRef<'k> {
    fn from(key: &'k Key) -> Self {
        key.as_key_ref()
    }
}

impl<'k> From<Option<&'k str>> for KeyRef<'k> {
    fn from(name: Option<&'k str>) -> Self {
        name.map_or(KeyRef::Default, KeyRef::Name)
    }
}
