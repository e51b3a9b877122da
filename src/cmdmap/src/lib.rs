//! Abbreviation-tolerant hierarchical command dispatch.
//!
//! A [`CommandMap`] is a tree of command names. Leaves are [`Bind`]s
//! (handlers with pre-bound arguments) or explicit [`Entry::Unset`]
//! placeholders. Each dispatched token may be any prefix of the real name at
//! its level, as long as exactly one name at that level starts with it.
//!
//! # Building
//!
//! Paths are registered as flat [`Item`] sequences:
//!
//! ```
//! use cmdmap::{items, ActionResult, Bind, CommandMap};
//!
//! fn deploy(args: &[String]) -> ActionResult {
//!     println!("deploy {args:?}");
//!     Ok(())
//! }
//!
//! let mut map = CommandMap::new();
//! map.extend(items!["deploy", "canary", Bind::new(&deploy), "eu"])?;
//! map.extend(items!["status"])?; // reserved, not implemented yet
//!
//! assert!(map.call(&["dep", "can", "--force"])?); // deploy(["eu", "--force"])
//! assert!(map.call(&["sta"]).is_err());
//! assert!(!map.call(&["unknown"])?);
//! # Ok::<(), cmdmap::CommandMapError>(())
//! ```
//!
//! # Merge rules
//!
//! A key "already exists" when it abbreviates exactly one stored name, or
//! matches a stored key literally, the same way [`CommandMap::get`] finds
//! it. The sequence then applies to that stored entry. When a sequence
//! targets a key that already exists:
//!
//! - a bare key or [`Item::Nil`] never overwrites anything;
//! - a mapping merged into a subcommand is merged entry by entry;
//! - an action given to a subcommand becomes its default action;
//! - a mapping given to an action promotes the slot to a subcommand and
//!   moves the old action to the new default key, unless the mapping itself
//!   defines the same key, in which case the old action is dropped;
//! - an action given to an action replaces it.
//!
//! Two rules go beyond plain mapping merges, so that several flat paths can
//! share a prefix:
//!
//! - a deeper path given to a subcommand is applied inside it;
//! - a deeper path given to an action promotes the slot as a mapping would.
//!
//! # Dispatch
//!
//! [`CommandMap::call`] walks the tree from the root. It returns `Ok(true)`
//! once an action runs, `Ok(false)` when nothing matched and no default
//! exists, and [`CommandMapError::NotImplemented`] for unset commands. When
//! a token does not resolve, the default key takes the original tokens: a
//! default action runs with them, and a default subcommand dispatches them.
//! There is no backtracking to sibling keys.
//!
//! A built map is `Send + Sync`; dispatch only needs `&self`.

mod bind;
mod error;
mod extend;
mod item;
mod key;
mod map;

pub use bind::{ActionResult, Bind, Handler, bindmap};
pub use error::{BoxError, CommandMapError, Result};
pub use item::{Item, Table};
pub use key::{Key, KeyRef};
pub use map::{CommandMap, Entry};

#[cfg(test)]
mod tests;
