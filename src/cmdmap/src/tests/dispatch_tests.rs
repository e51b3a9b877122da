//! Tests for recursive dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::{Calls, call};
use crate::*;

#[test]
fn test_default_action_catches_everything() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);

    let map = CommandMap::from_path(items![Item::Nil, Bind::new(&h)]).unwrap();

    assert!(map.call(&["anything"]).unwrap());
    assert!(map.call::<&str>(&[]).unwrap());
    assert_eq!(calls.take(), vec![call("h", &["anything"]), call("h", &[])]);
}

#[test]
fn test_default_receives_original_tokens() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);
    let run = |args: &[String]| calls.record("run", args);

    let mut map = CommandMap::new();
    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();
    map.extend(items!["run", Bind::new(&run)]).unwrap();

    assert!(map.call(&["walk", "fast"]).unwrap());
    assert!(map.call(&["r", "fast"]).unwrap());
    assert_eq!(
        calls.take(),
        vec![call("h", &["walk", "fast"]), call("run", &["fast"])]
    );
}

#[test]
fn test_empty_token_never_resolves() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);
    let run = |args: &[String]| calls.record("run", args);

    let mut map = CommandMap::new();
    map.extend(items!["run", Bind::new(&run)]).unwrap();
    assert!(!map.call(&[""]).unwrap());

    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();
    assert!(map.call(&["", "x"]).unwrap());
    assert_eq!(calls.take(), vec![call("h", &["", "x"])]);
}

#[test]
fn test_unset_is_a_hard_stop() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);

    let mut map = CommandMap::new();
    map.extend(items!["reserved"]).unwrap();
    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();

    let err = map.call(&["reserved"]).unwrap_err();
    assert!(err.is_not_implemented());
    assert_eq!(err.key(), Some("reserved"));
    assert_eq!(err.to_string(), "command not implemented: reserved");

    let err = map.call(&["res", "extra"]).unwrap_err();
    assert_eq!(err.key(), Some("reserved"));
    assert!(calls.take().is_empty());
}

#[test]
fn test_soft_miss_without_default() {
    let noop = |_: &[String]| -> ActionResult { Ok(()) };
    let map = CommandMap::from_path(items!["start", Bind::new(&noop)]).unwrap();

    assert!(!map.call(&["stop"]).unwrap());
    assert!(!map.call::<String>(&[]).unwrap());
}

#[test]
fn test_ambiguous_token_falls_back() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);
    let noop = |_: &[String]| -> ActionResult { Ok(()) };

    let mut map = CommandMap::new();
    map.extend(items!["start", Bind::new(&noop)]).unwrap();
    map.extend(items!["status", Bind::new(&noop)]).unwrap();
    assert!(!map.call(&["sta"]).unwrap());

    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();
    assert!(map.call(&["sta"]).unwrap());
    assert_eq!(calls.take(), vec![call("h", &["sta"])]);
}

#[test]
fn test_promoted_default_action_stays_reachable() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);
    let g = |args: &[String]| calls.record("g", args);

    let mut map = CommandMap::new();
    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();
    map.extend(items![Item::Nil, vec![(Item::from("x"), Item::action(&g))]])
        .unwrap();

    assert!(map.get(KeyRef::Default).is_some_and(|e| e.as_subcommand().is_some()));
    assert!(map.call(&["y"]).unwrap());
    assert!(map.call(&["x", "1"]).unwrap());
    assert!(map.call::<&str>(&[]).unwrap());
    assert_eq!(
        calls.take(),
        vec![call("h", &["y"]), call("g", &["1"]), call("h", &[])]
    );
}

#[test]
fn test_default_subcommand_takes_original_tokens() {
    let calls = Calls::default();
    let inner = |args: &[String]| calls.record("inner", args);
    let run = |args: &[String]| calls.record("run", args);

    let mut map = CommandMap::new();
    map.extend(items![Item::Nil, "inner", Bind::new(&inner)]).unwrap();
    map.extend(items!["run", Bind::new(&run)]).unwrap();

    assert!(map.call(&["r", "a"]).unwrap());
    assert!(map.call(&["in", "b"]).unwrap());
    assert!(!map.call(&["zzz"]).unwrap());
    assert_eq!(
        calls.take(),
        vec![call("run", &["a"]), call("inner", &["b"])]
    );
}

#[test]
fn test_no_backtracking_into_parent() {
    let calls = Calls::default();
    let h = |args: &[String]| calls.record("h", args);
    let f = |args: &[String]| calls.record("f", args);

    let mut map = CommandMap::new();
    map.extend(items![Item::Nil, Bind::new(&h)]).unwrap();
    map.extend(items!["net", "up", Bind::new(&f)]).unwrap();

    assert!(!map.call(&["net", "sideways"]).unwrap());
    assert!(calls.take().is_empty());
}

#[test]
fn test_abbreviations_at_every_level() {
    let calls = Calls::default();
    let add = |args: &[String]| calls.record("add", args);
    let del = |args: &[String]| calls.record("del", args);

    let mut map = CommandMap::new();
    map.extend(items!["network", "route", "add", Bind::new(&add), "v4"])
        .unwrap();
    map.extend(items!["network", "route", "delete", Bind::new(&del)])
        .unwrap();
    map.extend(items!["network", "rule", Item::Nil]).unwrap();

    assert!(map.call(&["n", "ro", "a", "10.0.0.0/8"]).unwrap());
    assert!(map.call(&["net", "rou", "d"]).unwrap());
    assert!(!map.call(&["n", "r", "a"]).unwrap());
    assert!(map.call(&["n", "ru"]).unwrap_err().is_not_implemented());
    assert_eq!(
        calls.take(),
        vec![call("add", &["v4", "10.0.0.0/8"]), call("del", &[])]
    );
}

#[test]
fn test_action_error_propagates() {
    let fail = |_: &[String]| -> ActionResult { Err("disk full".into()) };
    let map = CommandMap::from_path(items!["save", Bind::new(&fail)]).unwrap();

    let err = map.call(&["save"]).unwrap_err();
    assert!(matches!(err, CommandMapError::Action(_)));
    assert_eq!(err.to_string(), "action failed: disk full");
}

#[test]
fn test_map_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CommandMap<'static>>();
    assert_send_sync::<Entry<'static>>();
}

#[test]
fn test_concurrent_read_only_dispatch() {
    let hits = AtomicUsize::new(0);
    let count = |_: &[String]| -> ActionResult {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    };

    let mut map = CommandMap::new();
    map.extend(items!["ping", Bind::new(&count)]).unwrap();
    map.extend(items!["nested", "ping", Bind::new(&count)]).unwrap();
    let map = map;

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(map.call(&["p"]).unwrap());
                    assert!(map.call(&["n", "p"]).unwrap());
                }
            });
        }
    });

    assert_eq!(hits.load(Ordering::SeqCst), 1600);
}
