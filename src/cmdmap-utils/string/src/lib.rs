//! Line tokenizing utilities for cmdmap.

use regex_lite::Regex;

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn trim(s: &str) -> String {
    tokens(s).join(" ")
}

/// Split a line into whitespace-separated tokens.
pub fn tokens(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

/// Take up to `count` leading tokens from a line.
///
/// Returns the taken tokens and the remaining tokens joined by single spaces.
pub fn take(s: &str, count: usize) -> (Vec<&str>, String) {
    let mut all = tokens(s);
    let rest = all.split_off(count.min(all.len()));
    (all, rest.join(" "))
}

/// Match `pattern` at the start of `s`.
///
/// On a match, returns the text after the match and the capture groups
/// (`None` for groups that did not participate). Without a match, returns
/// `s` unchanged and no groups.
pub fn take_match<'s>(
    s: &'s str,
    pattern: &str,
) -> Result<(&'s str, Vec<Option<&'s str>>), regex_lite::Error> {
    let re = Regex::new(&format!("^(?:{pattern})"))?;
    let Some(caps) = re.captures(s) else {
        return Ok((s, Vec::new()));
    };
    let end = caps.get(0).map_or(0, |m| m.end());
    let groups = caps
        .iter()
        .skip(1)
        .map(|group| group.map(|m| m.as_str()))
        .collect();
    Ok((&s[end..], groups))
}
