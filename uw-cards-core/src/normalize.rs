//! Canonical card names for upstream titles.
//!
//! Upstream titles are either `"Card Name"` or `"123. Card Name"`, and
//! apostrophes arrive as curly quotes or as HTML numeric entities.

/// Quote spellings that all mean a plain apostrophe.
const APOSTROPHES: [&str; 4] = ["\u{2018}", "\u{2019}", "&#8216;", "&#8217;"];

/// Normalize a raw upstream title into the name used as the merge key.
///
/// Everything up to the first `.` is dropped when it is a purely numeric
/// running number, with or without a following space. `"Sgt. Foo"` keeps
/// its dot.
pub fn normalize_name(raw: &str) -> String {
    let name = strip_running_number(raw).trim();

    let mut out = name.to_string();
    for quote in APOSTROPHES {
        if out.contains(quote) {
            out = out.replace(quote, "'");
        }
    }
    out
}

fn strip_running_number(raw: &str) -> &str {
    match raw.split_once('.') {
        Some((prefix, rest)) if is_running_number(prefix) => rest,
        _ => raw,
    }
}

fn is_running_number(prefix: &str) -> bool {
    let prefix = prefix.trim();
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
