//! Brewery name → lookup query token.

use std::sync::OnceLock;

use regex::Regex;

fn disallowed() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Normalize a name into a path-safe query token.
///
/// Lower-cases, drops everything but ASCII letters, digits, whitespace and
/// `-`, collapses whitespace runs, trims, and joins words with `+`.
/// `"Acme   Brewing Co."` → `"acme+brewing+co"`. The result may be empty.
pub fn query_token(name: &str) -> String {
    let lower = name.to_lowercase();
    let kept = disallowed().replace_all(&lower, "");
    let collapsed = whitespace_run().replace_all(kept.trim(), " ");
    collapsed.replace(' ', "+")
}
