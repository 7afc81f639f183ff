//! Whitespace-separated token list merging.

/// Merges `incoming` tokens into `existing`.
///
/// Tokens are applied in order: `-name` removes `name` if present, anything
/// else is appended unless already present. Later entries win, so `a -a`
/// leaves `a` out while `-a a` keeps it. Surviving existing tokens keep their
/// positions and new tokens follow in the order they were given. A bare `-`
/// is ignored.
///
/// ```rust,ignore
/// assert_eq!(merge_tokens("one two three", "four -two"), "one three four");
/// ```
pub(crate) fn merge_tokens(existing: &str, incoming: &str) -> String {
    let mut tokens: Vec<&str> = existing.split_whitespace().collect();
    for token in incoming.split_whitespace() {
        match token.strip_prefix('-') {
            Some("") => {}
            Some(removed) => tokens.retain(|kept| *kept != removed),
            None if tokens.contains(&token) => {}
            None => tokens.push(token),
        }
    }
    tokens.join(" ")
}
