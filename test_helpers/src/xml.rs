//! Markup normalisation for assertions on rendered documents.

/// Drops whitespace-only runs between tags and trims the result.
///
/// Lets tests write expected documents with indentation while comparing them
/// against compact serializer output. Text inside elements is untouched.
#[must_use]
pub fn compact(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut pending = String::new();
    let mut after_tag = true;
    for ch in markup.chars() {
        match ch {
            '<' => {
                pending.clear();
                out.push(ch);
                after_tag = false;
            }
            '>' => {
                out.push(ch);
                after_tag = true;
            }
            c if after_tag && c.is_whitespace() => pending.push(c),
            c => {
                if after_tag {
                    out.push_str(&pending);
                    pending.clear();
                    after_tag = false;
                }
                out.push(c);
            }
        }
    }
    out.trim().to_owned()
}
