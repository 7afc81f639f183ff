//! Rendering trees back to XML text.

use std::fmt::{self, Write};

use crate::node::{ATTRIBUTE_PREFIX, Node, TEXT_SLOT};

/// Escapes `text` for use as XML character data or attribute values.
///
/// The five reserved characters are replaced by entity references and any
/// character that XML 1.0 does not allow is replaced with U+FFFD, so the output
/// is always well-formed.
///
/// # Examples
///
/// ```rust
/// use param_node::escape_text;
///
/// assert_eq!(escape_text(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&apos;");
/// assert_eq!(escape_text("bell\u{7}"), "bell\u{fffd}");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_xml_char(c) => escaped.push(c),
            _ => escaped.push(char::REPLACEMENT_CHARACTER),
        }
    }
    escaped
}

/// Escapes raw bytes, replacing invalid UTF-8 sequences with U+FFFD.
#[must_use]
pub fn escape_bytes(bytes: &[u8]) -> String {
    escape_text(&String::from_utf8_lossy(bytes))
}

const fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn is_attribute(name: &str) -> bool {
    name.starts_with(ATTRIBUTE_PREFIX)
}

impl Node {
    /// Renders the children of this node as XML text.
    ///
    /// `@` children become attributes of their parent element. When a node
    /// has both text and element children, the text is written into a
    /// reserved `_string` element ahead of the children.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use param_node::{Node, load_str};
    ///
    /// # fn main() -> param_node::ParamResult<()> {
    /// let mut tree = Node::new();
    /// load_str(&mut tree, r#"<Unit id="3"><Name>Hoplite &amp; co</Name></Unit>"#, "unit")?;
    /// assert_eq!(
    ///     tree.to_xml_text(),
    ///     r#"<Unit id="3"><Name>Hoplite &amp; co</Name></Unit>"#,
    /// );
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn to_xml_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ignored = self.write_xml(&mut out);
        out
    }

    /// Writes the children of this node as XML text to `out`.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying writer.
    pub fn write_xml<W: Write>(&self, out: &mut W) -> fmt::Result {
        let has_elements = self.children().any(|(name, _)| !is_attribute(name));
        if !self.text().is_empty() {
            if has_elements {
                write!(out, "<{TEXT_SLOT}>{}</{TEXT_SLOT}>", escape_text(self.text()))?;
            } else {
                out.write_str(&escape_text(self.text()))?;
            }
        }
        for (name, child) in self.children().filter(|(name, _)| !is_attribute(name)) {
            write!(out, "<{name}")?;
            for (attribute, value) in child.children().filter(|(key, _)| is_attribute(key)) {
                let bare = attribute.trim_start_matches(ATTRIBUTE_PREFIX);
                write!(out, " {bare}=\"{}\"", escape_text(value.text()))?;
            }
            out.write_char('>')?;
            child.write_xml(out)?;
            write!(out, "</{name}>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
