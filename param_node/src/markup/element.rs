//! Owned element tree read from `quick-xml` events.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::{ParamError, ParamResult};

use super::MarkupElement;

/// Owned markup element.
///
/// Parsing copies the document into this form so a parse failure is reported
/// before any layer is applied, and so the tree can be adjusted (for example
/// to strip the template `parent` attribute) before merging.
///
/// # Examples
///
/// ```rust
/// use param_node::markup::{Element, MarkupElement};
///
/// # fn main() -> param_node::ParamResult<()> {
/// let root = Element::parse("<Unit kind=\"melee\">  <Armour>3</Armour> </Unit>", "inline")?;
/// assert_eq!(root.name(), "Unit");
/// assert_eq!(root.attribute("kind"), Some("melee"));
/// assert_eq!(root.children().next().map(MarkupElement::text), Some("3"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Creates an element with no attributes, children or text.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, replacing any existing attribute of the same name.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let key = name.into();
        let text = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = text,
            None => self.attributes.push((key, text)),
        }
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        text.as_ref().trim().clone_into(&mut self.text);
        self
    }

    /// Removes and returns an attribute.
    pub fn take_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Parses `xml` and returns its root element.
    ///
    /// Comments, processing instructions and the XML declaration are
    /// skipped. Text and CDATA sections directly inside an element are
    /// concatenated and trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Parse`] naming `source_name` when the document is
    /// not well-formed: mismatched or unclosed tags, duplicate attributes,
    /// unknown entities, text outside the root, or zero or several roots.
    pub fn parse(xml: &str, source_name: &str) -> ParamResult<Self> {
        let mut reader = Reader::from_str(xml);
        let mut builder = TreeBuilder::default();
        loop {
            let position = offset(&reader);
            let step = match reader.read_event() {
                Ok(Event::Start(start)) => Self::from_start(&start).map(|open| builder.open(open)),
                Ok(Event::Empty(start)) => {
                    Self::from_start(&start).and_then(|element| builder.close(element))
                }
                Ok(Event::End(_)) => builder.end(),
                Ok(Event::Text(text)) => text
                    .unescape()
                    .map_err(|err| err.to_string())
                    .and_then(|decoded| builder.text(&decoded)),
                Ok(Event::CData(data)) => std::str::from_utf8(&data.into_inner())
                    .map_err(|err| err.to_string())
                    .and_then(|raw| builder.text(raw)),
                Ok(Event::Eof) => break,
                Ok(_) => Ok(()),
                Err(err) => Err(err.to_string()),
            };
            step.map_err(|message| ParamError::parse(source_name, xml, position, message))?;
        }
        builder
            .finish()
            .map_err(|message| ParamError::parse(source_name, xml, offset(&reader), message))
    }

    /// Parses a UTF-8 byte buffer and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Parse`] when the bytes are not UTF-8 or the
    /// document is not well-formed.
    pub fn parse_bytes(bytes: &[u8], source_name: &str) -> ParamResult<Self> {
        let xml =
            std::str::from_utf8(bytes).map_err(|err| ParamError::not_utf8(source_name, &err))?;
        Self::parse(xml, source_name)
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, String> {
        let mut element = Self::new(utf8(start.name().as_ref())?);
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| err.to_string())?;
            let value = attribute.unescape_value().map_err(|err| err.to_string())?;
            element
                .attributes
                .push((utf8(attribute.key.as_ref())?.to_owned(), value.into_owned()));
        }
        Ok(element)
    }
}

/// Stack of open elements while a document is being read.
#[derive(Default)]
struct TreeBuilder {
    open: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) {
        self.open.push(element);
    }

    fn end(&mut self) -> Result<(), String> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| "closing tag without a matching start tag".to_owned())?;
        self.close(element)
    }

    fn close(&mut self, mut element: Element) -> Result<(), String> {
        let trimmed = element.text.trim();
        if trimmed.len() != element.text.len() {
            element.text = trimmed.to_owned();
        }
        match (self.open.last_mut(), &self.root) {
            (Some(parent), _) => parent.children.push(element),
            (None, Some(root)) => {
                return Err(format!(
                    "second root element '{}' after '{}'",
                    element.name, root.name
                ));
            }
            (None, None) => self.root = Some(element),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), String> {
        match self.open.last_mut() {
            Some(current) => current.text.push_str(text),
            None if text.trim().is_empty() => {}
            None => return Err("text outside the root element".to_owned()),
        }
        Ok(())
    }

    fn finish(self) -> Result<Element, String> {
        if let Some(unclosed) = self.open.last() {
            return Err(format!("element '{}' is not closed", unclosed.name));
        }
        self.root
            .ok_or_else(|| "document has no root element".to_owned())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(bytes).map_err(|err| err.to_string())
}

fn offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

impl MarkupElement for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn text(&self) -> &str {
        &self.text
    }
}
