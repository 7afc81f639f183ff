//! Tests for the bundled markup backend.

use super::{Element, MarkupElement};
use crate::ParamError;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

fn parse(xml: &str) -> Result<Element> {
    Element::parse(xml, "test").map_err(|err| anyhow!(err.to_string()))
}

#[test]
fn text_is_trimmed_and_concatenated() -> Result<()> {
    let root = parse("<Classes>\n  one two\n  <!-- note -->  three\n</Classes>")?;
    ensure!(root.text() == "one two\n    three", "unexpected text {:?}", root.text());
    Ok(())
}

#[test]
fn entities_and_cdata_are_decoded() -> Result<()> {
    let root = parse("<A>&lt;b&gt; &amp; <![CDATA[<raw>]]></A>")?;
    ensure!(root.text() == "<b> & <raw>", "unexpected text {:?}", root.text());
    Ok(())
}

#[test]
fn children_keep_document_order() -> Result<()> {
    let root = parse("<R><b/><a/><c/></R>")?;
    let names: Vec<&str> = root.children().map(MarkupElement::name).collect();
    ensure!(names == ["b", "a", "c"], "unexpected order {names:?}");
    Ok(())
}

#[rstest]
#[case("<a><b></a>")]
#[case("")]
#[case("<a>unclosed")]
#[case("<a x=\"1\" x=\"2\"/>")]
fn malformed_documents_report_parse_failure(#[case] xml: &str) {
    let err = match Element::parse(xml, "broken.xml") {
        Ok(root) => panic!("expected parse failure, got {root:?}"),
        Err(err) => err,
    };
    assert!(matches!(
        err.as_ref(),
        ParamError::Parse { source_name, .. } if source_name == "broken.xml"
    ));
}

#[test]
fn invalid_utf8_is_a_parse_failure() {
    let err = match Element::parse_bytes(b"<a>\xff</a>", "bin") {
        Ok(root) => panic!("expected UTF-8 failure, got {root:?}"),
        Err(err) => err,
    };
    assert!(matches!(
        err.as_ref(),
        ParamError::Parse { message, .. } if message.contains("UTF-8")
    ));
}

#[test]
fn take_attribute_removes_entry() {
    let mut element = Element::new("Entity")
        .with_attribute("parent", "base")
        .with_attribute("id", "1");
    assert_eq!(element.take_attribute("parent").as_deref(), Some("base"));
    assert_eq!(element.attribute("parent"), None);
    assert_eq!(element.attribute("id"), Some("1"));
}
