//! Tests for XML escaping and rendering.

use super::{escape_bytes, escape_text};
use crate::{Node, load_str};
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

fn load(xml: &str) -> Result<Node> {
    let mut tree = Node::new();
    load_str(&mut tree, xml, "serialize-test").map_err(|err| anyhow!(err.to_string()))?;
    Ok(tree)
}

#[rstest]
#[case("plain", "plain")]
#[case("a & b", "a &amp; b")]
#[case("<tag>", "&lt;tag&gt;")]
#[case("\"quoted\" 'single'", "&quot;quoted&quot; &apos;single&apos;")]
#[case("tab\tnew\nline\r", "tab\tnew\nline\r")]
#[case("nul\u{0}", "nul\u{fffd}")]
#[case("esc\u{1b}", "esc\u{fffd}")]
#[case("\u{fffe}\u{ffff}", "\u{fffd}\u{fffd}")]
#[case("snow \u{2603} \u{1f600}", "snow \u{2603} \u{1f600}")]
fn escape_text_cases(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(escape_text(input), expected);
}

#[test]
fn escape_bytes_replaces_invalid_utf8() {
    assert_eq!(escape_bytes(b"ok\xff<"), "ok\u{fffd}&lt;");
}

#[test]
fn attributes_render_on_parent_element_in_name_order() -> Result<()> {
    let tree = load(r#"<A z="1" b="&quot;2&quot;"><C/></A>"#)?;
    let xml = tree.to_xml_text();
    ensure!(
        xml == r#"<A b="&quot;2&quot;" z="1"><C></C></A>"#,
        "unexpected xml {xml}"
    );
    Ok(())
}

#[test]
fn text_beside_elements_uses_text_slot() -> Result<()> {
    let mut tree = load("<A><B>inner</B></A>")?;
    load_str(&mut tree, "<A>outer</A>", "overlay").map_err(|err| anyhow!(err.to_string()))?;
    let xml = tree.to_xml_text();
    ensure!(
        xml == "<A><_string>outer</_string><B>inner</B></A>",
        "unexpected xml {xml}"
    );
    Ok(())
}

#[rstest]
#[case("<Entity><Speed>9.5</Speed><Name a=\"x\">Pike &lt;elite&gt;</Name></Entity>")]
#[case("<Template parent=\"base\"><Cost><Food>50</Food><Wood>40</Wood></Cost></Template>")]
#[case("<Empty/>")]
#[case("<R><Deep><Deeper><Deepest>1</Deepest></Deeper></Deep></R>")]
fn serialised_trees_reload_identically(#[case] xml: &str) -> Result<()> {
    let tree = load(xml)?;
    let reloaded = load(&tree.to_xml_text())?;
    ensure!(reloaded == tree, "round trip changed tree: {reloaded:?} vs {tree:?}");
    Ok(())
}

#[test]
fn write_xml_streams_into_any_writer() -> Result<()> {
    let tree = load("<A>1</A>")?;
    let mut out = String::from("prefix:");
    tree.write_xml(&mut out)?;
    ensure!(out == "prefix:<A>1</A>", "unexpected output {out}");
    Ok(())
}
