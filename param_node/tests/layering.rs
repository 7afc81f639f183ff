//! End-to-end layering behaviour across parsing, merging and rendering.

use anyhow::{Result, anyhow, ensure};
use param_node::{DirSource, JsonRuntime, Node, ParamResult, TemplateLoader, load_str};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::layers::LayerDir;
use test_helpers::xml::compact;

const BASE: &str = r#"
<Entity>
  <Example1><A attr="value">text</A></Example1>
  <Example2><B/></Example2>
  <Example3><X>x</X><Y>y</Y></Example3>
  <Example4 datatype="tokens">one two three</Example4>
</Entity>"#;

const OVERRIDE: &str = r#"
<Entity>
  <Example1><A>example</A><D>new</D></Example1>
  <Example2 disable=""/>
  <Example3 replace=""><D>new</D></Example3>
  <Example4 datatype="tokens">four -two</Example4>
</Entity>"#;

fn loaded(layers: &[&str]) -> Result<Node> {
    let mut tree = Node::new();
    for (index, xml) in layers.iter().enumerate() {
        checked(load_str(&mut tree, xml, &format!("layer-{index}")))?;
    }
    Ok(tree)
}

fn checked<T>(result: ParamResult<T>) -> Result<T> {
    result.map_err(|err| anyhow!(err.to_string()))
}

#[fixture]
fn merged() -> Result<Node> {
    loaded(&[BASE, OVERRIDE])
}

#[rstest]
fn documented_override_produces_expected_tree(merged: Result<Node>) -> Result<()> {
    let tree = merged?;
    let expected = compact(
        r#"<Entity>
             <Example1><A attr="value">example</A><D>new</D></Example1>
             <Example3><D>new</D></Example3>
             <Example4 datatype="tokens">one three four</Example4>
           </Entity>"#,
    );
    ensure!(tree.to_xml_text() == expected, "got {}", tree.to_xml_text());
    Ok(())
}

#[rstest]
fn documented_override_projects_to_json(merged: Result<Node>) -> Result<()> {
    let tree = merged?;
    let value = checked(tree.project(&mut JsonRuntime::default(), true))?;
    let expected = json!({
        "Entity": {
            "Example1": {
                "A": { "@attr": "value", "_string": "example" },
                "D": "new"
            },
            "Example3": { "D": "new" },
            "Example4": { "@datatype": "tokens", "_string": "one three four" }
        }
    });
    ensure!(*value == expected, "got {value}");
    Ok(())
}

#[rstest]
#[case::plain("<R><A k=\"v\">1</A><B replace=\"\"><C>2</C></B><D disable=\"\"/></R>")]
#[case::nested("<R><A><B><C>deep</C></B></A></R>")]
fn plain_layers_are_idempotent(#[case] layer: &str) -> Result<()> {
    let once = loaded(&[BASE, layer])?;
    let twice = loaded(&[BASE, layer, layer])?;
    ensure!(once == twice, "reapplying {layer} changed the tree");
    Ok(())
}

#[test]
fn token_layers_depend_on_history_but_reapply_stably() -> Result<()> {
    let layer = r#"<Entity><Example4 datatype="tokens">-one one</Example4></Entity>"#;
    let once = loaded(&[BASE, layer])?;
    let twice = loaded(&[BASE, layer, layer])?;
    ensure!(
        once.get_path("Entity/Example4").text() == "two three one",
        "got {}",
        once.get_path("Entity/Example4").text()
    );
    ensure!(
        twice.get_path("Entity/Example4").text() == "two three one",
        "re-adding an existing token must keep its position"
    );

    let appending = r#"<Entity><Example4 datatype="tokens">-three four</Example4></Entity>"#;
    let after_one = loaded(&[BASE, appending])?;
    let with_restore = loaded(&[
        BASE,
        appending,
        r#"<Entity><Example4 datatype="tokens">three</Example4></Entity>"#,
        appending,
    ])?;
    ensure!(
        after_one.get_path("Entity/Example4").text() == "one two four",
        "got {}",
        after_one.get_path("Entity/Example4").text()
    );
    ensure!(
        with_restore.get_path("Entity/Example4").text() == "one two four",
        "got {}",
        with_restore.get_path("Entity/Example4").text()
    );
    Ok(())
}

#[test]
fn conflicting_layers_depend_on_order() -> Result<()> {
    let disable = r#"<Entity><Example3 disable=""/></Entity>"#;
    let replace = r#"<Entity><Example3 replace=""><Z>z</Z></Example3></Entity>"#;
    let disabled_last = loaded(&[BASE, replace, disable])?;
    let replaced_last = loaded(&[BASE, disable, replace])?;
    ensure!(
        !disabled_last.get_path("Entity/Example3").is_valid(),
        "disable applied last must remove the element"
    );
    let example = replaced_last.get_path("Entity/Example3");
    ensure!(example.len() == 1, "replace applied last must rebuild the element");
    ensure!(example.get_child("Z").text() == "z", "replacement content missing");
    ensure!(disabled_last != replaced_last, "order had no effect");
    Ok(())
}

#[rstest]
#[case::attributes("<Unit a=\"&lt;1&gt;\" b=\"&quot;q&quot;\"><Hp>10</Hp></Unit>")]
#[case::tokens("<Unit><Classes>Infantry Melee Citizen</Classes></Unit>")]
#[case::entities("<Unit><Name>Tom &amp; Jerry&apos;s</Name></Unit>")]
#[case::empty_leaves("<Unit><Flag/><Other/></Unit>")]
fn rendering_round_trips(#[case] document: &str) -> Result<()> {
    let tree = loaded(&[document])?;
    let rendered = tree.to_xml_text();
    let reparsed = loaded(&[rendered.as_str()])?;
    ensure!(tree == reparsed, "round trip changed {document}");
    Ok(())
}

#[test]
fn text_slot_survives_round_trip() -> Result<()> {
    let tree = loaded(&[BASE, "<Entity><Example1>label</Example1></Entity>"])?;
    let rendered = tree.to_xml_text();
    ensure!(rendered.contains("<Example1><_string>label</_string>"), "got {rendered}");
    let reparsed = loaded(&[rendered.as_str()])?;
    let slot = reparsed.get_path("Entity/Example1/_string");
    ensure!(slot.text() == "label", "text slot not reparsed as a child");
    Ok(())
}

#[test]
fn templates_resolve_from_a_directory() -> Result<()> {
    let dir = LayerDir::new()?
        .with_layer("template_unit.xml", BASE)?
        .with_layer(
            "units/athen_hoplite.xml",
            &OVERRIDE.replacen("<Entity>", r#"<Entity parent="template_unit">"#, 1),
        )?;
    let source = checked(DirSource::open(dir.root()))?;
    let mut loader = TemplateLoader::new(source);
    let resolved = checked(loader.resolve("units/athen_hoplite"))?.clone();
    let direct = loaded(&[BASE, OVERRIDE])?;
    ensure!(resolved == direct, "template chain diverged from manual layering");
    Ok(())
}
