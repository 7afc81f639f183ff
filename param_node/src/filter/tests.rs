//! Tests for filtered copies.

use std::collections::BTreeSet;

use crate::{JsonRuntime, Node, ParamError, TreeSide, load_str};
use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

fn load(xml: &str) -> Result<Node> {
    let mut tree = Node::new();
    load_str(&mut tree, xml, "filter-test").map_err(|err| anyhow!(err.to_string()))?;
    Ok(tree)
}

#[fixture]
fn source() -> Result<Node> {
    load(
        r#"<Entity>
             <Identity><Civ>athen</Civ><Name>Hoplite</Name><Secret>x</Secret></Identity>
           </Entity>"#,
    )
}

#[rstest]
fn copies_only_permitted_entries(source: Result<Node>) -> Result<()> {
    let src = source?;
    let mut preview = load("<Identity/>")?;
    let permitted: BTreeSet<String> = ["Name", "Civ"].map(str::to_owned).into();
    preview
        .copy_filtered_children_of_child(src.get_child("Entity"), "Identity", &permitted)
        .map_err(|err| anyhow!(err.to_string()))?;
    let identity = preview.get_child("Identity");
    ensure!(identity.get_child("Name").text() == "Hoplite", "name not copied");
    ensure!(identity.get_child("Civ").text() == "athen", "civ not copied");
    ensure!(!identity.get_child("Secret").is_valid(), "secret leaked");
    Ok(())
}

#[rstest]
fn overwrites_same_named_entries_and_keeps_others(source: Result<Node>) -> Result<()> {
    let src = source?;
    let mut target = load("<Identity><Name>Old</Name><Keep>1</Keep></Identity>")?;
    let permitted = BTreeSet::from(["Name"]);
    target
        .copy_filtered_children_of_child(src.get_child("Entity"), "Identity", &permitted)
        .map_err(|err| anyhow!(err.to_string()))?;
    let identity = target.get_child("Identity");
    ensure!(identity.get_child("Name").text() == "Hoplite", "entry not overwritten");
    ensure!(identity.get_child("Keep").text() == "1", "unrelated entry dropped");
    ensure!(!identity.get_child("Civ").is_valid(), "unpermitted entry copied");
    Ok(())
}

#[rstest]
fn missing_target_child_is_reported(source: Result<Node>) -> Result<()> {
    let src = source?;
    let mut target = load("<Other/>")?;
    target
        .project(&mut JsonRuntime::default(), true)
        .map_err(|err| anyhow!(err.to_string()))?;
    let before = target.clone();
    let permitted = BTreeSet::from(["Name"]);
    let Err(err) =
        target.copy_filtered_children_of_child(src.get_child("Entity"), "Identity", &permitted)
    else {
        return Err(anyhow!("expected missing child error"));
    };
    ensure!(
        matches!(
            err.as_ref(),
            ParamError::MissingChild { side: TreeSide::Target, .. }
        ),
        "unexpected error {err}"
    );
    ensure!(target == before, "target changed despite failure");
    ensure!(target.has_cached_projection(), "failed copy cleared the cache");
    Ok(())
}

#[rstest]
fn missing_source_child_is_reported(source: Result<Node>) -> Result<()> {
    let src = source?;
    let mut target = load("<Identity/>")?;
    let permitted = BTreeSet::from(["Name"]);
    let Err(err) = target.copy_filtered_children_of_child(&src, "Identity", &permitted) else {
        return Err(anyhow!("expected missing child error"));
    };
    ensure!(
        matches!(
            err.as_ref(),
            ParamError::MissingChild { side: TreeSide::Source, .. }
        ),
        "unexpected error {err}"
    );
    Ok(())
}

#[rstest]
fn only_the_receiving_node_cache_is_cleared(source: Result<Node>) -> Result<()> {
    let src = source?;
    let mut target = load("<Identity><Name>Old</Name></Identity>")?;
    let mut runtime = JsonRuntime::default();
    for node in [&target, target.get_child("Identity")] {
        node.project(&mut runtime, true)
            .map_err(|err| anyhow!(err.to_string()))?;
    }
    let permitted = BTreeSet::from(["Name"]);
    target
        .copy_filtered_children_of_child(src.get_child("Entity"), "Identity", &permitted)
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(!target.has_cached_projection(), "receiving node cache kept");
    ensure!(
        target.get_child("Identity").has_cached_projection(),
        "child cache is expected to survive a filtered copy"
    );
    Ok(())
}
