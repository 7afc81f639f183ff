//! Tests for error formatting and helpers.

use super::{ParamError, TreeSide};
use camino::Utf8Path;
use rstest::rstest;

#[test]
fn parse_error_names_the_layer() {
    let error = ParamError::parse("units/spearman.xml", "<a>", 3, "element 'a' is not closed");
    let message = error.to_string();
    assert!(message.contains("units/spearman.xml"), "{message}");
    assert!(message.contains("is not closed"), "{message}");
    assert_eq!(error.source_name(), Some("units/spearman.xml"));
}

#[rstest]
#[case(0, 1, 1)]
#[case(4, 1, 5)]
#[case(9, 2, 3)]
#[case(500, 3, 8)]
fn parse_error_locates_offset(#[case] offset: usize, #[case] line: u32, #[case] column: u32) {
    let xml = "<Unit>\n  <Hp>\n</Unit>";
    let error = ParamError::parse("unit.xml", xml, offset, "mismatch");
    assert!(
        matches!(
            error.as_ref(),
            ParamError::Parse { line: l, column: c, .. } if *l == line && *c == column
        ),
        "{error:?}"
    );
}

#[test]
fn source_error_keeps_io_cause() {
    let error = ParamError::read_failure(
        Utf8Path::new("missing.xml"),
        "memory source".to_owned(),
        std::io::Error::new(std::io::ErrorKind::NotFound, "absent"),
    );
    assert!(std::error::Error::source(error.as_ref()).is_some());
    assert_eq!(error.source_name(), Some("missing.xml"));
}

#[rstest]
#[case(TreeSide::Target, "target")]
#[case(TreeSide::Source, "source")]
fn missing_child_mentions_side(#[case] side: TreeSide, #[case] fragment: &str) {
    let error = ParamError::MissingChild {
        name: "Identity".to_owned(),
        side,
    };
    let message = error.to_string();
    assert!(message.contains(fragment) && message.contains("Identity"));
    assert_eq!(error.source_name(), None);
}
