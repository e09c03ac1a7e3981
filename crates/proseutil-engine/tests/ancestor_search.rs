mod common;

use common::{Builder, cursor_tr, init_logging, node_tr};
use pretty_assertions::assert_eq;
use proseutil_engine::{
    find_parent_node, find_parent_node_closest_to_pos, find_parent_node_of_type,
    find_position_of_node_before, find_selected_node_of_type, has_parent_node_of_type,
    is_node_selection,
};
use proseutil_model::Node;
use rstest::rstest;

/// doc(table(table_row(table_cell(paragraph("ab")))))
fn table_doc(b: &Builder) -> Node {
    let cell = b.node("table_cell", vec![b.p("ab")]);
    let row = b.node("table_row", vec![cell]);
    b.doc(vec![b.node("table", vec![row])])
}

#[test]
fn nested_table_ancestors() -> anyhow::Result<()> {
    init_logging();
    let b = Builder::basic();
    let tr = cursor_tr(table_doc(&b), 5);
    let sel = tr.selection();

    let cell = find_parent_node_of_type(sel, b.ty("table_cell")).expect("inside a cell");
    assert_eq!((cell.depth, cell.pos, cell.start), (3, 2, 3));

    let row = find_parent_node_of_type(sel, [b.ty("table"), b.ty("table_row")]);
    assert_eq!(row.map(|r| r.depth), Some(2));

    let block = find_parent_node(sel, |n| n.is_block()).expect("paragraph is a block");
    assert_eq!(block.node.node_type().name(), "paragraph");
    assert_eq!(block.pos, 3);

    let pos = tr.doc().resolve(5)?;
    let table = find_parent_node_closest_to_pos(&pos, |n| n.node_type().name() == "table");
    assert_eq!(table.map(|t| t.pos), Some(0));
    Ok(())
}

#[test]
fn document_is_never_an_ancestor() {
    let b = Builder::basic();
    let tr = cursor_tr(b.doc(vec![b.p("ab")]), 2);

    assert!(has_parent_node_of_type(tr.selection(), b.ty("paragraph")));
    assert!(!has_parent_node_of_type(tr.selection(), b.ty("doc")));
    assert!(find_parent_node(tr.selection(), |n| n.node_type().name() == "doc").is_none());
}

#[test]
fn selected_node_requires_matching_type() {
    let b = Builder::basic();
    let tr = node_tr(b.doc(vec![b.p("ab"), b.rule()]), 4);
    assert!(is_node_selection(tr.selection()));

    let sel = tr.selection().as_node().expect("node selection");
    let found = find_selected_node_of_type(sel, b.ty("horizontal_rule")).expect("rule selected");
    assert_eq!(found.pos, 4);
    assert_eq!(found.node, b.rule());

    let cursor = cursor_tr(b.doc(vec![b.p("ab")]), 1);
    assert!(!is_node_selection(cursor.selection()));
    assert!(cursor.selection().as_node().is_none());
}

fn before_fixture(b: &Builder, name: &str) -> Node {
    match name {
        // rule at 4..5, second paragraph at 5
        "leaf" => b.doc(vec![b.p("ab"), b.rule(), b.p("cd")]),
        // paragraphs at 0..4 and 4..8
        "sibling" => b.doc(vec![b.p("ab"), b.p("cd")]),
        // blockquote at 0..6, paragraph at 6
        "container" => b.doc(vec![b.node("blockquote", vec![b.p("ab")]), b.p("cd")]),
        "start" => b.doc(vec![b.p("ab")]),
        "text" => b.doc(vec![b.p("abc"), b.p("de")]),
        // image at 2..3 inside the paragraph
        "inline_image" => b.doc(vec![b.node(
            "paragraph",
            vec![b.text("a"), b.image(), b.text("bc")],
        )]),
        other => unreachable!("unknown fixture {other}"),
    }
}

#[rstest]
#[case::leaf("leaf", 5, Some(4))]
#[case::sibling_paragraph("sibling", 4, Some(0))]
#[case::container("container", 6, Some(0))]
#[case::start_of_document("start", 1, None)]
#[case::inside_text("text", 2, Some(2))]
#[case::after_inline_image("inline_image", 3, Some(3))]
fn position_of_node_before(
    #[case] fixture: &str,
    #[case] cursor: usize,
    #[case] expected: Option<usize>,
) {
    let b = Builder::basic();
    let tr = cursor_tr(before_fixture(&b, fixture), cursor);
    assert_eq!(find_position_of_node_before(tr.selection()), expected);
}
