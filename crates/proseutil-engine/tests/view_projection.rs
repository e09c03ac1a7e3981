mod common;

use std::rc::{Rc, Weak};

use common::{Builder, cursor_tr};
use pretty_assertions::assert_eq;
use proseutil_engine::{DomAtPos, DomNode, find_dom_ref_at_pos, find_parent_dom_ref_of_type};

/// A rendered tree with one element per block and a text fragment per
/// paragraph, the way an editor view lays out `doc(paragraph, paragraph)`.
struct Element {
    tag: &'static str,
    parent: Weak<Element>,
    children: std::cell::RefCell<Vec<Rc<Element>>>,
}

#[derive(Clone)]
struct View(Rc<Element>);

impl DomNode for View {
    fn is_text(&self) -> bool {
        self.0.tag == "#text"
    }

    fn parent_node(&self) -> Option<Self> {
        self.0.parent.upgrade().map(View)
    }

    fn child_node(&self, offset: usize) -> Option<Self> {
        self.0.children.borrow().get(offset).cloned().map(View)
    }
}

fn append(parent: &Rc<Element>, tag: &'static str) -> Rc<Element> {
    let child = Rc::new(Element {
        tag,
        parent: Rc::downgrade(parent),
        children: Default::default(),
    });
    parent.children.borrow_mut().push(Rc::clone(&child));
    child
}

/// Maps document positions of `doc(paragraph("ab"), paragraph("cd"))`
/// the way a browser view would: block boundaries land in the root,
/// positions inside text land in the text fragment.
fn dom_at_pos(root: &Rc<Element>, pos: usize) -> DomAtPos<View> {
    let paragraphs = root.children.borrow();
    match pos {
        0 => DomAtPos { node: View(Rc::clone(root)), offset: 0 },
        4 => DomAtPos { node: View(Rc::clone(root)), offset: 1 },
        8 => DomAtPos { node: View(Rc::clone(root)), offset: 2 },
        1..=3 => text_in(&paragraphs[0], pos - 1),
        _ => text_in(&paragraphs[1], pos - 5),
    }
}

fn text_in(paragraph: &Rc<Element>, offset: usize) -> DomAtPos<View> {
    let text = Rc::clone(&paragraph.children.borrow()[0]);
    DomAtPos { node: View(text), offset }
}

fn render() -> Rc<Element> {
    let root = Rc::new(Element {
        tag: "div",
        parent: Weak::new(),
        children: Default::default(),
    });
    for _ in 0..2 {
        let p = append(&root, "p");
        append(&p, "#text");
    }
    root
}

#[test]
fn block_boundaries_resolve_to_the_block_element() {
    let root = render();
    let second = find_dom_ref_at_pos(4, |pos| dom_at_pos(&root, pos)).expect("second block");
    assert_eq!(second.0.tag, "p");
    assert!(Rc::ptr_eq(&second.0, &root.children.borrow()[1]));

    // past the last block the root itself is returned
    let end = find_dom_ref_at_pos(8, |pos| dom_at_pos(&root, pos)).expect("root");
    assert!(Rc::ptr_eq(&end.0, &root));
}

#[test]
fn text_positions_never_yield_text_fragments() {
    let root = render();
    for pos in [1, 2, 3, 5, 7] {
        let found = find_dom_ref_at_pos(pos, |p| dom_at_pos(&root, p)).expect("attached text");
        assert!(!found.is_text(), "position {pos} gave a text fragment");
        assert_eq!(found.0.tag, "p");
    }
}

#[test]
fn parent_dom_ref_follows_the_selection() {
    let b = Builder::basic();
    let root = render();
    let tr = cursor_tr(b.doc(vec![b.p("ab"), b.p("cd")]), 6);

    let found = find_parent_dom_ref_of_type(tr.selection(), b.ty("paragraph"), |pos| {
        dom_at_pos(&root, pos)
    })
    .expect("cursor is inside a paragraph");
    assert!(Rc::ptr_eq(&found.0, &root.children.borrow()[1]));

    let none = find_parent_dom_ref_of_type(tr.selection(), b.ty("blockquote"), |pos| {
        dom_at_pos(&root, pos)
    });
    assert!(none.is_none());
}
