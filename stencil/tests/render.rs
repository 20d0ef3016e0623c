//! Byte-level output of the renderer.

use indoc::indoc;
use stencil::{Attributes, Document, FrozenTemplate, Never, Node, Tag, render, render_literal};

fn literal(node: &Node<Never>) -> String {
    String::from_utf8(render_literal(node)).unwrap()
}

#[test]
fn void_leaf_and_empty_container() {
    stencil_testhelpers::setup();

    assert_eq!(literal(&Node::void("r")), "<r/>");
    assert_eq!(literal(&Node::container("g", [])), "<g></g>");
}

#[test]
fn svg_example() {
    stencil_testhelpers::setup();

    let tree = Node::container(
        "svg",
        [
            Node::element(Tag::void("rect"), [("x", "1"), ("y", "2")]),
            Node::anchor("PLACEHOLDER"),
        ],
    );
    let template = FrozenTemplate::freeze(&tree);
    let rendered = String::from_utf8(template.literals().to_vec()).unwrap();

    insta::assert_snapshot!(rendered, @r#"<svg><rect x="1" y="2"/></svg>"#);
    assert_eq!(template.anchors().len(), 1);
    assert_eq!(template.anchors()[0].id, "PLACEHOLDER");
    assert_eq!(template.anchors()[0].index, rendered.len() - "</svg>".len());
}

#[test]
fn attribute_insertion_order_does_not_matter() {
    stencil_testhelpers::setup();

    let forward: Node<Never> = Node::element(
        Tag::void("circle"),
        [("cx", "5"), ("cy", "6"), ("r", "2"), ("fill", "none")],
    );
    let mut attributes = Attributes::new();
    attributes.insert("fill", "none");
    attributes.insert("r", "2");
    attributes.insert("cy", "6");
    attributes.insert("cx", "5");
    let backward: Node<Never> = Node::Leaf {
        name: "circle".into(),
        attributes,
        void: true,
    };

    assert_eq!(render_literal(&forward), render_literal(&backward));
    insta::assert_snapshot!(literal(&forward), @r#"<circle cx="5" cy="6" fill="none" r="2"/>"#);
}

#[test]
fn nested_document_has_no_added_whitespace() {
    stencil_testhelpers::setup();

    let tree: Node<Never> = Node::element(Tag::content("svg"), [("width", "10")]).with_children([
        Node::element(Tag::content("g"), [("id", "a")]).with_children([
            Node::void("rect"),
            Node::element(Tag::content("text"), Attributes::new()).with_child(Node::text("1 < 2")),
        ]),
        Node::bytes(b"<!-- raw -->".to_vec()),
    ]);

    let expected = indoc! {r#"
        <svg width="10">
        <g id="a">
        <rect/>
        <text>1 &lt; 2</text>
        </g>
        <!-- raw -->
        </svg>
    "#}
    .replace('\n', "");
    assert_eq!(literal(&tree), expected);
}

#[test]
fn open_leaf_leaves_closing_to_the_caller() {
    stencil_testhelpers::setup();

    let tree: Node<Never> = Node::container(
        "p",
        [
            Node::open("span").with_attr("class", "x"),
            Node::escaped("manual"),
            Node::bytes(b"</span>".to_vec()),
        ],
    );
    insta::assert_snapshot!(literal(&tree), @r#"<p><span class="x">manual</span></p>"#);
}

#[test]
fn rendering_is_deterministic() {
    stencil_testhelpers::setup();

    let tree = Node::container(
        "svg",
        [
            Node::anchor(1u32),
            Node::void("rect").with_attr("y", "0").with_attr("x", "0"),
            Node::container("g", [Node::anchor(2), Node::escaped("t"), Node::anchor(1)]),
        ],
    );
    assert_eq!(render(&tree), render(&tree));
}

#[test]
fn anchors_keep_document_order_with_duplicates() {
    stencil_testhelpers::setup();

    let tree = Node::container(
        "g",
        [
            Node::anchor('a'),
            Node::void("r"),
            Node::anchor('b'),
            Node::container("g", [Node::anchor('a')]),
        ],
    );
    let template = FrozenTemplate::freeze(&tree);
    let ids: Vec<_> = template.anchors().iter().map(|a| a.id).collect();
    assert_eq!(ids, ['a', 'b', 'a']);
    assert!(template.anchors().windows(2).all(|w| w[0].index <= w[1].index));
}

#[test]
fn document_prepends_declaration() {
    stencil_testhelpers::setup();

    let doc: Document<Never> = Node::container("svg", [Node::void("rect")]).into();
    let bytes = String::from_utf8(doc.to_bytes()).unwrap();
    insta::assert_snapshot!(bytes, @r#"<?xml version="1.0" encoding="UTF-8" ?><svg><rect/></svg>"#);
}
