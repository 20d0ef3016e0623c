//! Tree-to-bytes rendering.
//!
//! Output is compact: no indentation, no whitespace between tags, attributes
//! in ascending key order. Nothing is escaped here.

use crate::node::{Attributes, Never, Node};
use crate::sink::Sink;
use crate::tracing_macros::trace;

/// Where a placeholder sits in a rendered buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor<Id> {
    /// The placeholder id.
    pub id: Id,
    /// Byte offset in the buffer; content substituted here goes before the
    /// byte currently at `index`.
    pub index: usize,
}

impl<Id> Anchor<Id> {
    /// Convert the id, keeping the position.
    pub fn map<Id2>(self, f: impl FnOnce(Id) -> Id2) -> Anchor<Id2> {
        Anchor {
            id: f(self.id),
            index: self.index,
        }
    }
}

/// Render `node` into a fresh buffer, collecting anchors in document order.
pub fn render<Id: Clone>(node: &Node<Id>) -> (Vec<u8>, Vec<Anchor<Id>>) {
    let mut out = Vec::with_capacity(rendered_len(node));
    let mut anchors = Vec::new();
    render_into(node, &mut out, &mut anchors);
    (out, anchors)
}

/// Render an anchor-free tree.
pub fn render_literal(node: &Node<Never>) -> Vec<u8> {
    let (out, _) = render(node);
    out
}

/// Render `node` at the end of `sink`.
///
/// Anchor positions are absolute offsets in `sink`, so anything already in
/// the sink shifts them.
pub fn render_into<Id, S>(node: &Node<Id>, sink: &mut S, anchors: &mut Vec<Anchor<Id>>)
where
    Id: Clone,
    S: Sink + ?Sized,
{
    match node {
        Node::Bytes(raw) => sink.append(raw),
        Node::Text(text) => sink.append(text.as_bytes()),
        Node::Anchor(id) => {
            let index = sink.position();
            trace!(index, "anchor");
            anchors.push(Anchor {
                id: id.clone(),
                index,
            });
        }
        Node::Leaf {
            name,
            attributes,
            void,
        } => {
            open_tag(sink, name, attributes);
            let close: &[u8] = if *void { b"/>" } else { b">" };
            sink.append(close);
        }
        Node::Container {
            name,
            attributes,
            children,
        } => {
            open_tag(sink, name, attributes);
            sink.append(b">");
            for child in children {
                render_into(child, sink, anchors);
            }
            sink.append(b"</");
            sink.append(name.as_bytes());
            sink.append(b">");
        }
    }
}

fn open_tag<S: Sink + ?Sized>(sink: &mut S, name: &str, attributes: &Attributes) {
    sink.append(b"<");
    sink.append(name.as_bytes());
    for (key, value) in attributes.iter() {
        sink.append(b" ");
        sink.append(key.as_bytes());
        sink.append(b"=\"");
        sink.append(value.as_bytes());
        sink.append(b"\"");
    }
}

/// Exact number of bytes [`render`] produces for `node`.
pub fn rendered_len<Id>(node: &Node<Id>) -> usize {
    match node {
        Node::Bytes(raw) => raw.len(),
        Node::Text(text) => text.len(),
        Node::Anchor(_) => 0,
        Node::Leaf {
            name,
            attributes,
            void,
        } => open_tag_len(name, attributes) + if *void { 2 } else { 1 },
        Node::Container {
            name,
            attributes,
            children,
        } => {
            // `>` + children + `</name>`
            open_tag_len(name, attributes)
                + 1
                + children.iter().map(rendered_len).sum::<usize>()
                + name.len()
                + 3
        }
    }
}

fn open_tag_len(name: &str, attributes: &Attributes) -> usize {
    // ` key="value"` is four bytes of punctuation around key and value
    1 + name.len()
        + attributes
            .iter()
            .map(|(k, v)| k.len() + v.len() + 4)
            .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(node: &Node<u8>) -> String {
        String::from_utf8(render(node).0).unwrap()
    }

    #[test]
    fn void_leaf_self_closes() {
        assert_eq!(rendered(&Node::void("r")), "<r/>");
    }

    #[test]
    fn empty_container_closes_explicitly() {
        assert_eq!(rendered(&Node::container("g", [])), "<g></g>");
    }

    #[test]
    fn open_leaf_writes_only_open_tag() {
        assert_eq!(rendered(&Node::open("p").with_attr("class", "x")), r#"<p class="x">"#);
    }

    #[test]
    fn attributes_are_key_sorted() {
        let node = Node::void("rect")
            .with_attr("y", "2")
            .with_attr("width", "10")
            .with_attr("x", "1");
        assert_eq!(rendered(&node), r#"<rect width="10" x="1" y="2"/>"#);
    }

    #[test]
    fn anchors_record_write_position() {
        let tree = Node::container(
            "g",
            [Node::anchor(1), Node::escaped("ab"), Node::anchor(2), Node::anchor(1)],
        );
        let (out, anchors) = render(&tree);
        assert_eq!(out, b"<g>ab</g>");
        let positions: Vec<_> = anchors.iter().map(|a| (a.id, a.index)).collect();
        assert_eq!(positions, [(1, 3), (2, 5), (1, 5)]);
    }

    #[test]
    fn render_into_offsets_by_existing_content() {
        let mut sink = b"prefix".to_vec();
        let mut anchors = Vec::new();
        render_into(&Node::container("g", [Node::anchor(7u8)]), &mut sink, &mut anchors);
        assert_eq!(sink, b"prefix<g></g>");
        assert_eq!(anchors, [Anchor { id: 7, index: 9 }]);
    }

    #[test]
    fn rendered_len_is_exact() {
        let tree = Node::container(
            "svg",
            [
                Node::void("rect").with_attr("x", "1").with_attr("y", "2"),
                Node::open("text").with_attr("font", "mono"),
                Node::bytes(b"raw".to_vec()),
                Node::escaped("t"),
                Node::anchor(0),
                Node::container("g", [Node::void("circle")]),
            ],
        );
        assert_eq!(rendered_len(&tree), render(&tree).0.len());
    }
}
