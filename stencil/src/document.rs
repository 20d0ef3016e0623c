//! Whole documents: the XML declaration followed by one root element.

use crate::node::{Never, Node};
use crate::render::{Anchor, render_into, render_literal, rendered_len};
use crate::template::FrozenTemplate;

/// Written before the root element of every [`Document`], with no newline
/// after it.
pub const XML_DECLARATION: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" ?>"#;

/// A root element preceded by the XML declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document<Id> {
    root: Node<Id>,
}

impl<Id> Document<Id> {
    /// Wrap `root`.
    pub fn new(root: Node<Id>) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &Node<Id> {
        &self.root
    }

    /// Unwrap the root element.
    pub fn into_root(self) -> Node<Id> {
        self.root
    }
}

impl<Id: Clone> Document<Id> {
    /// Render the declaration and root. Anchor offsets include the
    /// declaration.
    pub fn render(&self) -> (Vec<u8>, Vec<Anchor<Id>>) {
        let mut out = self.prologue();
        let mut anchors = Vec::new();
        render_into(&self.root, &mut out, &mut anchors);
        (out, anchors)
    }

    /// Render into a frozen template.
    pub fn freeze(&self) -> FrozenTemplate<Id> {
        FrozenTemplate::freeze_into(&self.root, self.prologue())
    }

    fn prologue(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(XML_DECLARATION.len() + rendered_len(&self.root));
        out.extend_from_slice(XML_DECLARATION);
        out
    }
}

impl Document<Never> {
    /// The finished bytes of an anchor-free document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = XML_DECLARATION.to_vec();
        out.extend_from_slice(&render_literal(&self.root));
        out
    }
}

impl<Id> From<Node<Id>> for Document<Id> {
    fn from(root: Node<Id>) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_has_no_trailing_newline() {
        let doc: Document<Never> = Node::void("svg").into();
        assert_eq!(
            doc.to_bytes(),
            br#"<?xml version="1.0" encoding="UTF-8" ?><svg/>"#
        );
    }

    #[test]
    fn anchors_are_offset_by_declaration() {
        let doc = Document::new(Node::container("svg", [Node::anchor('x')]));
        let template = doc.freeze();
        assert_eq!(template.anchors()[0].index, XML_DECLARATION.len() + "<svg>".len());
        assert_eq!(doc.render(), template.clone().into_parts());
    }
}
