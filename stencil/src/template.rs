//! Frozen templates: a rendered buffer plus the positions of its anchors.

use crate::error::TemplateError;
use crate::node::{Never, Node};
use crate::render::{Anchor, render, render_into, rendered_len};
use crate::sink::Sink;
use crate::tracing_macros::{trace, trace_span};

/// A tree rendered once, ready to be spliced many times.
///
/// `literals` never changes after construction. `anchors` is in document
/// order, which is also ascending `index` order. The same id may appear more
/// than once; each occurrence is substituted independently.
///
/// Applying only reads `self`, so a template can be shared (for example behind
/// an `Arc`) and applied from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrozenTemplate<Id, S = Vec<u8>> {
    literals: S,
    anchors: Vec<Anchor<Id>>,
}

impl<Id: Clone> FrozenTemplate<Id> {
    /// Render `node` into a new template.
    pub fn freeze(node: &Node<Id>) -> Self {
        trace_span!("freeze");
        let (literals, anchors) = render(node);
        trace!(len = literals.len(), anchors = anchors.len(), "froze template");
        Self { literals, anchors }
    }
}

impl<Id, S> FrozenTemplate<Id, S>
where
    Id: Clone,
    S: Sink + AsRef<[u8]>,
{
    /// Render `node` at the end of `sink` and freeze the result.
    ///
    /// Whatever `sink` already holds becomes a literal prefix.
    pub fn freeze_into(node: &Node<Id>, mut sink: S) -> Self {
        trace_span!("freeze_into", prefix = sink.position());
        sink.reserve(rendered_len(node));
        let mut anchors = Vec::new();
        render_into(node, &mut sink, &mut anchors);
        Self {
            literals: sink,
            anchors,
        }
    }
}

impl<Id, S: AsRef<[u8]>> FrozenTemplate<Id, S> {
    /// Assemble a template from a buffer and anchor list produced elsewhere.
    ///
    /// Anchors must be in ascending `index` order and within the buffer.
    pub fn from_parts(literals: S, anchors: Vec<Anchor<Id>>) -> Result<Self, TemplateError> {
        let len = literals.as_ref().len();
        let mut previous = 0;
        for (position, anchor) in anchors.iter().enumerate() {
            if anchor.index > len {
                return Err(TemplateError::AnchorOutOfBounds {
                    index: anchor.index,
                    len,
                });
            }
            if anchor.index < previous {
                return Err(TemplateError::AnchorsOutOfOrder {
                    position,
                    index: anchor.index,
                    previous,
                });
            }
            previous = anchor.index;
        }
        Ok(Self { literals, anchors })
    }

    /// The rendered bytes.
    pub fn literals(&self) -> &[u8] {
        self.literals.as_ref()
    }

    /// Anchors in document order.
    pub fn anchors(&self) -> &[Anchor<Id>] {
        &self.anchors
    }

    /// Length of the rendered bytes.
    pub fn len(&self) -> usize {
        self.literals().len()
    }

    /// True when there are neither literal bytes nor anchors.
    pub fn is_empty(&self) -> bool {
        self.literals().is_empty() && self.anchors.is_empty()
    }

    /// Split into buffer and anchors.
    pub fn into_parts(self) -> (S, Vec<Anchor<Id>>) {
        (self.literals, self.anchors)
    }

    /// Convert every anchor id. The buffer is moved, not copied.
    pub fn map<Id2>(self, mut f: impl FnMut(Id) -> Id2) -> FrozenTemplate<Id2, S> {
        FrozenTemplate {
            literals: self.literals,
            anchors: self.anchors.into_iter().map(|a| a.map(&mut f)).collect(),
        }
    }

    /// Convert anchor ids, dropping anchors for which `f` returns `None`.
    ///
    /// A dropped anchor becomes an ordinary position in the literals: nothing
    /// is ever substituted there.
    pub fn filter_map<Id2>(self, mut f: impl FnMut(Id) -> Option<Id2>) -> FrozenTemplate<Id2, S> {
        FrozenTemplate {
            literals: self.literals,
            anchors: self
                .anchors
                .into_iter()
                .filter_map(|a| {
                    let index = a.index;
                    f(a.id).map(|id| Anchor { id, index })
                })
                .collect(),
        }
    }
}

impl<S: AsRef<[u8]>> FrozenTemplate<Never, S> {
    /// The finished bytes. A template without anchors needs no substitution.
    pub fn into_literals(self) -> S {
        self.literals
    }

    /// Use an anchor-free template where any id type is expected.
    pub fn widen<Id>(self) -> FrozenTemplate<Id, S> {
        self.map(|never| match never {})
    }
}
