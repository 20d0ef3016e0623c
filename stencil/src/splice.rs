//! Substituting content at the anchors of a frozen template.
//!
//! Every `apply*` method walks the anchor list once and produces a
//! [`Spliced`]: an ordered list of segments whose concatenation is the final
//! document. Literal segments borrow from the template, so nothing is copied
//! out of it. Anchors whose source returns `None` are skipped, and the literal
//! bytes around them are emitted as one segment.

use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::hash::{BuildHasher, Hash};
use std::io;
use std::iter;

use crate::error::SpliceError;
use crate::node::{Never, Node};
use crate::render::render_literal;
use crate::template::FrozenTemplate;
use crate::tracing_macros::trace;

/// Nesting limit used by callers that have no better bound for
/// [`FrozenTemplate::try_apply_nodes`].
pub const DEFAULT_DEPTH_LIMIT: usize = 64;

/// The result of applying substitutions to a template.
///
/// Segments borrow from the template and from any borrowed replacement
/// content, so those must outlive the `Spliced` value.
///
/// Equality compares the concatenated bytes, not how they are split into
/// segments.
#[derive(Debug, Clone, Default)]
pub struct Spliced<'a> {
    segments: Vec<Cow<'a, [u8]>>,
}

impl<'a> Spliced<'a> {
    /// Segments in output order.
    pub fn segments(&self) -> &[Cow<'a, [u8]>] {
        &self.segments
    }

    /// Iterate segments as byte slices.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.segments.iter().map(|segment| segment.as_ref())
    }

    /// Total number of bytes across all segments.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    /// Whether the output has no bytes.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|segment| segment.is_empty())
    }

    /// Concatenate all segments into one buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for segment in &self.segments {
            out.extend_from_slice(segment);
        }
        out
    }

    /// Stream all segments to `writer` in order.
    pub fn write_to<W: io::Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        for segment in &self.segments {
            writer.write_all(segment)?;
        }
        Ok(())
    }

    /// Detach from every borrowed source by copying borrowed segments.
    pub fn into_owned(self) -> Spliced<'static> {
        Spliced {
            segments: self
                .segments
                .into_iter()
                .map(|segment| Cow::Owned(segment.into_owned()))
                .collect(),
        }
    }

    /// Take the segment list.
    pub fn into_segments(self) -> Vec<Cow<'a, [u8]>> {
        self.segments
    }
}

impl PartialEq for Spliced<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().flatten().eq(other.iter().flatten())
    }
}

impl Eq for Spliced<'_> {}

impl<'a> IntoIterator for Spliced<'a> {
    type Item = Cow<'a, [u8]>;
    type IntoIter = std::vec::IntoIter<Cow<'a, [u8]>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<Id, S: AsRef<[u8]>> FrozenTemplate<Id, S> {
    /// The splicing walk shared by every `apply*` form.
    fn splice<'a, E, R, F>(&'a self, mut resolve: F) -> Result<Spliced<'a>, E>
    where
        F: FnMut(&Id) -> Result<Option<R>, E>,
        R: IntoIterator<Item = Cow<'a, [u8]>>,
    {
        let literals = self.literals();
        let mut segments = Vec::with_capacity(self.anchors().len() * 2 + 1);
        let mut cursor = 0;

        for anchor in self.anchors() {
            let Some(replacement) = resolve(&anchor.id)? else {
                trace!(index = anchor.index, "no replacement, keeping literal run");
                continue;
            };
            if cursor < anchor.index {
                segments.push(Cow::Borrowed(&literals[cursor..anchor.index]));
                cursor = anchor.index;
            }
            // Anchors occupy no bytes, so the cursor stays at `anchor.index`.
            segments.extend(replacement);
        }

        if cursor < literals.len() {
            segments.push(Cow::Borrowed(&literals[cursor..]));
        }
        trace!(segments = segments.len(), "spliced template");
        Ok(Spliced { segments })
    }

    /// Substitute each anchor with zero or more borrowed fragments.
    ///
    /// `source` is called once per anchor occurrence. `None` leaves the anchor
    /// empty; `Some(fragments)` splices the fragments in order.
    pub fn apply<'a, I, F>(&'a self, mut source: F) -> Spliced<'a>
    where
        F: FnMut(&Id) -> Option<I>,
        I: IntoIterator<Item = &'a [u8]>,
    {
        unwrap_infallible(self.try_apply(|id| Ok::<_, Infallible>(source(id))))
    }

    /// Like [`apply`](Self::apply), but `source` may fail.
    ///
    /// The first error is returned as-is; the template is untouched.
    pub fn try_apply<'a, E, I, F>(&'a self, mut source: F) -> Result<Spliced<'a>, E>
    where
        F: FnMut(&Id) -> Result<Option<I>, E>,
        I: IntoIterator<Item = &'a [u8]>,
    {
        self.splice(|id| {
            Ok(source(id)?.map(|fragments| fragments.into_iter().map(Cow::Borrowed)))
        })
    }

    /// Substitute each anchor with a single borrowed fragment.
    pub fn apply_slices<'a, F>(&'a self, mut source: F) -> Spliced<'a>
    where
        F: FnMut(&Id) -> Option<&'a [u8]>,
    {
        self.apply(|id| source(id).map(iter::once))
    }

    /// Substitute each anchor with an owned buffer.
    pub fn apply_owned<F>(&self, mut source: F) -> Spliced<'_>
    where
        F: FnMut(&Id) -> Option<Vec<u8>>,
    {
        unwrap_infallible(self.splice(|id| {
            Ok::<_, Infallible>(source(id).map(|bytes| iter::once(Cow::<[u8]>::Owned(bytes))))
        }))
    }

    /// Substitute anchors found in `replacements`; others are left empty.
    pub fn apply_map<'a, B, H>(&'a self, replacements: &'a HashMap<Id, B, H>) -> Spliced<'a>
    where
        Id: Eq + Hash,
        B: AsRef<[u8]>,
        H: BuildHasher,
    {
        self.apply_slices(|id| replacements.get(id).map(|bytes| bytes.as_ref()))
    }

    /// Substitute each anchor with an anchor-free tree, rendered once.
    pub fn apply_literal_nodes<F>(&self, mut source: F) -> Spliced<'_>
    where
        F: FnMut(&Id) -> Option<Node<Never>>,
    {
        self.apply_owned(|id| source(id).map(|node| render_literal(&node)))
    }
}

impl<Id: Clone, S: AsRef<[u8]>> FrozenTemplate<Id, S> {
    /// Substitute each anchor with a tree that may contain further anchors.
    ///
    /// Each replacement is frozen and resolved with the same `source` before
    /// it is spliced in, to any depth. `source` must not lead back to an anchor
    /// it is already expanding, or this recurses until the stack runs out; use
    /// [`try_apply_nodes`](Self::try_apply_nodes) when that is not guaranteed.
    pub fn apply_nodes<F>(&self, mut source: F) -> Spliced<'_>
    where
        F: FnMut(&Id) -> Option<Node<Id>>,
    {
        self.expand_nodes(&mut source)
    }

    fn expand_nodes<F>(&self, source: &mut F) -> Spliced<'_>
    where
        F: FnMut(&Id) -> Option<Node<Id>>,
    {
        unwrap_infallible(self.splice(|id| {
            let Some(node) = source(id) else {
                return Ok::<_, Infallible>(None);
            };
            let nested = FrozenTemplate::freeze(&node);
            Ok(Some(detach(nested.expand_nodes(source))))
        }))
    }

    /// Like [`apply_nodes`](Self::apply_nodes), but fails once replacements
    /// nest more than `limit` levels deep.
    pub fn try_apply_nodes<F>(
        &self,
        limit: usize,
        mut source: F,
    ) -> Result<Spliced<'_>, SpliceError<Infallible>>
    where
        F: FnMut(&Id) -> Option<Node<Id>>,
    {
        self.try_apply_nodes_with(limit, |id| Ok(source(id)))
    }

    /// Depth-limited recursive substitution with a fallible `source`.
    pub fn try_apply_nodes_with<E, F>(
        &self,
        limit: usize,
        mut source: F,
    ) -> Result<Spliced<'_>, SpliceError<E>>
    where
        F: FnMut(&Id) -> Result<Option<Node<Id>>, E>,
    {
        self.expand_nodes_guarded(&mut source, 0, limit)
    }

    fn expand_nodes_guarded<E, F>(
        &self,
        source: &mut F,
        depth: usize,
        limit: usize,
    ) -> Result<Spliced<'_>, SpliceError<E>>
    where
        F: FnMut(&Id) -> Result<Option<Node<Id>>, E>,
    {
        self.splice(|id| {
            let Some(node) = source(id).map_err(SpliceError::Source)? else {
                return Ok(None);
            };
            if depth >= limit {
                return Err(SpliceError::DepthExceeded { limit });
            }
            trace!(depth, "expanding nested replacement");
            let nested = FrozenTemplate::freeze(&node);
            Ok(Some(detach(nested.expand_nodes_guarded(
                source,
                depth + 1,
                limit,
            )?)))
        })
    }
}

/// Take the segments of a nested template's output so they outlive it.
///
/// Segments borrowed from the nested literals are copied once; owned segments
/// from deeper levels are moved, not copied again.
fn detach<'b>(spliced: Spliced<'_>) -> Vec<Cow<'b, [u8]>> {
    spliced
        .into_iter()
        .map(|segment| Cow::Owned(segment.into_owned()))
        .collect()
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Anchor;

    fn template() -> FrozenTemplate<&'static str> {
        FrozenTemplate::freeze(&Node::container(
            "g",
            [Node::anchor("a"), Node::void("r"), Node::anchor("b")],
        ))
    }

    #[test]
    fn absent_anchors_merge_literal_runs() {
        let template = template();
        let spliced = template.apply_slices(|_| None);
        assert_eq!(spliced.segments().len(), 1);
        assert_eq!(spliced.to_vec(), template.literals());
    }

    #[test]
    fn present_anchor_splits_literals() {
        let template = template();
        let spliced = template.apply_slices(|id| (*id == "b").then_some(&b"<x/>"[..]));
        let parts: Vec<&[u8]> = spliced.iter().collect();
        assert_eq!(parts, [&b"<g><r/>"[..], &b"<x/>"[..], &b"</g>"[..]]);
    }

    #[test]
    fn multi_fragment_replacement_keeps_order() {
        let template = template();
        let spliced = template.apply(|id| match *id {
            "a" => Some(vec![&b"1"[..], &b"2"[..]]),
            _ => None,
        });
        let parts: Vec<&[u8]> = spliced.iter().collect();
        assert_eq!(parts, [&b"<g>"[..], &b"1"[..], &b"2"[..], &b"<r/></g>"[..]]);
    }

    #[test]
    fn anchor_at_start_emits_no_empty_literal() {
        let leading: FrozenTemplate<u8> =
            FrozenTemplate::from_parts(b"<g>x</g>".to_vec(), vec![Anchor { id: 0, index: 0 }])
                .unwrap();
        let spliced = leading.apply_slices(|_| Some(&b"<?pi?>"[..]));
        let parts: Vec<&[u8]> = spliced.iter().collect();
        assert_eq!(parts, [&b"<?pi?>"[..], &b"<g>x</g>"[..]]);
    }

    #[test]
    fn equality_ignores_segment_boundaries() {
        let split = Spliced {
            segments: vec![Cow::Borrowed(&b"<g>"[..]), Cow::Owned(b"x</g>".to_vec())],
        };
        let whole = Spliced {
            segments: vec![Cow::Borrowed(&b"<g>x</g>"[..])],
        };
        let other = Spliced {
            segments: vec![Cow::Borrowed(&b"<g>y</g>"[..])],
        };
        assert_eq!(split, whole);
        assert_ne!(split, other);
        assert_eq!(Spliced::default(), Spliced { segments: vec![Cow::Borrowed(&b""[..])] });
    }

    #[test]
    fn into_owned_detaches() {
        let owned = {
            let template = template();
            template.apply_owned(|id| Some(id.as_bytes().to_vec())).into_owned()
        };
        assert_eq!(owned.to_vec(), b"<g>a<r/>b</g>");
    }

    #[test]
    fn write_to_streams_all_segments() {
        let template = template();
        let spliced = template.apply_owned(|_| Some(b"-".to_vec()));
        let mut out = Vec::new();
        spliced.write_to(&mut out).unwrap();
        assert_eq!(out, spliced.to_vec());
        assert_eq!(spliced.len(), out.len());
    }
}
