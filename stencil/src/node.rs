//! The markup tree handed to the renderer.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::element::ElementKind;
use crate::escape::escape_text;

/// An id type with no values.
///
/// A `Node<Never>` or `FrozenTemplate<Never>` provably holds no anchors, so it
/// can be rendered in one shot and never needs a substitution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Never {}

/// Attributes of an element, always iterated in ascending key order.
///
/// Keys are unique. Values are written verbatim between double quotes, so they
/// must already be escaped (see [`escape_attribute`](crate::escape::escape_attribute)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Attributes(BTreeMap<Cow<'static, str>, String>);

impl Attributes {
    /// An empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (&**k, v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<Cow<'static, str>>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<Cow<'static, str>>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<Cow<'static, str>>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// One node of a markup tree.
///
/// Children are owned by value, so a tree can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node<Id> {
    /// Pre-encoded bytes, copied verbatim.
    Bytes(Vec<u8>),

    /// Already-escaped text, copied verbatim.
    Text(String),

    /// An element without children.
    ///
    /// With `void: true` it renders self-closed (`<name/>`). With
    /// `void: false` only the open tag (`<name>`) is written and closing it is
    /// left to whatever bytes the caller places after it.
    Leaf {
        /// Tag name.
        name: Cow<'static, str>,
        /// Attributes, written in key order.
        attributes: Attributes,
        /// Whether the element self-closes.
        void: bool,
    },

    /// An element with (possibly zero) children, always explicitly closed.
    Container {
        /// Tag name.
        name: Cow<'static, str>,
        /// Attributes, written in key order.
        attributes: Attributes,
        /// Children, rendered in order.
        children: Vec<Node<Id>>,
    },

    /// A zero-byte placeholder whose position is recorded during rendering.
    Anchor(Id),
}

impl<Id> Node<Id> {
    /// Raw bytes, copied verbatim.
    pub fn bytes(raw: impl Into<Vec<u8>>) -> Self {
        Node::Bytes(raw.into())
    }

    /// Text content, escaped with [`escape_text`].
    pub fn text(raw: &str) -> Self {
        Node::Text(escape_text(raw).into_owned())
    }

    /// Text the caller has already escaped.
    pub fn escaped(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// A self-closing element with no attributes.
    pub fn void(name: impl Into<Cow<'static, str>>) -> Self {
        Node::Leaf {
            name: name.into(),
            attributes: Attributes::new(),
            void: true,
        }
    }

    /// A bare open tag with no matching close tag.
    ///
    /// The caller is responsible for writing the content and `</name>` that
    /// must follow. Use [`Node::container`] for a properly closed element.
    pub fn open(name: impl Into<Cow<'static, str>>) -> Self {
        Node::Leaf {
            name: name.into(),
            attributes: Attributes::new(),
            void: false,
        }
    }

    /// A closed element holding `children`.
    pub fn container(
        name: impl Into<Cow<'static, str>>,
        children: impl IntoIterator<Item = Node<Id>>,
    ) -> Self {
        Node::Container {
            name: name.into(),
            attributes: Attributes::new(),
            children: children.into_iter().collect(),
        }
    }

    /// A placeholder.
    pub fn anchor(id: Id) -> Self {
        Node::Anchor(id)
    }

    /// An element of the given kind: a void leaf for void kinds, an empty
    /// container otherwise.
    pub fn element<K: ElementKind>(kind: K, attributes: impl Into<Attributes>) -> Self {
        let name = Cow::Owned(kind.name().to_owned());
        let attributes = attributes.into();
        if kind.is_void() {
            Node::Leaf {
                name,
                attributes,
                void: true,
            }
        } else {
            Node::Container {
                name,
                attributes,
                children: Vec::new(),
            }
        }
    }

    /// Set an attribute. Has no effect on nodes that are not elements.
    pub fn with_attr(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        if let Some(attributes) = self.attributes_mut() {
            attributes.insert(key, value);
        }
        self
    }

    /// Append a child.
    ///
    /// An open (non-void) leaf becomes a container. Void leaves, text, bytes
    /// and anchors cannot hold children and are returned unchanged.
    pub fn with_child(self, child: Node<Id>) -> Self {
        self.with_children([child])
    }

    /// Append several children. See [`Node::with_child`].
    pub fn with_children(self, new_children: impl IntoIterator<Item = Node<Id>>) -> Self {
        match self {
            Node::Container {
                name,
                attributes,
                mut children,
            } => {
                children.extend(new_children);
                Node::Container {
                    name,
                    attributes,
                    children,
                }
            }
            Node::Leaf {
                name,
                attributes,
                void: false,
            } => Node::Container {
                name,
                attributes,
                children: new_children.into_iter().collect(),
            },
            other => other,
        }
    }

    /// Element name, if this is an element.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Leaf { name, .. } | Node::Container { name, .. } => Some(&**name),
            _ => None,
        }
    }

    /// Attributes, if this is an element.
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Mutable attributes, if this is an element.
    pub fn attributes_mut(&mut self) -> Option<&mut Attributes> {
        match self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => Some(attributes),
            _ => None,
        }
    }

    /// Children of a container; empty for every other node.
    pub fn children(&self) -> &[Node<Id>] {
        match self {
            Node::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Convert every anchor id, keeping the tree shape.
    pub fn map_ids<Id2, F>(self, mut f: F) -> Node<Id2>
    where
        F: FnMut(Id) -> Id2,
    {
        self.map_ids_with(&mut f)
    }

    fn map_ids_with<Id2, F>(self, f: &mut F) -> Node<Id2>
    where
        F: FnMut(Id) -> Id2,
    {
        match self {
            Node::Bytes(raw) => Node::Bytes(raw),
            Node::Text(text) => Node::Text(text),
            Node::Leaf {
                name,
                attributes,
                void,
            } => Node::Leaf {
                name,
                attributes,
                void,
            },
            Node::Container {
                name,
                attributes,
                children,
            } => Node::Container {
                name,
                attributes,
                children: children
                    .into_iter()
                    .map(|child| child.map_ids_with(f))
                    .collect(),
            },
            Node::Anchor(id) => Node::Anchor(f(id)),
        }
    }
}

impl Node<Never> {
    /// Use an anchor-free tree where any id type is expected.
    pub fn widen<Id>(self) -> Node<Id> {
        self.map_ids(|never| match never {})
    }
}
