/// Identity of an element in some markup vocabulary.
///
/// Vocabularies (SVG, HTML, ...) live outside this crate. They only need to
/// say what an element is called and whether it can ever have children.
pub trait ElementKind {
    /// Tag name, written verbatim after `<`.
    fn name(&self) -> &str;

    /// Whether the element never has children and always self-closes.
    fn is_void(&self) -> bool {
        false
    }
}

/// A statically named element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    name: &'static str,
    void: bool,
}

impl Tag {
    /// An element that holds children and is closed with `</name>`.
    pub const fn content(name: &'static str) -> Self {
        Self { name, void: false }
    }

    /// An element that never holds children and renders as `<name/>`.
    pub const fn void(name: &'static str) -> Self {
        Self { name, void: true }
    }
}

impl ElementKind for Tag {
    fn name(&self) -> &str {
        self.name
    }

    fn is_void(&self) -> bool {
        self.void
    }
}

impl<K: ElementKind + ?Sized> ElementKind for &K {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_void(&self) -> bool {
        (**self).is_void()
    }
}
