/// A graph vertex.
///
/// `T` is a handle to the element the vertex stands for (an id, a path, a
/// shared reference). The graph never interprets it; it is kept so callers
/// can map a correspondence back to their own elements. The name seeds the
/// textual similarity and may be changed after insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex<T> {
    represented: Option<T>,
    name: String,
}

impl<T> Vertex<T> {
    pub(crate) const fn new(represented: Option<T>, name: String) -> Self {
        Self { represented, name }
    }

    /// The represented element, if any.
    #[must_use]
    pub const fn represented(&self) -> Option<&T> {
        self.represented.as_ref()
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the display name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}
