//! The directed, labeled multigraph.

mod edge;
mod vertex;

pub use edge::{Edge, Label};
pub use vertex::Vertex;

use contracts::*;

use crate::{EdgeId, GraphError, VertexId};

/// A directed multigraph over [`Vertex<T>`] with labeled edges.
///
/// Vertices and edges are stored in insertion order; every iterator this type
/// hands out follows that order, so two graphs built by the same sequence of
/// calls iterate identically.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    vertices: Vec<Vertex<T>>,
    edges: Vec<Edge>,
    /// Outgoing edge ids per vertex
    outgoing: Vec<Vec<EdgeId>>,
    /// Incoming edge ids per vertex
    incoming: Vec<Vec<EdgeId>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Adds a vertex and returns its id.
    #[debug_ensures(ret.as_usize() + 1 == self.vertices.len())]
    pub fn add_vertex(&mut self, represented: Option<T>, name: impl Into<String>) -> VertexId {
        let id = VertexId::from(self.vertices.len());
        self.vertices.push(Vertex::new(represented, name.into()));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Adds a vertex that represents no external element.
    pub fn add_named(&mut self, name: impl Into<String>) -> VertexId {
        self.add_vertex(None, name)
    }

    /// Adds a directed edge from `source` to `target`.
    ///
    /// Parallel edges and self-loops are accepted and kept distinct.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either endpoint was not
    /// created by this graph.
    #[debug_ensures(ret.is_err() || self.outgoing.iter().map(Vec::len).sum::<usize>() == self.edges.len())]
    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        label: Label,
    ) -> Result<EdgeId, GraphError> {
        self.check(source)?;
        self.check(target)?;

        let id = EdgeId::from(self.edges.len());
        self.edges.push(Edge::new(source, target, label));
        self.outgoing[source.as_usize()].push(id);
        self.incoming[target.as_usize()].push(id);
        Ok(id)
    }

    fn check(&self, vertex: VertexId) -> Result<(), GraphError> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex {
                vertex,
                len: self.vertices.len(),
            })
        }
    }

    /// True if `vertex` belongs to this graph.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        vertex.as_usize() < self.vertices.len()
    }

    /// Number of vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the graph has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges, parallel edges counted individually.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a vertex.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id.as_usize())
    }

    /// Looks up a vertex for renaming.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<T>> {
        self.vertices.get_mut(id.as_usize())
    }

    /// Looks up an edge.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_usize())
    }

    /// Vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl ExactSizeIterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::from)
    }

    /// Vertices with their ids, in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = (VertexId, &Vertex<T>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(idx, vertex)| (VertexId::from(idx), vertex))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Edges leaving `vertex`. Empty for unknown vertices.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(vertex.as_usize())
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|id| &self.edges[id.as_usize()])
    }

    /// Edges entering `vertex`. Empty for unknown vertices.
    pub fn edges_to(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming
            .get(vertex.as_usize())
            .map_or(&[][..], Vec::as_slice)
            .iter()
            .map(|id| &self.edges[id.as_usize()])
    }

    /// Number of edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing.get(vertex.as_usize()).map_or(0, Vec::len)
    }

    /// Number of edges entering `vertex`.
    #[must_use]
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.incoming.get(vertex.as_usize()).map_or(0, Vec::len)
    }

    /// Looks up the first vertex with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|vertex| vertex.name() == name)
            .map(VertexId::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_edges_and_self_loops_are_kept() {
        let mut graph: Graph<()> = Graph::new();
        let a = graph.add_named("a");
        let b = graph.add_named("b");

        graph.add_edge(a, b, Label::Default).unwrap();
        graph.add_edge(a, b, Label::Default).unwrap();
        graph.add_edge(a, b, Label::Hierarchy).unwrap();
        graph.add_edge(a, a, Label::Default).unwrap();

        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.out_degree(a), 4);
        assert_eq!(graph.in_degree(a), 1);
        assert_eq!(graph.in_degree(b), 3);
        assert_eq!(graph.edges_from(a).filter(|e| e.is_self_loop()).count(), 1);
    }

    #[test]
    fn unknown_vertex_is_rejected() {
        let mut graph: Graph<()> = Graph::new();
        let a = graph.add_named("a");
        let stray = VertexId::new(7);

        let err = graph.add_edge(a, stray, Label::Default).unwrap_err();
        assert_eq!(err, GraphError::UnknownVertex { vertex: stray, len: 1 });
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn vertices_keep_handles_and_can_be_renamed() {
        let mut graph = Graph::new();
        let id = graph.add_vertex(Some(42_u64), "Old");

        graph.vertex_mut(id).unwrap().set_name("New");

        let vertex = graph.vertex(id).unwrap();
        assert_eq!(vertex.name(), "New");
        assert_eq!(vertex.represented(), Some(&42));
        assert_eq!(graph.find_by_name("New"), Some(id));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut graph: Graph<()> = Graph::new();
        for name in ["c", "a", "b"] {
            graph.add_named(name);
        }
        let names: Vec<&str> = graph.vertices().map(|(_, v)| v.name()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
