#![allow(dead_code)]

use std::sync::OnceLock;

use simflood_graph::{Graph, Label, VertexId};
use simflood_match::{SimilarityMapping, VertexPair};

/// Routes `tracing` output through the test harness; `RUST_LOG` selects the level.
pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

lazy_static::lazy_static! {
    /// Model A of the flooding paper: a -l1-> a1, a -l1-> a2, a1 -l2-> a2.
    pub static ref PAPER_A: Graph<()> = graph_from(
        &["a", "a1", "a2"],
        &[(0, 1, Label::Default), (0, 2, Label::Default), (1, 2, Label::Hierarchy)],
    );
    /// Model B of the flooding paper: b -l1-> b1, b -l2-> b2, b2 -l2-> b1.
    pub static ref PAPER_B: Graph<()> = graph_from(
        &["b", "b1", "b2"],
        &[(0, 1, Label::Default), (0, 2, Label::Hierarchy), (2, 1, Label::Hierarchy)],
    );
    pub static ref CHAIN_50: Graph<()> = chain(50);
    pub static ref CYCLE_5: Graph<()> = cycle(5);
}

/// Builds a graph from vertex names and `(source, target, label)` index triples.
pub fn graph_from(names: &[&str], edges: &[(u32, u32, Label)]) -> Graph<()> {
    let mut graph = Graph::new();
    for name in names {
        graph.add_named(*name);
    }
    for &(source, target, label) in edges {
        graph
            .add_edge(VertexId::new(source), VertexId::new(target), label)
            .expect("fixture edge endpoints exist");
    }
    graph
}

/// `n0 -> n1 -> ... -> n{len-1}`
pub fn chain(len: u32) -> Graph<()> {
    let names: Vec<String> = (0..len).map(|i| format!("n{i}")).collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let edges: Vec<(u32, u32, Label)> = (1..len).map(|i| (i - 1, i, Label::Default)).collect();
    graph_from(&names, &edges)
}

/// A chain whose last vertex points back to the first.
pub fn cycle(len: u32) -> Graph<()> {
    let mut graph = chain(len);
    graph
        .add_edge(VertexId::new(len - 1), VertexId::new(0), Label::Default)
        .expect("fixture edge endpoints exist");
    graph
}

pub fn pair(a: u32, b: u32) -> VertexPair {
    VertexPair::new(VertexId::new(a), VertexId::new(b))
}

/// Every pair of `a` x `b` seeded with `score`.
pub fn uniform_seed<A, B>(a: &Graph<A>, b: &Graph<B>, score: f64) -> SimilarityMapping {
    SimilarityMapping::seeded(a, b, &|_: &str, _: &str| score)
}

/// Seed 1.0 for equally named vertices, 0 otherwise.
pub fn same_name(left: &str, right: &str) -> f64 {
    if left == right { 1.0 } else { 0.0 }
}

pub fn approx_eq(left: f64, right: f64, tolerance: f64) -> bool {
    (left - right).abs() <= tolerance
}
