use std::collections::HashMap;

use clap::Parser;
use regex::Regex;
use simflood_graph::{Graph, GraphError, Label, VertexId};
use simflood_match::{
    CoefficientKind, FilterConfig, FixpointKind, FloodingConfig, MatchConfig, ResidualNorm,
};
use thiserror::Error;

/// Similarity flooding - match the vertices of two labeled graphs
#[derive(Parser, Debug)]
#[command(name = "simflood")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Left graph as a comma separated edge list (`a->b` default edge,
    /// `a=>b` hierarchy edge, bare `a` for an unconnected vertex). Names may
    /// contain single inner hyphens, e.g. `order-service->db`
    #[arg(short = 'l', long)]
    pub left: String,

    /// Right graph, same syntax as `--left`
    #[arg(short = 'r', long)]
    pub right: String,

    /// Stop once the residual between two iterations is at most this value
    #[arg(short = 'e', long, default_value_t = FloodingConfig::default().epsilon)]
    pub epsilon: f64,

    /// Iteration cap
    #[arg(short = 'n', long, default_value_t = FloodingConfig::default().max_iterations)]
    pub max_iterations: usize,

    /// How the residual is measured
    #[arg(long, value_enum, default_value = "max-abs")]
    pub residual: ResidualArg,

    /// Propagation coefficient formula
    #[arg(long, value_enum, default_value = "inverse-product")]
    pub coefficient: CoefficientArg,

    /// Fixpoint formula
    #[arg(long, value_enum, default_value = "basic")]
    pub fixpoint: FixpointArg,

    /// Pairs scoring below this value are never matched
    #[arg(short = 'm', long, default_value_t = 0.0)]
    pub min_similarity: f64,

    /// Also match name-similar vertices flooding left unmatched, if their
    /// name similarity is at least this value
    #[arg(short = 's', long)]
    pub seed_threshold: Option<f64>,
}

impl Args {
    /// Convert command-line arguments into matcher configuration
    pub fn to_config(&self) -> MatchConfig {
        MatchConfig {
            flooding: FloodingConfig::builder()
                .epsilon(self.epsilon)
                .max_iterations(self.max_iterations)
                .residual(self.residual.into())
                .coefficient(self.coefficient.into())
                .fixpoint(self.fixpoint.into())
                .build(),
            filter: FilterConfig {
                min_similarity: self.min_similarity,
                seed_threshold: self.seed_threshold,
            },
        }
    }

    /// Parses both edge lists.
    pub fn graphs(&self) -> Result<(Graph<()>, Graph<()>), ArgsError> {
        let parser = EdgeListParser::new()?;
        Ok((parser.parse(&self.left)?, parser.parse(&self.right)?))
    }
}

/// Command-line argument wrapper for ResidualNorm
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ResidualArg {
    /// Largest change of a single pair
    #[value(name = "max-abs")]
    MaxAbs,
    /// Euclidean distance of the score vectors
    #[value(name = "euclidean")]
    Euclidean,
}

impl From<ResidualArg> for ResidualNorm {
    fn from(arg: ResidualArg) -> Self {
        match arg {
            ResidualArg::MaxAbs => Self::MaxAbs,
            ResidualArg::Euclidean => Self::Euclidean,
        }
    }
}

/// Command-line argument wrapper for CoefficientKind
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CoefficientArg {
    /// 1 / (degree_a * degree_b)
    #[value(name = "inverse-product")]
    InverseProduct,
    /// 2 / (degree_a + degree_b)
    #[value(name = "inverse-average")]
    InverseAverage,
}

impl From<CoefficientArg> for CoefficientKind {
    fn from(arg: CoefficientArg) -> Self {
        match arg {
            CoefficientArg::InverseProduct => Self::InverseProduct,
            CoefficientArg::InverseAverage => Self::InverseAverage,
        }
    }
}

/// Command-line argument wrapper for FixpointKind
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FixpointArg {
    /// previous + increment
    #[value(name = "basic")]
    Basic,
    /// seed + increment
    #[value(name = "a")]
    A,
    /// flood (seed + previous), keep the increment
    #[value(name = "b")]
    B,
    /// flood (seed + previous), add seed and previous
    #[value(name = "c")]
    C,
}

impl From<FixpointArg> for FixpointKind {
    fn from(arg: FixpointArg) -> Self {
        match arg {
            FixpointArg::Basic => Self::Basic,
            FixpointArg::A => Self::A,
            FixpointArg::B => Self::B,
            FixpointArg::C => Self::C,
        }
    }
}

/// Errors while reading an edge list.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// An entry is neither `a`, `a->b` nor `a=>b`.
    #[error("Malformed edge list entry '{0}'")]
    MalformedEntry(String),
    /// The entry pattern failed to compile.
    #[error("Invalid edge list pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// An edge was rejected by the graph.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Reads `a->b, b=>c, d` style edge lists into graphs.
///
/// Vertices are created on first mention, in order of appearance, and
/// identified by name within one list.
pub struct EdgeListParser {
    entry: Regex,
}

impl EdgeListParser {
    /// Compiles the entry pattern.
    pub fn new() -> Result<Self, ArgsError> {
        Ok(Self {
            entry: Regex::new(
                r"^(?P<source>[^\s<=>-]+(?:-[^\s<=>-]+)*)(?:\s*(?P<arrow>->|=>)\s*(?P<target>[^\s<=>-]+(?:-[^\s<=>-]+)*))?$",
            )?,
        })
    }

    /// Builds a graph from one edge list.
    pub fn parse(&self, list: &str) -> Result<Graph<()>, ArgsError> {
        let mut graph = Graph::new();
        let mut by_name: HashMap<String, VertexId> = HashMap::new();

        for raw in list.split(',') {
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }
            let captures = self
                .entry
                .captures(entry)
                .ok_or_else(|| ArgsError::MalformedEntry(entry.to_string()))?;

            let source = vertex(&mut graph, &mut by_name, &captures["source"]);
            if let (Some(arrow), Some(target)) = (captures.name("arrow"), captures.name("target")) {
                let label = if arrow.as_str() == "=>" {
                    Label::Hierarchy
                } else {
                    Label::Default
                };
                let target = vertex(&mut graph, &mut by_name, target.as_str());
                graph.add_edge(source, target, label)?;
            }
        }

        Ok(graph)
    }
}

/// Looks up `name`, adding it as a new vertex on first mention.
fn vertex(graph: &mut Graph<()>, by_name: &mut HashMap<String, VertexId>, name: &str) -> VertexId {
    *by_name
        .entry(name.to_string())
        .or_insert_with(|| graph.add_named(name))
}
