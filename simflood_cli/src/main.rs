//! Similarity flooding CLI
//!
//! Builds two graphs from command-line edge lists, seeds every vertex pair
//! with the similarity of their names and prints the resulting one-to-one
//! correspondence.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod seed;

use clap::Parser;
use simflood_graph::{Graph, VertexId};
use simflood_match::GraphMatcher;
use tracing::info;

use args::Args;

/// Runs the matcher.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments and both edge lists
/// 3. Floods name similarity through the two graphs
/// 4. Prints the accepted pairs and how the iteration ended
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (left, right) = args.graphs()?;
    let matcher = GraphMatcher::new(args.to_config())?;

    info!(
        "Matching {} vertices / {} edges against {} vertices / {} edges",
        left.len(),
        left.edge_count(),
        right.len(),
        right.edge_count()
    );

    let matching = matcher.run(&left, &right, &seed::name_similarity)?;

    for m in &matching.correspondence {
        println!(
            "{} -> {}\t{:.4}\t{:?}",
            name_of(&left, m.pair.a),
            name_of(&right, m.pair.b),
            m.score,
            m.source
        );
    }

    println!(
        "\n{:?} after {} iterations ({} of {} x {} vertices matched)",
        matching.outcome.state,
        matching.outcome.iterations,
        matching.correspondence.len(),
        left.len(),
        right.len()
    );

    Ok(())
}

/// Display name of `id`, `?` if it is not part of `graph`.
fn name_of(graph: &Graph<()>, id: VertexId) -> &str {
    graph.vertex(id).map_or("?", |vertex| vertex.name())
}
