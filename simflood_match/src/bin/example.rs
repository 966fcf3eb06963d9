//! Runs the two-model example of the similarity flooding paper and prints
//! the flooded scores and the filtered matching.

use simflood_graph::{Graph, Label};
use simflood_match::{FloodingConfig, OrderedMatchingFilter, ResidualNorm, SimilarityFlooding};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut model_a: Graph<()> = Graph::new();
    let a = model_a.add_named("a");
    let a1 = model_a.add_named("a1");
    let a2 = model_a.add_named("a2");
    model_a.add_edge(a, a1, Label::Default)?;
    model_a.add_edge(a, a2, Label::Default)?;
    model_a.add_edge(a1, a2, Label::Hierarchy)?;

    let mut model_b: Graph<()> = Graph::new();
    let b = model_b.add_named("b");
    let b1 = model_b.add_named("b1");
    let b2 = model_b.add_named("b2");
    model_b.add_edge(b, b1, Label::Default)?;
    model_b.add_edge(b, b2, Label::Hierarchy)?;
    model_b.add_edge(b2, b1, Label::Hierarchy)?;

    let config = FloodingConfig::builder()
        .epsilon(0.075)
        .max_iterations(100)
        .residual(ResidualNorm::Euclidean)
        .build();
    let flooding = SimilarityFlooding::new(config)?;

    // every pair starts out equally similar
    let outcome = flooding.run_seeded(&model_a, &model_b, &|_: &str, _: &str| 1.0)?;

    println!(
        "{:?} after {} iterations, residuals {:?}",
        outcome.state, outcome.iterations, outcome.residuals
    );
    for (pair, score) in outcome.mapping.iter() {
        println!("{pair}\t{score:.3}");
    }

    let correspondence = OrderedMatchingFilter::default().filter(&outcome.mapping);
    println!("Matched {} pairs", correspondence.len());
    for m in &correspondence {
        println!("{}\t{:.3}", m.pair, m.score);
    }

    Ok(())
}
