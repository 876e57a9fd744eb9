mod traits;
pub use self::traits::*;
pub mod iterated;
pub mod sampled;
pub mod transition;
pub use self::transition::transition;

use crate::{LinkGraph, RankDistribution, Result};

/// Visit frequencies of a `samples`-step random surfer walk.
pub fn sample_rank<C: WeightedChoice>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    chooser: C,
) -> Result<RankDistribution> {
    let cfg = sampled::Config { damping, samples };
    let res = sampled::SampledPageRank::new(graph, &cfg, chooser)?.calc()?;
    Ok(res.page_rank)
}

/// Fixed point of the PageRank recurrence, stopping once no page moves by
/// more than `threshold` in a pass.
pub fn iterate_rank(graph: &LinkGraph, damping: f64, threshold: f64) -> Result<RankDistribution> {
    let cfg = iterated::Config {
        damping,
        threshold,
        ..iterated::Config::default()
    };
    let res = iterated::IteratedPageRank::new(graph, &cfg)?.calc()?;
    Ok(res.page_rank)
}
