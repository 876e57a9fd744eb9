use crate::{Error, LinkGraph, RankDistribution, Result};
use rand::{distr::weighted::WeightedIndex, prelude::*};

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&mut self) -> Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &RankDistribution;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;
}

/// A discrete distribution whose sampling table is built once and reused
/// for every draw.
#[derive(Debug, Clone)]
pub struct Weighted {
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl Weighted {
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        let index = WeightedIndex::<f64>::new(&weights)
            .map_err(|e| Error::invalid(format!("weights {weights:?}: {e}")))?;
        Ok(Self { weights, index })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Draws one item from a discrete probability distribution.
///
/// This is the only source of randomness the sampling estimator uses, so a
/// seeded generator or a scripted sequence can stand in for it.
pub trait WeightedChoice {
    /// Returns an index into `weights`, picked with probability proportional
    /// to its weight.
    fn choose_weighted(&mut self, weights: &[f64]) -> Result<usize>;

    /// Same as [`WeightedChoice::choose_weighted`] on a prepared distribution.
    fn choose_prepared(&mut self, dist: &Weighted) -> Result<usize> {
        self.choose_weighted(dist.weights())
    }
}

impl<R: Rng + ?Sized> WeightedChoice for R {
    fn choose_weighted(&mut self, weights: &[f64]) -> Result<usize> {
        let dist = Weighted::new(weights.to_vec())?;
        self.choose_prepared(&dist)
    }

    fn choose_prepared(&mut self, dist: &Weighted) -> Result<usize> {
        Ok(dist.index.sample(self))
    }
}
