use super::*;
use crate::common::{named, norm_inf, total, vertex_map, VertexMap};
use crate::error::check_damping;
use crate::*;
use algograph::graph::VertexId;
use tracing::{debug, trace};

/// Solves the PageRank recurrence by repeated simultaneous updates, starting
/// from the uniform distribution.
pub struct IteratedPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    threshold: f64,
    max_iterations: usize,
    degrees: VertexMap<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// A pass converges when no page moves by more than this.
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            threshold: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankDistribution,
    /// Per-page change made by the last pass, before normalization.
    pub delta: RankDistribution,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        check_damping(config.damping)?;
        let threshold = config.threshold;
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(Error::invalid(format!(
                "threshold={threshold}, expected a positive number"
            )));
        }
        if config.max_iterations == 0 {
            return Err(Error::invalid("max_iterations must be at least 1"));
        }
        if g.is_empty() {
            return Err(Error::invalid("the corpus has no pages"));
        }
        let degrees = g.vertices().map(|u| (u, g.out_degree(u))).collect();
        Ok(Self {
            graph: g,
            damping: config.damping,
            threshold,
            max_iterations: config.max_iterations,
            degrees,
        })
    }

    /// One simultaneous update of every page from `p` into `r`.
    ///
    /// A page without links spreads its rank over all `n` pages, itself
    /// included, so its share is folded into a single term added everywhere.
    fn pass(&self, p: &VertexMap<f64>, r: &mut VertexMap<f64>) {
        let g = self.graph;
        let n = g.page_count() as f64;
        let damping = self.damping;
        let degree = |u: VertexId| self.degrees.get(&u).copied().unwrap_or_default();
        let rank = |u: VertexId| p.get(&u).copied().unwrap_or_default();

        let dangling: f64 = g
            .vertices()
            .filter(|u| degree(*u) == 0)
            .map(|u| rank(u) / n)
            .sum();
        for v in g.vertices() {
            let linked: f64 = g.inbound(v).map(|u| rank(u) / degree(u) as f64).sum();
            r.insert(v, (1.0 - damping) / n + damping * (linked + dangling));
        }
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    fn calc(&mut self) -> crate::Result<Self::Result> {
        let g = self.graph;
        let n = g.page_count() as f64;
        let mut p = vertex_map(g, 1.0 / n);
        let mut r = vertex_map(g, 0.0);
        let mut delta = vertex_map(g, 0.0);
        let mut max_delta = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            self.pass(&p, &mut r);

            for v in g.vertices() {
                let a = p.get(&v).copied().unwrap_or_default();
                let b = r.get(&v).copied().unwrap_or_default();
                delta.insert(v, b - a);
            }
            max_delta = norm_inf(&delta);
            trace!(iteration, max_delta, "pass");

            std::mem::swap(&mut p, &mut r);
            if max_delta <= self.threshold {
                let sum = total(g, &p);
                for x in p.values_mut() {
                    *x /= sum;
                }
                debug!(iterations = iteration, max_delta, "converged");
                return Ok(Self::Result {
                    page_rank: named(g, &p),
                    delta: named(g, &delta),
                    iterations: iteration,
                });
            }
        }
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
            max_delta,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &RankDistribution {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a> {
    graph: &'a LinkGraph,
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "after {} passes", self.result.iterations)?;
        for page in self.graph.pages() {
            let p = self.result.page_rank.get(page).copied().unwrap_or_default();
            let d = self.result.delta.get(page).copied().unwrap_or_default();
            writeln!(f, "{page}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
