//! The random surfer's next-hop distribution.
//!
//! With probability `damping` the surfer follows one of the current page's
//! links, chosen uniformly; otherwise it jumps to any page of the corpus,
//! chosen uniformly. A page without links is treated as linking to every
//! page, so it cannot trap the surfer.

use super::Weighted;
use crate::error::check_damping;
use crate::*;
use algograph::graph::VertexId;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub(crate) struct Transition {
    targets: Vec<VertexId>,
    dist: Weighted,
}

impl Transition {
    /// `from` must be a vertex of `graph` and `damping` must already be
    /// validated.
    pub(crate) fn new(graph: &LinkGraph, from: VertexId, damping: f64) -> Result<Self> {
        let n = graph.page_count() as f64;
        let links: HashSet<_, ahash::RandomState> = graph.outbound(from).collect();
        let jump = (1.0 - damping) / n;
        let follow = if links.is_empty() {
            damping / n
        } else {
            damping / links.len() as f64
        };
        let targets: Vec<_> = graph.vertices().collect();
        let weights = targets
            .iter()
            .map(|v| {
                if links.is_empty() || links.contains(v) {
                    jump + follow
                } else {
                    jump
                }
            })
            .collect();
        let dist = Weighted::new(weights)?;
        Ok(Self { targets, dist })
    }

    pub(crate) fn dist(&self) -> &Weighted {
        &self.dist
    }

    pub(crate) fn target(&self, idx: usize) -> Option<VertexId> {
        self.targets.get(idx).copied()
    }

    fn named(&self, graph: &LinkGraph) -> TransitionDistribution {
        self.targets
            .iter()
            .zip(self.dist.weights().iter())
            .map(|(v, w)| (graph.name(*v).to_string(), *w))
            .collect()
    }
}

/// Probability of each page being the surfer's next hop from `page`.
///
/// Fails with [`Error::InvalidArgument`] when `page` is not in `graph` or
/// `damping` is outside `(0, 1)`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<TransitionDistribution> {
    check_damping(damping)?;
    let from = graph
        .vertex(page)
        .ok_or_else(|| Error::invalid(format!("unknown page {page:?}")))?;
    Ok(Transition::new(graph, from, damping)?.named(graph))
}
