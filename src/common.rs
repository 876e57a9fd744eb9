use crate::LinkGraph;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};

/// Page name to probability, ordered by page name.
pub type RankDistribution = BTreeMap<String, f64>;

/// Next-hop probabilities from one page, ordered by page name.
pub type TransitionDistribution = BTreeMap<String, f64>;

pub(crate) type VertexMap<T> = HashMap<VertexId, T, ahash::RandomState>;

pub(crate) fn vertex_map<T>(graph: &LinkGraph, init: T) -> VertexMap<T>
where
    T: Clone,
{
    let mut res = HashMap::with_hasher(ahash::RandomState::new());
    for v in graph.vertices() {
        res.insert(v, init.clone());
    }
    res
}

/// Sum over the vertices of `graph`, always in vertex order so the result
/// does not depend on the hasher's seed.
pub(crate) fn total(graph: &LinkGraph, v: &VertexMap<f64>) -> f64 {
    graph
        .vertices()
        .map(|u| v.get(&u).copied().unwrap_or_default())
        .sum()
}

pub(crate) fn norm_inf(v: &VertexMap<f64>) -> f64 {
    v.values().fold(0.0, |acc, x| acc.max(x.abs()))
}

pub(crate) fn named(graph: &LinkGraph, v: &VertexMap<f64>) -> RankDistribution {
    graph
        .vertices()
        .map(|u| {
            let p = v.get(&u).copied().unwrap_or_default();
            (graph.name(u).to_string(), p)
        })
        .collect()
}
