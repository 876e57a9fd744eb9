//! The immutable page graph both estimators work on.

use crate::{Error, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A closed corpus of named pages and the links between them.
///
/// Every link target is a page of the corpus. Pages are stored as vertices of a
/// directed graph, inserted in name order, so iterating vertices is
/// deterministic and matches [`LinkGraph::pages`].
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    ids: BTreeMap<String, VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
}

impl LinkGraph {
    /// Builds a graph from `(page, outbound links)` pairs.
    ///
    /// Repeated pages have their link sets merged and repeated links collapse.
    /// A link to a name that is not itself a page fails with
    /// [`Error::InvalidArgument`].
    pub fn new<P, L, S>(pages: P) -> Result<Self>
    where
        P: IntoIterator<Item = (S, L)>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut links: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, outbound) in pages {
            links
                .entry(page.into())
                .or_default()
                .extend(outbound.into_iter().map(Into::into));
        }

        let mut graph = directed::TreeBackedGraph::new();
        let mut ids = BTreeMap::new();
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        for page in links.keys() {
            let v = graph.add_vertex();
            ids.insert(page.clone(), v);
            names.insert(v, page.clone());
        }
        for (page, outbound) in links.iter() {
            let u = ids[page];
            for target in outbound.iter() {
                let Some(v) = ids.get(target) else {
                    return Err(Error::invalid(format!(
                        "page {page:?} links to {target:?}, which is not in the corpus"
                    )));
                };
                graph.add_edge(u, *v);
            }
        }
        Ok(Self { graph, ids, names })
    }

    pub fn page_count(&self) -> usize {
        self.graph.vertex_size()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_size()
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    /// Page names in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.keys().map(String::as_str)
    }

    /// Names of the pages `page` links to, or `None` for an unknown page.
    pub fn links(&self, page: &str) -> Option<BTreeSet<&str>> {
        let u = self.vertex(page)?;
        Some(self.outbound(u).map(|v| self.name(v)).collect())
    }

    pub fn contains(&self, page: &str) -> bool {
        self.ids.contains_key(page)
    }

    pub(crate) fn vertex(&self, page: &str) -> Option<VertexId> {
        self.ids.get(page).copied()
    }

    pub(crate) fn name(&self, v: VertexId) -> &str {
        self.names.get(&v).map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.graph.iter_vertices()
    }

    pub(crate) fn outbound(&self, u: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&u).map(|e| e.sink)
    }

    pub(crate) fn inbound(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.in_edges(&v).map(|e| e.source)
    }

    pub(crate) fn out_degree(&self, u: VertexId) -> usize {
        self.graph.out_edges(&u).count()
    }
}
