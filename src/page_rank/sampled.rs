use super::{transition::Transition, *};
use crate::common::{named, vertex_map, VertexMap};
use crate::error::check_damping;
use crate::*;
use algograph::graph::VertexId;
use std::collections::BTreeMap;
use tracing::debug;

/// Estimates PageRank by following a random surfer for a fixed number of
/// steps and counting visits.
pub struct SampledPageRank<'a, C>
where
    C: WeightedChoice,
{
    graph: &'a LinkGraph,
    samples: usize,
    chooser: C,
    vertices: Vec<VertexId>,
    uniform: Weighted,
    transitions: VertexMap<Transition>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankDistribution,
    pub visits: BTreeMap<String, usize>,
    pub samples: usize,
}

impl<'a, C: WeightedChoice> SampledPageRank<'a, C> {
    pub fn new(g: &'a LinkGraph, config: &Config, chooser: C) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples < 1 {
            return Err(Error::invalid(format!(
                "samples={}, expected at least 1",
                config.samples
            )));
        }
        if g.is_empty() {
            return Err(Error::invalid("the corpus has no pages"));
        }
        let vertices: Vec<_> = g.vertices().collect();
        let uniform = Weighted::new(vec![1.0; vertices.len()])?;
        let transitions = vertices
            .iter()
            .map(|u| Ok((*u, Transition::new(g, *u, config.damping)?)))
            .collect::<crate::Result<_>>()?;
        Ok(Self {
            graph: g,
            samples: config.samples,
            chooser,
            vertices,
            uniform,
            transitions,
        })
    }

    fn step(&mut self, from: VertexId) -> crate::Result<VertexId> {
        let Some(t) = self.transitions.get(&from) else {
            return Err(Error::invalid(format!("vertex {from:?} is not in the corpus")));
        };
        let idx = self.chooser.choose_prepared(t.dist())?;
        t.target(idx)
            .ok_or_else(|| Error::invalid(format!("drawn index {idx} is out of range")))
    }

    fn start(&mut self) -> crate::Result<VertexId> {
        let idx = self.chooser.choose_prepared(&self.uniform)?;
        self.vertices
            .get(idx)
            .copied()
            .ok_or_else(|| Error::invalid(format!("drawn index {idx} is out of range")))
    }
}

impl<C: WeightedChoice> PageRank for SampledPageRank<'_, C> {
    type Result = self::Result;

    fn calc(&mut self) -> crate::Result<Self::Result> {
        let mut visits = vertex_map(self.graph, 0usize);
        let mut cur = self.start()?;
        *visits.entry(cur).or_default() += 1;
        for _ in 1..self.samples {
            cur = self.step(cur)?;
            *visits.entry(cur).or_default() += 1;
        }
        debug!(samples = self.samples, pages = self.graph.page_count(), "sampled walk");

        let n = self.samples as f64;
        let freq: VertexMap<f64> = visits.iter().map(|(v, c)| (*v, *c as f64 / n)).collect();
        let visits = self
            .graph
            .vertices()
            .map(|v| {
                let c = visits.get(&v).copied().unwrap_or_default();
                (self.graph.name(v).to_string(), c)
            })
            .collect();
        Ok(Self::Result {
            page_rank: named(self.graph, &freq),
            visits,
            samples: self.samples,
        })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &RankDistribution {
        &self.page_rank
    }

    fn debug<'a>(&'a self, _graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        ResultDebug { result: self }
    }
}

pub struct ResultDebug<'a> {
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (page, p) in self.result.page_rank.iter() {
            let c = self.result.visits.get(page).copied().unwrap_or_default();
            writeln!(f, "{page}: {p:?}, {c}/{}", self.result.samples)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_rank::tests::ArbitraryGraph;
    use quickcheck_macros::quickcheck;
    use rand::{rngs::SmallRng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn sample(g: &LinkGraph, samples: usize, seed: u64) -> self::Result {
        let cfg = Config {
            samples,
            ..Config::default()
        };
        let rng = SmallRng::seed_from_u64(seed);
        SampledPageRank::new(g, &cfg, rng).unwrap().calc().unwrap()
    }

    /// Replays a fixed list of indices instead of drawing.
    struct Scripted(std::vec::IntoIter<usize>);

    impl WeightedChoice for Scripted {
        fn choose_weighted(&mut self, weights: &[f64]) -> crate::Result<usize> {
            let idx = self.0.next().unwrap();
            assert!(idx < weights.len());
            Ok(idx)
        }
    }

    #[test]
    fn scripted_walk() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap();
        let cfg = Config {
            samples: 4,
            ..Config::default()
        };
        let chooser = Scripted(vec![0, 1, 1, 2].into_iter());
        let res = SampledPageRank::new(&g, &cfg, chooser).unwrap().calc().unwrap();
        assert_eq!(res.visits["a"], 1);
        assert_eq!(res.visits["b"], 2);
        assert_eq!(res.visits["c"], 1);
        assert_eq!(res.page_rank["b"], 0.5);
        assert_eq!(res.page_rank["a"], 0.25);
    }

    /// Always takes the heaviest target, and only accepts prepared tables.
    struct Greedy {
        draws: usize,
    }

    impl WeightedChoice for Greedy {
        fn choose_weighted(&mut self, _weights: &[f64]) -> crate::Result<usize> {
            panic!("walk should draw from prepared distributions");
        }

        fn choose_prepared(&mut self, dist: &Weighted) -> crate::Result<usize> {
            self.draws += 1;
            let w = dist.weights();
            Ok((0..w.len()).fold(0, |best, i| if w[i] > w[best] { i } else { best }))
        }
    }

    #[test]
    fn walk_draws_from_prepared_tables() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap();
        let cfg = Config {
            samples: 7,
            ..Config::default()
        };
        let mut pr = SampledPageRank::new(&g, &cfg, Greedy { draws: 0 }).unwrap();
        let res = pr.calc().unwrap();
        assert_eq!(pr.chooser.draws, 7);
        assert_eq!(res.visits["a"], 3);
        assert_eq!(res.visits["b"], 2);
        assert_eq!(res.visits["c"], 2);
    }

    #[test]
    fn two_cycle() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let res = sample(&g, 10_000, 3407);
        for p in ["a", "b"] {
            assert!((res.page_rank[p] - 0.5).abs() < 0.02, "{:?}", res.debug(&g));
        }
    }

    #[test]
    fn sink_outranks_its_linker() {
        let g = LinkGraph::new([("a", vec![]), ("b", vec!["a"])]).unwrap();
        let res = sample(&g, 10_000, 42);
        assert!(res.page_rank["a"] > res.page_rank["b"], "{:?}", res.debug(&g));
    }

    #[test]
    fn agrees_with_stationary_distribution() {
        let g = LinkGraph::new([
            ("1", vec!["2"]),
            ("2", vec!["1", "3"]),
            ("3", vec!["2", "4"]),
            ("4", vec!["2"]),
        ])
        .unwrap();
        let res = sample(&g, 100_000, 7);
        let expected = [
            ("1", 0.2198),
            ("2", 0.4294),
            ("3", 0.2198),
            ("4", 0.1311),
        ];
        for (p, e) in expected {
            let got = res.page_rank[p];
            assert!((got - e).abs() < 0.02, "{p}: {got} vs {e}");
        }
    }

    #[test]
    fn one_sample() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec![])]).unwrap();
        let res = sample(&g, 1, 11);
        let ones = res.page_rank.values().filter(|p| **p == 1.0).count();
        let zeros = res.page_rank.values().filter(|p| **p == 0.0).count();
        assert_eq!((ones, zeros), (1, 2), "{:?}", res.debug(&g));
    }

    #[test]
    fn same_seed_same_walk() {
        let g = LinkGraph::new([("a", vec!["b", "c"]), ("b", vec!["c"]), ("c", vec![])]).unwrap();
        let run = || {
            let rng = ChaCha8Rng::seed_from_u64(5);
            SampledPageRank::new(&g, &Config::default(), rng)
                .unwrap()
                .calc()
                .unwrap()
                .visits
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn rejects_bad_arguments() {
        let g = LinkGraph::new([("a", vec!["b"]), ("b", vec![])]).unwrap();
        let rng = SmallRng::seed_from_u64(0);
        let zero = Config {
            samples: 0,
            ..Config::default()
        };
        assert!(matches!(
            SampledPageRank::new(&g, &zero, rng.clone()),
            Err(Error::InvalidArgument(_))
        ));
        let damping = Config {
            damping: 1.0,
            ..Config::default()
        };
        assert!(matches!(
            SampledPageRank::new(&g, &damping, rng.clone()),
            Err(Error::InvalidArgument(_))
        ));
        let empty = LinkGraph::new(Vec::<(&str, Vec<&str>)>::new()).unwrap();
        assert!(matches!(
            SampledPageRank::new(&empty, &Config::default(), rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[quickcheck]
    fn visits_partition_samples(g: ArbitraryGraph, samples: u16, seed: u64) {
        let samples = samples as usize % 2_000 + 1;
        let res = sample(&g.graph, samples, seed);
        assert_eq!(res.visits.len(), g.graph.page_count());
        assert_eq!(res.visits.values().sum::<usize>(), samples);
        let sum: f64 = res.page_rank.values().sum();
        assert!((sum - 1.0).abs() < 1e-12, "sum={sum}");
    }
}
