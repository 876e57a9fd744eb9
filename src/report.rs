//! Rendering both estimates for display.

use crate::page_rank::{iterated, sampled, PageRankResult};
use crate::RankDistribution;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub damping: f64,
    pub samples: usize,
    pub iterations: usize,
    pub sampling: RankDistribution,
    pub iteration: RankDistribution,
}

impl Report {
    pub fn new(damping: f64, sampled: &sampled::Result, iterated: &iterated::Result) -> Self {
        Self {
            damping,
            samples: sampled.samples,
            iterations: iterated.iterations,
            sampling: sampled.page_rank().clone(),
            iteration: iterated.page_rank().clone(),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PageRank Results from Sampling (n = {})", self.samples)?;
        write_ranks(f, &self.sampling)?;
        writeln!(f, "PageRank Results from Iteration")?;
        write_ranks(f, &self.iteration)
    }
}

fn write_ranks(f: &mut fmt::Formatter<'_>, ranks: &RankDistribution) -> fmt::Result {
    for (page, p) in ranks.iter() {
        writeln!(f, "  {page}: {p:.4}")?;
    }
    Ok(())
}
