use super::*;
use crate::*;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

/// Fixed-point estimate of the PageRank equations.
///
/// Rank held by a dead end flows nowhere; the final vector is renormalized
/// to sum to one instead.
pub struct IteratedPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    tolerance: f64,
    max_iterations: Option<usize>,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankVector,
    pub iterations: usize,
    /// Largest per-page change in the last pass.
    pub delta: f64,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        config::check_damping(damping)?;
        let tolerance = config.tolerance;
        config::check_tolerance(tolerance)?;
        if config.max_iterations == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if g.is_empty() {
            return Err(GraphDefect::Empty.into());
        }
        let transitions = {
            let mut transitions = BTreeMap::new();
            for u in g.vertices().iter().copied() {
                let n = g.out_degree(u);
                if n == 0 {
                    continue;
                }
                let unit = damping / (n as f64);
                for v in g.successors(u) {
                    transitions.insert((u, v), unit);
                }
            }
            transitions
        };
        Ok(Self {
            graph: g,
            damping,
            tolerance,
            max_iterations: config.max_iterations,
            transitions,
        })
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    #[instrument(skip_all, fields(pages = self.graph.len(), damping = self.damping))]
    fn calc(&self) -> crate::Result<Self::Result> {
        let n = self.graph.len() as f64;
        let teleport = (1.0 - self.damping) / n;
        let mut p: VertexMap<f64> = self
            .graph
            .vertices()
            .iter()
            .map(|v| (*v, 1.0 / n))
            .collect();
        let mut r: VertexMap<f64> = HashMap::with_hasher(ahash::RandomState::new());
        let mut iterations = 0;
        loop {
            // Every entry of `r` is rebuilt from `p` alone before the swap.
            r.clear();
            for v in self.graph.vertices() {
                r.insert(*v, teleport);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p[v0];
                if let Some(to) = r.get_mut(v1) {
                    *to += from * w;
                }
            }
            iterations += 1;

            let delta = max_abs_diff(self.graph.vertices(), |v| p[*v], |v| r[*v]);
            std::mem::swap(&mut p, &mut r);
            debug!(iterations, delta, "pass");

            if delta < self.tolerance {
                info!(iterations, "converged");
                let page_rank = self.normalize(&p)?;
                return Ok(Self::Result {
                    page_rank,
                    iterations,
                    delta,
                });
            }
            if self.max_iterations.is_some_and(|cap| iterations >= cap) {
                warn!(iterations, delta, "iteration cap reached");
                return Err(Error::NonConvergence { iterations, delta });
            }
        }
    }
}

impl IteratedPageRank<'_> {
    fn normalize(&self, p: &VertexMap<f64>) -> crate::Result<RankVector> {
        let sum = total(self.graph.vertices(), |v| p[*v]);
        if sum <= 0.0 {
            return Err(Error::ZeroMass);
        }
        let normalized: VertexMap<f64> = p.iter().map(|(v, x)| (*v, x / sum)).collect();
        Ok(RankVector::from_vertices(self.graph, &normalized))
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &RankVector {
        &self.page_rank
    }
}

/// Fixed-point PageRank without an iteration cap.
pub fn iterate_rank(graph: &LinkGraph, damping: f64, tolerance: f64) -> crate::Result<RankVector> {
    let cfg = Config {
        damping,
        tolerance,
        ..Config::default()
    };
    let res = IteratedPageRank::new(graph, &cfg)?.calc()?;
    Ok(res.page_rank)
}
