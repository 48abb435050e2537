use super::*;
use crate::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// Random-walk estimate: the share of a long walk spent on each page.
pub struct SampledPageRank<'a> {
    graph: &'a LinkGraph,
    model: TransitionModel<'a>,
    samples: usize,
    seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: RankVector,
    pub visits: BTreeMap<Page, usize>,
    pub samples: usize,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> crate::Result<Self> {
        config::check_samples(config.samples)?;
        let model = TransitionModel::new(g, config.damping)?;
        Ok(Self {
            graph: g,
            model,
            samples: config.samples,
            seed: config.seed,
        })
    }

    /// Walks with the caller's random source; `calc` seeds its own.
    #[instrument(skip_all, fields(pages = self.graph.len(), samples = self.samples))]
    pub fn calc_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> self::Result {
        let vertices = self.graph.vertices();
        let mut visits: VertexMap<usize> = HashMap::with_hasher(ahash::RandomState::new());
        let mut cur = vertices[rng.random_range(0..vertices.len())];
        for step in 0..self.samples {
            *visits.entry(cur).or_insert(0) += 1;
            if step + 1 < self.samples {
                cur = self.model.distribution(cur).sample(rng);
            }
        }
        debug!(distinct = visits.len(), "walk finished");

        let n = self.samples as f64;
        let page_rank: VertexMap<f64> = vertices
            .iter()
            .map(|v| (*v, visits.get(v).copied().unwrap_or(0) as f64 / n))
            .collect();
        let visits = vertices
            .iter()
            .map(|v| {
                let count = visits.get(v).copied().unwrap_or(0);
                (self.graph.page(*v).to_owned(), count)
            })
            .collect();
        self::Result {
            page_rank: RankVector::from_vertices(self.graph, &page_rank),
            visits,
            samples: self.samples,
        }
    }
}

impl PageRank for SampledPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> crate::Result<Self::Result> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(self.calc_with_rng(&mut rng))
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &RankVector {
        &self.page_rank
    }
}

/// Random-walk PageRank with `sample_count` visits and an entropy-seeded walk.
pub fn sample_rank(graph: &LinkGraph, damping: f64, sample_count: usize) -> crate::Result<RankVector> {
    let cfg = Config {
        damping,
        samples: sample_count,
        ..Config::default()
    };
    let res = SampledPageRank::new(graph, &cfg)?.calc()?;
    Ok(res.page_rank)
}
