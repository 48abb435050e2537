use crate::{config::check_damping, Error, GraphDefect, LinkGraph, Result};
use algograph::graph::VertexId;
use rand::Rng;

/// Where a random surfer goes next from one page.
///
/// A dead end restarts uniformly. Otherwise every page receives the teleport
/// share `(1 - damping) / N` and each outbound link additionally receives
/// `damping / out_degree`.
#[derive(Debug, Clone, Copy)]
pub struct TransitionModel<'a> {
    graph: &'a LinkGraph,
    damping: f64,
}

/// Probability of each page being visited next, in lexicographic page order.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<(VertexId, f64)>,
}

impl<'a> TransitionModel<'a> {
    pub fn new(graph: &'a LinkGraph, damping: f64) -> Result<Self> {
        check_damping(damping)?;
        if graph.is_empty() {
            return Err(GraphDefect::Empty.into());
        }
        Ok(Self { graph, damping })
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn distribution(&self, from: VertexId) -> Distribution {
        let vertices = self.graph.vertices();
        let n = vertices.len() as f64;
        let out_degree = self.graph.out_degree(from);
        if out_degree == 0 {
            let unit = 1.0 / n;
            return Distribution {
                probs: vertices.iter().map(|v| (*v, unit)).collect(),
            };
        }

        let teleport = (1.0 - self.damping) / n;
        let link = self.damping / out_degree as f64;
        let mut probs: Vec<_> = vertices.iter().map(|v| (*v, teleport)).collect();
        for sink in self.graph.successors(from) {
            probs[self.graph.position(sink)].1 += link;
        }
        Distribution { probs }
    }
}

/// Next-page distribution from `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution> {
    let model = TransitionModel::new(graph, damping)?;
    let from = graph
        .vertex(page)
        .ok_or_else(|| Error::UnknownPage(page.to_owned()))?;
    Ok(model.distribution(from))
}

impl Distribution {
    /// Zero for vertices outside the graph.
    pub fn probability(&self, v: VertexId) -> f64 {
        self.probs
            .iter()
            .find(|(u, _)| *u == v)
            .map_or(0.0, |(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.probs.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.probs.iter().map(|(_, p)| p).sum()
    }

    /// Inverse-transform draw over the cumulative distribution.
    ///
    /// Zero-weight vertices are never chosen. Rounding that leaves the uniform
    /// draw past the last cumulative bound falls back to the last positive
    /// entry.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> VertexId {
        let x = rng.random::<f64>() * self.total();
        let mut acc = 0.0;
        let mut chosen = self.probs[0].0;
        for (v, p) in self.probs.iter() {
            if *p <= 0.0 {
                continue;
            }
            acc += p;
            chosen = *v;
            if x < acc {
                break;
            }
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_rank::RandomGraph;
    use quickcheck_macros::quickcheck;
    use rand::{rngs::StdRng, SeedableRng};

    fn abc() -> LinkGraph {
        LinkGraph::new([("A", vec!["B"]), ("B", vec!["A", "C"]), ("C", vec!["A"])]).unwrap()
    }

    fn prob(g: &LinkGraph, d: &Distribution, page: &str) -> f64 {
        d.probability(g.vertex(page).unwrap())
    }

    #[test]
    fn follows_links_and_teleports() {
        let g = abc();
        let d = transition(&g, "B", 0.85).unwrap();
        let teleport = 0.15 / 3.0;
        assert!((prob(&g, &d, "A") - (teleport + 0.425)).abs() < 1e-12);
        assert!((prob(&g, &d, "B") - teleport).abs() < 1e-12);
        assert!((prob(&g, &d, "C") - (teleport + 0.425)).abs() < 1e-12);
        assert!((d.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn link_shares_land_on_targets() {
        let g = LinkGraph::new([
            ("q", vec!["a", "z"]),
            ("z", vec!["m"]),
            ("m", vec![]),
            ("a", vec!["q", "m", "z"]),
        ])
        .unwrap();
        let d = transition(&g, "a", 0.9).unwrap();
        let teleport = 0.1 / 4.0;
        assert!((prob(&g, &d, "a") - teleport).abs() < 1e-12);
        for page in ["m", "q", "z"] {
            assert!((prob(&g, &d, page) - (teleport + 0.3)).abs() < 1e-12, "{page}");
        }
        let d = transition(&g, "z", 0.9).unwrap();
        assert!((prob(&g, &d, "m") - (teleport + 0.9)).abs() < 1e-12);
        assert!((prob(&g, &d, "q") - teleport).abs() < 1e-12);
    }

    #[test]
    fn dead_end_is_exactly_uniform() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec![]), ("C", vec![]), ("D", vec!["A"])])
            .unwrap();
        for damping in [0.0, 0.5, 0.85, 1.0] {
            let d = transition(&g, "B", damping).unwrap();
            assert_eq!(d.len(), 4);
            d.iter().for_each(|(_, p)| assert_eq!(p, 0.25));
        }
    }

    #[test]
    fn full_damping_zeroes_non_neighbors() {
        let g = abc();
        let d = transition(&g, "A", 1.0).unwrap();
        assert_eq!(prob(&g, &d, "B"), 1.0);
        assert_eq!(prob(&g, &d, "A"), 0.0);
        assert_eq!(prob(&g, &d, "C"), 0.0);

        let mut rng = StdRng::seed_from_u64(3407);
        let b = g.vertex("B").unwrap();
        for _ in 0..100 {
            assert_eq!(d.sample(&mut rng), b);
        }
    }

    #[test]
    fn order_is_lexicographic() {
        let g = abc();
        let d = transition(&g, "A", 0.85).unwrap();
        let pages: Vec<_> = d.iter().map(|(v, _)| g.page(v)).collect();
        assert_eq!(pages, ["A", "B", "C"]);
    }

    #[test]
    fn rejects_bad_input() {
        let g = abc();
        assert!(matches!(
            transition(&g, "Z", 0.85),
            Err(Error::UnknownPage(ref p)) if p == "Z"
        ));
        assert!(matches!(
            transition(&g, "A", 1.5),
            Err(Error::InvalidParameter { name: "damping", .. })
        ));
        assert!(matches!(
            transition(&g, "A", -0.01),
            Err(Error::InvalidParameter { name: "damping", .. })
        ));
    }

    #[test]
    fn sampling_tracks_weights() {
        let g = abc();
        let d = transition(&g, "B", 0.85).unwrap();
        let mut rng = StdRng::seed_from_u64(3407);
        const N: usize = 100_000;
        let b = g.vertex("B").unwrap();
        let hits = (0..N).filter(|_| d.sample(&mut rng) == b).count();
        let freq = hits as f64 / N as f64;
        assert!((freq - prob(&g, &d, "B")).abs() < 0.01, "freq={freq}");
    }

    #[quickcheck]
    fn always_a_distribution(g: RandomGraph) {
        let g = &g.graph;
        for damping in [0.0, 0.3, 0.85, 1.0] {
            let model = TransitionModel::new(g, damping).unwrap();
            for v in g.vertices() {
                let d = model.distribution(*v);
                assert_eq!(d.len(), g.len());
                assert!((d.total() - 1.0).abs() < 1e-9, "total={}", d.total());
                if damping < 1.0 {
                    d.iter().for_each(|(_, p)| assert!(p > 0.0));
                }
            }
        }
    }
}
