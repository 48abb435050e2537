pub mod iterated;
pub mod sampled;
pub mod transition;
mod traits;

pub use self::iterated::{iterate_rank, IteratedPageRank};
pub use self::sampled::{sample_rank, SampledPageRank};
pub use self::traits::*;
pub use self::transition::{transition, Distribution, TransitionModel};

use crate::*;
use tracing::instrument;

/// Runs both estimators side by side over the same graph.
///
/// Both are validated before either starts, so a bad parameter never leaves
/// half a result behind.
#[instrument(skip_all, fields(pages = graph.len()))]
pub fn estimate_both(
    graph: &LinkGraph,
    config: &Config,
) -> crate::Result<(sampled::Result, iterated::Result)> {
    let sampler = SampledPageRank::new(graph, config)?;
    let iterator = IteratedPageRank::new(graph, config)?;
    let (sampled, iterated) = rayon::join(|| sampler.calc(), || iterator.calc());
    Ok((sampled?, iterated?))
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RandomGraph {
    pub graph: LinkGraph,
}

#[cfg(test)]
impl quickcheck::Arbitrary for RandomGraph {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;
        const N: usize = 10;

        let n = usize::arbitrary(g) % N + 1;
        let names: Vec<String> = (0..n).map(|i| format!("{i}.html")).collect();
        let mut links = Vec::with_capacity(n);
        for page in names.iter() {
            let mut out = vec![];
            for other in names.iter() {
                if other != page && bool::arbitrary(g) {
                    out.push(other.clone());
                }
            }
            links.push((page.clone(), out));
        }
        Self {
            graph: LinkGraph::new(links).unwrap(),
        }
    }
}
