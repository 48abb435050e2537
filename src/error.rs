use crate::Page;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphDefect),

    #[error("invalid parameter `{name}`={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The iterative estimator hit its configured cap before the largest
    /// per-page change dropped below the tolerance.
    #[error("no convergence after {iterations} iterations (last delta {delta})")]
    NonConvergence { iterations: usize, delta: f64 },

    /// Every page ended with zero rank, so there is nothing to normalize.
    ///
    /// Only the iterative estimator reports this, and only at damping 1 when
    /// all rank drains into dead ends. The random walk restarts from a dead
    /// end instead, so on the same input (e.g. a lone page with no links) it
    /// still returns a ranking; this is the one input where the two
    /// estimators give different kinds of answer.
    #[error("rank mass vanished before normalization")]
    ZeroMass,

    #[error("unknown page `{0}`")]
    UnknownPage(Page),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Config(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphDefect {
    #[error("no pages")]
    Empty,
    #[error("`{page}` links to `{neighbor}` which is not a page")]
    UnknownNeighbor { page: Page, neighbor: Page },
    #[error("`{0}` links to itself")]
    SelfLink(Page),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
