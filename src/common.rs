use crate::LinkGraph;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type Page = String;

pub(crate) type VertexMap<T> = HashMap<VertexId, T, ahash::RandomState>;

/// Sum over `keys` in the order given, so repeated runs round identically.
pub(crate) fn total<K>(keys: impl IntoIterator<Item = K>, rank: impl Fn(&K) -> f64) -> f64 {
    keys.into_iter().map(|k| rank(&k)).sum()
}

/// Largest absolute difference between two rankings over `keys`.
pub(crate) fn max_abs_diff<K>(
    keys: impl IntoIterator<Item = K>,
    a: impl Fn(&K) -> f64,
    b: impl Fn(&K) -> f64,
) -> f64 {
    keys.into_iter()
        .map(|k| (a(&k) - b(&k)).abs())
        .fold(0.0, f64::max)
}

/// Estimated importance of every page, in lexicographic page order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankVector {
    ranks: BTreeMap<Page, f64>,
}

impl RankVector {
    pub(crate) fn from_vertices(graph: &LinkGraph, v: &VertexMap<f64>) -> Self {
        graph
            .vertices()
            .iter()
            .map(|u| (graph.page(*u).to_owned(), v.get(u).copied().unwrap_or(0.0)))
            .collect()
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.ranks.get(page).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ranks.iter().map(|(p, r)| (p.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.ranks.values().sum()
    }

    /// Pages missing on one side count as 0.
    pub fn max_abs_diff(&self, other: &RankVector) -> f64 {
        let pages: BTreeSet<&str> = self
            .ranks
            .keys()
            .chain(other.ranks.keys())
            .map(|p| p.as_str())
            .collect();
        max_abs_diff(
            pages,
            |p| self.get(p).unwrap_or(0.0),
            |p| other.get(p).unwrap_or(0.0),
        )
    }

    /// The page with the highest rank; ties go to the lexicographically first.
    pub fn top(&self) -> Option<(&str, f64)> {
        self.iter()
            .fold(None, |best: Option<(&str, f64)>, (p, r)| match best {
                Some((_, b)) if b >= r => best,
                _ => Some((p, r)),
            })
    }

    pub fn into_inner(self) -> BTreeMap<Page, f64> {
        self.ranks
    }
}

impl FromIterator<(Page, f64)> for RankVector {
    fn from_iter<I: IntoIterator<Item = (Page, f64)>>(iter: I) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}
