use crate::{GraphDefect, Page, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An immutable directed graph of pages.
///
/// Every link target is itself a page and no page links to itself. Pages are
/// kept in lexicographic order, which is the order every query iterates in.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    vertices: BTreeMap<Page, VertexId>,
    pages: HashMap<VertexId, Page, ahash::RandomState>,
    positions: HashMap<VertexId, usize, ahash::RandomState>,
    order: Vec<VertexId>,
}

impl LinkGraph {
    /// Builds a graph, rejecting links to unknown pages and self-links.
    pub fn new<I, S, N, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<Page>,
        N: IntoIterator<Item = T>,
        T: Into<Page>,
    {
        let links = collect(links);
        for (page, neighbors) in links.iter() {
            for neighbor in neighbors.iter() {
                if neighbor == page {
                    return Err(GraphDefect::SelfLink(page.clone()).into());
                }
                if !links.contains_key(neighbor) {
                    return Err(GraphDefect::UnknownNeighbor {
                        page: page.clone(),
                        neighbor: neighbor.clone(),
                    }
                    .into());
                }
            }
        }
        Self::build(links)
    }

    /// Builds a graph the way a crawled corpus is cleaned up: links leaving the
    /// page set are dropped and self-links are removed.
    pub fn from_corpus_links<I, S, N, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<Page>,
        N: IntoIterator<Item = T>,
        T: Into<Page>,
    {
        let mut links = collect(links);
        let known: BTreeSet<Page> = links.keys().cloned().collect();
        for (page, neighbors) in links.iter_mut() {
            neighbors.retain(|n| n != page && known.contains(n));
        }
        Self::build(links)
    }

    fn build(links: BTreeMap<Page, BTreeSet<Page>>) -> Result<Self> {
        if links.is_empty() {
            return Err(GraphDefect::Empty.into());
        }
        let mut graph = directed::TreeBackedGraph::new();
        let mut vertices = BTreeMap::new();
        let mut pages = HashMap::with_hasher(ahash::RandomState::new());
        let mut positions = HashMap::with_hasher(ahash::RandomState::new());
        let mut order = Vec::with_capacity(links.len());
        for page in links.keys() {
            let v = graph.add_vertex();
            vertices.insert(page.clone(), v);
            pages.insert(v, page.clone());
            positions.insert(v, order.len());
            order.push(v);
        }
        for (page, neighbors) in links.iter() {
            let u = vertices[page];
            for neighbor in neighbors.iter() {
                graph.add_edge(u, vertices[neighbor]);
            }
        }
        Ok(Self {
            graph,
            vertices,
            pages,
            positions,
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for a constructed graph.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_size()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.vertices.contains_key(page)
    }

    pub fn vertex(&self, page: &str) -> Option<VertexId> {
        self.vertices.get(page).copied()
    }

    /// The page behind a vertex of this graph.
    ///
    /// Panics on a vertex taken from another graph.
    pub fn page(&self, v: VertexId) -> &str {
        &self.pages[&v]
    }

    /// Index of a vertex in [`Self::vertices`].
    ///
    /// Panics on a vertex taken from another graph.
    pub fn position(&self, v: VertexId) -> usize {
        self.positions[&v]
    }

    /// Pages in lexicographic order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.keys().map(|p| p.as_str())
    }

    /// Vertices in lexicographic page order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.order
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.graph.out_edges(&v).count()
    }

    pub fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&v).map(|e| e.sink)
    }

    pub fn out_links(&self, page: &str) -> Option<BTreeSet<&str>> {
        let v = self.vertex(page)?;
        Some(self.successors(v).map(|w| self.page(w)).collect())
    }

    pub fn in_links(&self, page: &str) -> Option<BTreeSet<&str>> {
        let v = self.vertex(page)?;
        Some(self.graph.in_edges(&v).map(|e| self.page(e.source)).collect())
    }
}

fn collect<I, S, N, T>(links: I) -> BTreeMap<Page, BTreeSet<Page>>
where
    I: IntoIterator<Item = (S, N)>,
    S: Into<Page>,
    N: IntoIterator<Item = T>,
    T: Into<Page>,
{
    let mut res: BTreeMap<Page, BTreeSet<Page>> = BTreeMap::new();
    for (page, neighbors) in links {
        res.entry(page.into())
            .or_default()
            .extend(neighbors.into_iter().map(Into::into));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn abc() -> LinkGraph {
        LinkGraph::new([("A", vec!["B"]), ("B", vec!["A", "C"]), ("C", vec!["A"])]).unwrap()
    }

    #[test]
    fn queries() {
        let g = abc();
        assert_eq!(g.len(), 3);
        assert!(!g.is_empty());
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.pages().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert!(g.contains("B"));
        assert!(!g.contains("D"));

        let b = g.vertex("B").unwrap();
        assert_eq!(g.page(b), "B");
        assert_eq!(g.out_degree(b), 2);
        assert_eq!(
            g.out_links("B").unwrap().into_iter().collect::<Vec<_>>(),
            ["A", "C"]
        );
        assert_eq!(
            g.in_links("A").unwrap().into_iter().collect::<Vec<_>>(),
            ["B", "C"]
        );
        assert!(g.out_links("D").is_none());
    }

    #[test]
    fn vertices_follow_page_order() {
        let g = LinkGraph::new([("z", vec!["a"]), ("a", vec![]), ("m", vec!["z"])]).unwrap();
        let names: Vec<_> = g.vertices().iter().map(|v| g.page(*v)).collect();
        assert_eq!(names, ["a", "m", "z"]);
        for (i, v) in g.vertices().iter().enumerate() {
            assert_eq!(g.position(*v), i);
        }
    }

    #[test]
    fn empty_is_rejected() {
        let err = LinkGraph::new(Vec::<(&str, Vec<&str>)>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(GraphDefect::Empty)), "{err:?}");
        let err = LinkGraph::from_corpus_links(Vec::<(&str, Vec<&str>)>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidGraph(GraphDefect::Empty)), "{err:?}");
    }

    #[test]
    fn self_link_is_rejected() {
        let err = LinkGraph::new([("A", vec!["A"])]).unwrap_err();
        assert!(
            matches!(err, Error::InvalidGraph(GraphDefect::SelfLink(ref p)) if p == "A"),
            "{err:?}"
        );
    }

    #[test]
    fn unknown_neighbor_is_rejected() {
        let err = LinkGraph::new([("A", vec!["B"])]).unwrap_err();
        assert!(
            matches!(
                err,
                Error::InvalidGraph(GraphDefect::UnknownNeighbor { ref page, ref neighbor })
                    if page == "A" && neighbor == "B"
            ),
            "{err:?}"
        );
    }

    #[test]
    fn corpus_links_are_cleaned() {
        let g = LinkGraph::from_corpus_links([
            ("1.html", vec!["1.html", "2.html", "http://elsewhere"]),
            ("2.html", vec!["missing.html"]),
        ])
        .unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(
            g.out_links("1.html").unwrap().into_iter().collect::<Vec<_>>(),
            ["2.html"]
        );
        assert!(g.out_links("2.html").unwrap().is_empty());
    }

    #[test]
    fn repeated_keys_merge() {
        let g = LinkGraph::new([("A", vec!["B"]), ("B", vec![]), ("A", vec!["C"]), ("C", vec![])])
            .unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.out_degree(g.vertex("A").unwrap()), 2);
    }
}
