use crate::RankVector;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> crate::Result<Self::Result>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &RankVector;

    /// One `page: rank` line per page, ranks to four decimals.
    fn debug(&self) -> impl std::fmt::Debug + '_ {
        ResultDebug {
            ranks: self.page_rank(),
        }
    }
}

pub struct ResultDebug<'a> {
    ranks: &'a RankVector,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (page, rank) in self.ranks.iter() {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
