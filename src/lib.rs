pub mod config;
pub use self::config::Config;
pub mod corpus;
pub use self::corpus::crawl;
mod error;
pub use self::error::{Error, GraphDefect, Result};
pub mod link_graph;
pub use self::link_graph::LinkGraph;
mod common;
pub use self::common::*;

pub mod page_rank;
pub use self::page_rank::{estimate_both, iterate_rank, sample_rank, transition};
