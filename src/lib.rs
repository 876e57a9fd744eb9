mod error;
pub use self::error::{Error, Result};
mod common;
pub use self::common::*;
mod graph;
pub use self::graph::LinkGraph;

pub mod corpus;
pub mod page_rank;
pub mod report;
