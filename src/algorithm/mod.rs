//! 图算法模块
//!
//! 包含 Dijkstra 单源最短路径

mod dijkstra;

pub use dijkstra::{PathEntry, ShortestPathEngine, ShortestPaths};
