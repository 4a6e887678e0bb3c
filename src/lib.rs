//! WGraph - 内存无向带权图
//!
//! 支持：
//! - 允许重名的顶点，通过 `[name, order]` 消歧
//! - 无向带权边（每条边存储为一对有向记录）
//! - Dijkstra 单源最短路径
//! - 导出 Graphviz DOT 文本

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{PathEntry, ShortestPathEngine, ShortestPaths};
pub use error::{Error, Result};
pub use graph::{
    AddEdgeOutcome, Edge, EdgeId, ExportOptions, Graph, IdAllocator, Vertex, VertexId,
    DEFAULT_EXPORT_FILE,
};
pub use import::{EdgeListImporter, ImportStats};
pub use types::{EdgeSpec, VertexLabel, VertexRef, Weight, DEFAULT_WEIGHT};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
