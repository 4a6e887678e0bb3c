//! 图核心模块
//!
//! 定义顶点、边、ID 分配器和图的核心数据结构

mod edge;
mod export;
mod graph;
mod id;
mod vertex;

pub use edge::{Edge, EdgeId, EdgeStore};
pub use export::{ExportOptions, DEFAULT_EXPORT_FILE};
pub use graph::{AddEdgeOutcome, Graph};
pub use id::IdAllocator;
pub use vertex::{Vertex, VertexId, VertexStore};
