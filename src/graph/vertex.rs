//! 顶点定义
//!
//! 顶点记录与顶点存储。名称不唯一，名称索引按创建顺序记录同名顶点。

use crate::error::{Error, Result};
use crate::graph::edge::EdgeId;
use crate::types::{VertexLabel, VertexRef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// 顶点 ID（图内唯一，从 0 开始连续分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u64);

impl VertexId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// 在稠密存储中的下标
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for VertexId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 名称（可重复）
    name: String,
    /// 在同名顶点中的序号
    order: usize,
    /// 从该顶点出发的有向边记录，按插入顺序
    incident_edges: Vec<EdgeId>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, name: String, order: usize) -> Self {
        Self {
            id,
            name,
            order,
            incident_edges: Vec::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取同名序号
    pub fn order(&self) -> usize {
        self.order
    }

    /// 获取出边记录
    pub fn incident_edges(&self) -> &[EdgeId] {
        &self.incident_edges
    }

    /// 度数（出边记录数）
    pub fn degree(&self) -> usize {
        self.incident_edges.len()
    }

    pub(crate) fn push_edge(&mut self, edge: EdgeId) {
        self.incident_edges.push(edge);
    }
}

/// 顶点存储
///
/// `vertices` 以 ID 为下标；`names` 记录名称到同名顶点 ID 列表的映射，
/// 每个 ID 只出现在一个名称下的一个位置。
#[derive(Debug, Default)]
pub struct VertexStore {
    vertices: Vec<Vertex>,
    names: IndexMap<String, SmallVec<[VertexId; 1]>>,
}

impl VertexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入顶点，返回插入后同名顶点的数量
    ///
    /// `id` 必须等于当前顶点数量（ID 连续）。
    pub fn insert(&mut self, id: VertexId, name: String) -> usize {
        debug_assert_eq!(id.index(), self.vertices.len(), "顶点 ID 必须连续");

        let group = self.names.entry(name.clone()).or_default();
        let order = group.len();
        group.push(id);
        let count = group.len();

        self.vertices.push(Vertex::new(id, name, order));
        count
    }

    /// 获取顶点
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index())
    }

    /// 获取同名顶点（按创建顺序）
    pub fn group(&self, name: &str) -> &[VertexId] {
        self.names.get(name).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    /// 解析顶点引用
    pub fn resolve(&self, vertex: &VertexRef) -> Result<VertexId> {
        match vertex {
            VertexRef::Plain(name) => match self.group(name) {
                [] => Err(Error::NotFound(format!("顶点 '{}'", name))),
                [id] => Ok(*id),
                ids => Err(Error::AmbiguousName {
                    name: name.clone(),
                    count: ids.len(),
                }),
            },
            VertexRef::Ordered(name, order) => {
                self.group(name).get(*order).copied().ok_or_else(|| {
                    Error::NotFound(format!("顶点 [{}, {}]", name, order))
                })
            }
            VertexRef::Id(id) => self
                .get(*id)
                .map(Vertex::id)
                .ok_or_else(|| Error::NotFound(format!("顶点 #{}", id))),
        }
    }

    /// 引用是否指向存在的顶点
    ///
    /// 名称引用只要存在同名顶点即为 true，不会因重名报错。
    pub fn contains(&self, vertex: &VertexRef) -> bool {
        match vertex {
            VertexRef::Plain(name) => !self.group(name).is_empty(),
            VertexRef::Ordered(name, order) => *order < self.group(name).len(),
            VertexRef::Id(id) => self.get(*id).is_some(),
        }
    }

    /// 获取顶点名称
    pub fn name_of(&self, id: VertexId) -> Option<&str> {
        self.get(id).map(Vertex::name)
    }

    /// 获取消歧后的顶点标签
    pub fn label_of(&self, id: VertexId) -> Option<VertexLabel> {
        let vertex = self.get(id)?;
        if self.group(vertex.name()).len() == 1 {
            Some(VertexLabel::Plain(vertex.name().to_string()))
        } else {
            Some(VertexLabel::Ordered(vertex.name().to_string(), vertex.order()))
        }
    }

    /// 所有顶点（按 ID 顺序）
    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// 不同名称的数量
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
