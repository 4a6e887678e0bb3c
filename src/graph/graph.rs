//! 图数据结构
//!
//! 组合顶点存储、边存储和 ID 分配器，提供增量构建与查询接口。
//! 图不是线程安全的：并发使用时由调用方串行化所有修改操作。

use super::edge::{Edge, EdgeId, EdgeStore};
use super::id::IdAllocator;
use super::vertex::{Vertex, VertexId, VertexStore};
use crate::algorithm::{PathEntry, ShortestPathEngine, ShortestPaths};
use crate::error::{Error, Result};
use crate::types::{EdgeSpec, VertexLabel, VertexRef, Weight, DEFAULT_WEIGHT};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// 添加边的结果
///
/// 重复边不是错误，通过返回值和 `warn!` 日志告知调用方。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddEdgeOutcome {
    /// 新建了一条无向边
    Created,
    /// 边已存在，权重相同，未做修改
    Unchanged,
    /// 边已存在，两条有向记录的权重均已更新
    WeightUpdated { old: Weight, new: Weight },
}

impl AddEdgeOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, AddEdgeOutcome::Created)
    }
}

/// 待确定的边端点
enum Endpoint {
    Existing(VertexId),
    Create(String),
}

/// 无向带权图
#[derive(Debug, Default)]
pub struct Graph {
    /// 顶点 ID 分配器
    vertex_ids: IdAllocator,
    /// 边 ID 分配器
    edge_ids: IdAllocator,
    /// 顶点存储
    vertices: VertexStore,
    /// 边存储
    edges: EdgeStore,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// 名称已存在时仍会创建新顶点，并记录一条重名警告。
    pub fn add_vertex(&mut self, name: impl Into<String>) -> VertexId {
        let name = name.into();
        let id = VertexId::new(self.vertex_ids.next_id());
        let count = self.vertices.insert(id, name.clone());

        if count > 1 {
            warn!(
                vertex = %id,
                "图中已有 {} 个名为 '{}' 的顶点",
                count,
                name
            );
        } else {
            debug!(vertex = %id, name = %name, "添加顶点");
        }

        id
    }

    /// 批量添加顶点
    pub fn add_vertices_from_list<I, S>(&mut self, names: I) -> Vec<VertexId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(|name| self.add_vertex(name)).collect()
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// 获取所有顶点（按 ID 顺序）
    pub fn vertices(&self) -> &[Vertex] {
        self.vertices.as_slice()
    }

    /// 所有顶点名称（按 ID 顺序）
    pub fn names(&self) -> Vec<&str> {
        self.vertices.iter().map(Vertex::name).collect()
    }

    /// 所有顶点 ID（按创建顺序）
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.iter().map(Vertex::id).collect()
    }

    /// 顶点名称
    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.vertices.name_of(id)
    }

    /// 顶点的消歧标签
    pub fn label(&self, id: VertexId) -> Option<VertexLabel> {
        self.vertices.label_of(id)
    }

    /// 所有顶点 ID 到消歧标签的映射（按 ID 顺序）
    pub fn labels(&self) -> IndexMap<VertexId, VertexLabel> {
        self.vertices
            .iter()
            .filter_map(|v| self.vertices.label_of(v.id()).map(|label| (v.id(), label)))
            .collect()
    }

    /// 同名顶点 ID（按创建顺序），长度大于 1 时名称引用会产生歧义
    pub fn vertices_named(&self, name: &str) -> &[VertexId] {
        self.vertices.group(name)
    }

    /// 解析顶点引用
    pub fn resolve(&self, vertex: impl Into<VertexRef>) -> Result<VertexId> {
        self.vertices.resolve(&vertex.into())
    }

    /// 顶点是否存在
    ///
    /// 名称重复时同样返回 true，不会报歧义错误。
    pub fn contains(&self, vertex: impl Into<VertexRef>) -> bool {
        self.vertices.contains(&vertex.into())
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // ==================== 边操作 ====================

    /// 添加无向边
    ///
    /// 名称引用指向不存在的顶点时会自动创建该顶点；`[name, order]` 引用必须存在。
    /// 两个端点都解析成功之后才会修改图，任一端点失败时图保持不变。
    pub fn add_edge(
        &mut self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
        weight: Weight,
    ) -> Result<AddEdgeOutcome> {
        let from = self.plan_endpoint(from.into())?;
        let to = self.plan_endpoint(to.into())?;

        // 同一个新名称同时出现在两端时只创建一次（自环）
        let same_new_name = matches!((&from, &to), (Endpoint::Create(a), Endpoint::Create(b)) if a == b);
        let from_id = self.materialize(from);
        let to_id = if same_new_name {
            from_id
        } else {
            self.materialize(to)
        };

        if self.edges.has_edge(from_id, to_id) {
            warn!(from = %from_id, to = %to_id, "边已存在");

            let old = self.edges.weight_between(from_id, to_id).ok_or_else(|| {
                Error::NotFound(format!("边 {} -- {}", from_id, to_id))
            })?;
            if old == weight {
                return Ok(AddEdgeOutcome::Unchanged);
            }

            self.edges.set_weight(from_id, to_id, weight);
            warn!(
                from = %from_id,
                to = %to_id,
                "边的权重已更新: {} -> {}",
                old,
                weight
            );
            return Ok(AddEdgeOutcome::WeightUpdated { old, new: weight });
        }

        let (forward, reverse) =
            self.edges
                .insert_pair(&mut self.edge_ids, from_id, to_id, weight);
        self.attach(from_id, forward)?;
        if let Some(reverse) = reverse {
            self.attach(to_id, reverse)?;
        }

        debug!(from = %from_id, to = %to_id, weight, "添加边");
        Ok(AddEdgeOutcome::Created)
    }

    /// 添加默认权重（1）的无向边
    pub fn connect(
        &mut self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
    ) -> Result<AddEdgeOutcome> {
        self.add_edge(from, to, DEFAULT_WEIGHT)
    }

    /// 批量添加边，遇到第一个错误时停止（之前的边已生效）
    pub fn add_edges_from_list<I, S>(&mut self, specs: I) -> Result<Vec<AddEdgeOutcome>>
    where
        I: IntoIterator<Item = S>,
        S: Into<EdgeSpec>,
    {
        specs
            .into_iter()
            .map(|spec| {
                let spec = spec.into();
                self.add_edge(spec.from, spec.to, spec.weight)
            })
            .collect()
    }

    fn plan_endpoint(&self, vertex: VertexRef) -> Result<Endpoint> {
        match vertex {
            VertexRef::Plain(name) => match self.vertices.group(&name) {
                [] => Ok(Endpoint::Create(name)),
                [id] => Ok(Endpoint::Existing(*id)),
                ids => Err(Error::AmbiguousName {
                    count: ids.len(),
                    name,
                }),
            },
            other => self.vertices.resolve(&other).map(Endpoint::Existing),
        }
    }

    fn materialize(&mut self, endpoint: Endpoint) -> VertexId {
        match endpoint {
            Endpoint::Existing(id) => id,
            Endpoint::Create(name) => self.add_vertex(name),
        }
    }

    fn attach(&mut self, vertex: VertexId, edge: EdgeId) -> Result<()> {
        self.vertices
            .get_mut(vertex)
            .ok_or_else(|| Error::NotFound(format!("顶点 #{}", vertex)))?
            .push_edge(edge);
        Ok(())
    }

    /// 获取边（有向记录）
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// 获取所有有向边记录（每条无向边两条，自环一条）
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    /// 每条无向边一条记录，按边索引顺序
    pub fn undirected_edges(&self) -> Vec<&Edge> {
        self.edges.undirected()
    }

    /// 两个顶点之间是否有边
    pub fn has_edge(&self, a: impl Into<VertexRef>, b: impl Into<VertexRef>) -> Result<bool> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.edges.has_edge(a, b))
    }

    /// 两个顶点之间的权重
    pub fn weight_between(
        &self,
        a: impl Into<VertexRef>,
        b: impl Into<VertexRef>,
    ) -> Result<Option<Weight>> {
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;
        Ok(self.edges.weight_between(a, b))
    }

    /// 获取无向边数量
    pub fn edge_count(&self) -> usize {
        self.edges.undirected_len()
    }

    /// 获取有向记录数量
    pub fn directed_edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻居查询 ====================

    /// 从顶点出发的有向边记录，按插入顺序
    pub fn incident_edges(&self, vertex: impl Into<VertexRef>) -> Result<Vec<&Edge>> {
        let id = self.resolve(vertex)?;
        Ok(self.outgoing(id).collect())
    }

    /// 获取顶点的邻居，按出边插入顺序
    pub fn neighbors(&self, vertex: impl Into<VertexRef>) -> Result<Vec<&Vertex>> {
        let id = self.resolve(vertex)?;
        Ok(self
            .outgoing(id)
            .filter_map(|edge| self.vertices.get(edge.dst()))
            .collect())
    }

    pub(crate) fn outgoing(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices
            .get(id)
            .map(Vertex::incident_edges)
            .unwrap_or(&[])
            .iter()
            .filter_map(|&edge| self.edges.get(edge))
    }

    // ==================== 最短路径 ====================

    /// 单源最短路径（Dijkstra）
    pub fn shortest_paths(&self, source: impl Into<VertexRef>) -> Result<ShortestPaths> {
        let source = self.resolve(source)?;
        ShortestPathEngine::new(self).run(source)
    }

    /// 两点之间的最短路径
    pub fn shortest_path(
        &self,
        from: impl Into<VertexRef>,
        to: impl Into<VertexRef>,
    ) -> Result<PathEntry> {
        let to = self.resolve(to)?;
        self.shortest_paths(from)?
            .get(to)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("顶点 #{}", to)))
    }
}
