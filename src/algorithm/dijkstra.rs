//! Dijkstra 单源最短路径
//!
//! 前提：所有边权重非负。负权重不做校验，结果无定义。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::types::{VertexLabel, Weight};
use indexmap::IndexMap;
use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use tracing::debug;

/// 单个顶点的最短路径信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    /// 顶点标签（重名时为 `[name, order]`）
    pub label: VertexLabel,
    /// 从源点出发的顶点 ID 序列，不可达时为空
    pub id_path: Vec<VertexId>,
    /// 路径总权重，不可达时为正无穷（JSON 中为 `null`）
    #[serde(with = "distance_or_null")]
    pub distance: Weight,
}

/// 正无穷序列化为 `null`，反序列化时 `null` 还原为正无穷
mod distance_or_null {
    use crate::types::Weight;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(distance: &Weight, serializer: S) -> Result<S::Ok, S::Error> {
        if distance.is_finite() {
            serializer.serialize_some(distance)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weight, D::Error> {
        Ok(Option::<Weight>::deserialize(deserializer)?.unwrap_or(Weight::INFINITY))
    }
}

impl PathEntry {
    fn unreachable(label: VertexLabel) -> Self {
        Self {
            label,
            id_path: Vec::new(),
            distance: Weight::INFINITY,
        }
    }

    /// 是否可达
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    /// 路径跳数
    pub fn hops(&self) -> usize {
        self.id_path.len().saturating_sub(1)
    }
}

/// 单源最短路径结果，按顶点 ID 顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths {
    source: VertexId,
    entries: IndexMap<VertexId, PathEntry>,
}

impl ShortestPaths {
    /// 源点
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 获取某个顶点的结果
    pub fn get(&self, id: VertexId) -> Option<&PathEntry> {
        self.entries.get(&id)
    }

    /// 到某个顶点的距离
    pub fn distance_to(&self, id: VertexId) -> Option<Weight> {
        self.get(id).map(|entry| entry.distance)
    }

    /// 到某个顶点的路径
    pub fn path_to(&self, id: VertexId) -> Option<&[VertexId]> {
        self.get(id).map(|entry| entry.id_path.as_slice())
    }

    /// 所有结果
    pub fn iter(&self) -> impl Iterator<Item = (&VertexId, &PathEntry)> {
        self.entries.iter()
    }

    /// 可达顶点（含源点）
    pub fn reachable(&self) -> impl Iterator<Item = (&VertexId, &PathEntry)> {
        self.entries.iter().filter(|(_, entry)| entry.is_reachable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 可排序的距离
///
/// 队列按 `Reverse((distance, id))` 出队，即距离最小者优先，距离相同时 ID 小者优先。
#[derive(Debug, Clone, Copy)]
struct Distance(Weight);

impl PartialEq for Distance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Distance {}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

type Frontier = PriorityQueue<VertexId, Reverse<(Distance, VertexId)>>;

/// 最短路径引擎
pub struct ShortestPathEngine<'a> {
    graph: &'a Graph,
}

impl<'a> ShortestPathEngine<'a> {
    /// 创建引擎
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// 从源点计算到所有顶点的最短路径
    pub fn run(&self, source: VertexId) -> Result<ShortestPaths> {
        let vertices = self.graph.vertices();
        if self.graph.vertex(source).is_none() {
            return Err(Error::NotFound(format!("源顶点 #{}", source)));
        }

        let count = vertices.len();
        let mut distance = vec![Weight::INFINITY; count];
        let mut id_path: Vec<Vec<VertexId>> = vec![Vec::new(); count];
        let mut finalized = vec![false; count];
        distance[source.index()] = 0.0;
        id_path[source.index()].push(source);

        // 初始时所有顶点都在待定集合中
        let mut frontier = Frontier::with_capacity(count);
        for vertex in vertices {
            let id = vertex.id();
            frontier.push(id, Reverse((Distance(distance[id.index()]), id)));
        }

        while let Some((current, _)) = frontier.pop() {
            let index = current.index();
            finalized[index] = true;

            // 剩余顶点均不可达
            if distance[index].is_infinite() {
                break;
            }

            for edge in self.graph.outgoing(current) {
                let next = edge.dst();
                let next_index = next.index();
                if finalized[next_index] {
                    continue;
                }

                let candidate = distance[index] + edge.weight();
                if candidate < distance[next_index] {
                    distance[next_index] = candidate;
                    let mut path = id_path[index].clone();
                    path.push(next);
                    id_path[next_index] = path;
                    frontier.change_priority(&next, Reverse((Distance(candidate), next)));
                }
            }
        }

        let mut entries = IndexMap::with_capacity(count);
        for vertex in vertices {
            let id = vertex.id();
            let label = self
                .graph
                .label(id)
                .ok_or_else(|| Error::NotFound(format!("顶点 #{}", id)))?;
            let entry = if distance[id.index()].is_finite() {
                PathEntry {
                    label,
                    id_path: std::mem::take(&mut id_path[id.index()]),
                    distance: distance[id.index()],
                }
            } else {
                PathEntry::unreachable(label)
            };
            entries.insert(id, entry);
        }

        let paths = ShortestPaths { source, entries };
        debug!(
            source = %source,
            vertices = count,
            reachable = paths.reachable().count(),
            "最短路径计算完成"
        );
        Ok(paths)
    }
}
