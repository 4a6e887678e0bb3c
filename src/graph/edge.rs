//! 边定义
//!
//! 每条无向边存储为一对有向记录 (A→B, B→A)，两条记录权重始终相同。
//! 自环只存一条记录。

use crate::graph::id::IdAllocator;
use crate::graph::vertex::VertexId;
use crate::types::Weight;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 边 ID（有向记录的 ID）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 有向边记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 起点
    from: VertexId,
    /// 终点
    to: VertexId,
    /// 权重
    weight: Weight,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, from: VertexId, to: VertexId, weight: Weight) -> Self {
        Self {
            id,
            from,
            to,
            weight,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取起点
    pub fn src(&self) -> VertexId {
        self.from
    }

    /// 获取终点
    pub fn dst(&self) -> VertexId {
        self.to
    }

    /// 获取权重
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// 是否为自环
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// 无序端点对，用于判重
    pub fn pair(&self) -> (VertexId, VertexId) {
        unordered(self.from, self.to)
    }
}

fn unordered(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// 边存储
///
/// `edges` 以 EdgeId 为下标；`by_pair` 记录有向键 (from, to) 到记录的映射，
/// 迭代顺序即插入顺序。
#[derive(Debug, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    by_pair: IndexMap<(VertexId, VertexId), EdgeId>,
    undirected: usize,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一条无向边，返回正向和反向记录的 ID（自环没有反向记录）
    ///
    /// 调用方负责先检查 [`EdgeStore::has_edge`]。
    pub fn insert_pair(
        &mut self,
        ids: &mut IdAllocator,
        from: VertexId,
        to: VertexId,
        weight: Weight,
    ) -> (EdgeId, Option<EdgeId>) {
        debug_assert!(!self.has_edge(from, to), "边已存在");

        let forward = self.push(ids, from, to, weight);
        let reverse = if from == to {
            None
        } else {
            Some(self.push(ids, to, from, weight))
        };

        self.undirected += 1;
        (forward, reverse)
    }

    fn push(&mut self, ids: &mut IdAllocator, from: VertexId, to: VertexId, weight: Weight) -> EdgeId {
        let id = EdgeId::new(ids.next_id());
        debug_assert_eq!(id.index(), self.edges.len(), "边 ID 必须连续");
        self.edges.push(Edge::new(id, from, to, weight));
        self.by_pair.insert((from, to), id);
        id
    }

    /// 获取边
    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// 获取有向记录 from→to
    pub fn find(&self, from: VertexId, to: VertexId) -> Option<&Edge> {
        self.by_pair.get(&(from, to)).and_then(|&id| self.get(id))
    }

    /// 两点之间是否存在边（任一方向）
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.by_pair.contains_key(&(a, b)) || self.by_pair.contains_key(&(b, a))
    }

    /// 获取两点之间的权重
    pub fn weight_between(&self, a: VertexId, b: VertexId) -> Option<Weight> {
        self.find(a, b).or_else(|| self.find(b, a)).map(Edge::weight)
    }

    /// 同时更新两条有向记录的权重，返回旧权重
    pub fn set_weight(&mut self, a: VertexId, b: VertexId, weight: Weight) -> Option<Weight> {
        let mut old = None;
        for key in [(a, b), (b, a)] {
            if let Some(&id) = self.by_pair.get(&key) {
                if let Some(edge) = self.edges.get_mut(id.index()) {
                    old = Some(edge.weight);
                    edge.weight = weight;
                }
            }
        }
        old
    }

    /// 所有有向记录（按插入顺序）
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// 每条无向边取最先遇到的那条有向记录
    pub fn undirected(&self) -> Vec<&Edge> {
        let mut seen = HashSet::with_capacity(self.undirected);
        self.by_pair
            .values()
            .filter_map(|&id| self.get(id))
            .filter(|edge| seen.insert(edge.pair()))
            .collect()
    }

    /// 有向记录数
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// 无向边数
    pub fn undirected_len(&self) -> usize {
        self.undirected
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: u64) -> VertexId {
        VertexId::new(id)
    }

    #[test]
    fn test_insert_pair_creates_both_directions() {
        let mut ids = IdAllocator::new();
        let mut store = EdgeStore::new();

        let (forward, reverse) = store.insert_pair(&mut ids, v(0), v(1), 5.0);
        assert_eq!(forward, EdgeId::new(0));
        assert_eq!(reverse, Some(EdgeId::new(1)));

        let ab = store.find(v(0), v(1)).unwrap();
        let ba = store.find(v(1), v(0)).unwrap();
        assert_eq!((ab.src(), ab.dst()), (v(0), v(1)));
        assert_eq!((ba.src(), ba.dst()), (v(1), v(0)));
        assert_eq!(ab.weight(), ba.weight());

        assert_eq!(store.len(), 2);
        assert_eq!(store.undirected_len(), 1);
        assert!(store.has_edge(v(1), v(0)));
        assert!(!store.has_edge(v(0), v(2)));
    }

    #[test]
    fn test_set_weight_updates_both_records() {
        let mut ids = IdAllocator::new();
        let mut store = EdgeStore::new();
        store.insert_pair(&mut ids, v(0), v(1), 5.0);

        assert_eq!(store.set_weight(v(1), v(0), 7.0), Some(5.0));
        assert_eq!(store.find(v(0), v(1)).unwrap().weight(), 7.0);
        assert_eq!(store.find(v(1), v(0)).unwrap().weight(), 7.0);
        assert_eq!(store.weight_between(v(0), v(1)), Some(7.0));
        assert_eq!(store.set_weight(v(0), v(2), 1.0), None);
    }

    #[test]
    fn test_undirected_emits_each_pair_once() {
        let mut ids = IdAllocator::new();
        let mut store = EdgeStore::new();
        store.insert_pair(&mut ids, v(2), v(0), 1.0);
        store.insert_pair(&mut ids, v(0), v(1), 2.0);

        let pairs: Vec<(VertexId, VertexId)> = store
            .undirected()
            .iter()
            .map(|edge| (edge.src(), edge.dst()))
            .collect();
        assert_eq!(pairs, vec![(v(2), v(0)), (v(0), v(1))]);
    }

    #[test]
    fn test_self_loop_has_single_record() {
        let mut ids = IdAllocator::new();
        let mut store = EdgeStore::new();
        let (_, reverse) = store.insert_pair(&mut ids, v(3), v(3), 2.0);

        assert!(reverse.is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.undirected_len(), 1);
        assert!(store.as_slice()[0].is_loop());
        assert_eq!(store.undirected().len(), 1);
    }
}
