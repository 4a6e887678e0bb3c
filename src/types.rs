//! 通用类型定义
//!
//! 顶点引用、顶点标签、边描述

use crate::error::Error;
use crate::graph::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 边权重
///
/// 最短路径计算要求权重非负，图本身不做校验。
pub type Weight = f64;

/// 未指定权重时使用的默认值
pub const DEFAULT_WEIGHT: Weight = 1.0;

/// 顶点引用
///
/// 名称不唯一时，`Plain` 引用会失败，需要改用 `Ordered(name, order)`，
/// 其中 `order` 是该顶点在同名顶点中的创建序号（从 0 开始）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexRef {
    /// 仅按名称引用
    Plain(String),
    /// 按 (名称, 同名序号) 引用
    Ordered(String, usize),
    /// 直接按顶点 ID 引用
    Id(VertexId),
}

impl VertexRef {
    pub fn plain(name: impl Into<String>) -> Self {
        VertexRef::Plain(name.into())
    }

    pub fn ordered(name: impl Into<String>, order: usize) -> Self {
        VertexRef::Ordered(name.into(), order)
    }

    /// 引用中的名称（ID 引用没有名称）
    pub fn name(&self) -> Option<&str> {
        match self {
            VertexRef::Plain(name) | VertexRef::Ordered(name, _) => Some(name),
            VertexRef::Id(_) => None,
        }
    }
}

impl fmt::Display for VertexRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexRef::Plain(name) => write!(f, "{}", name),
            VertexRef::Ordered(name, order) => write!(f, "[{}, {}]", name, order),
            VertexRef::Id(id) => write!(f, "#{}", id),
        }
    }
}

/// 解析文本形式的引用：`[name, order]` 为 `Ordered`，其余为 `Plain`
impl FromStr for VertexRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidReference("空的顶点名称".to_string()));
        }

        let Some(inner) = s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) else {
            return Ok(VertexRef::Plain(s.to_string()));
        };

        let (name, order) = inner
            .rsplit_once(',')
            .ok_or_else(|| Error::InvalidReference(format!("缺少序号: {}", s)))?;
        let order = order
            .trim()
            .parse::<usize>()
            .map_err(|e| Error::InvalidReference(format!("{}: {}", s, e)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidReference(format!("缺少名称: {}", s)));
        }

        Ok(VertexRef::Ordered(name.to_string(), order))
    }
}

impl From<&str> for VertexRef {
    fn from(name: &str) -> Self {
        VertexRef::Plain(name.to_string())
    }
}

impl From<String> for VertexRef {
    fn from(name: String) -> Self {
        VertexRef::Plain(name)
    }
}

impl From<&String> for VertexRef {
    fn from(name: &String) -> Self {
        VertexRef::Plain(name.clone())
    }
}

impl From<(&str, usize)> for VertexRef {
    fn from((name, order): (&str, usize)) -> Self {
        VertexRef::Ordered(name.to_string(), order)
    }
}

impl From<(String, usize)> for VertexRef {
    fn from((name, order): (String, usize)) -> Self {
        VertexRef::Ordered(name, order)
    }
}

impl From<VertexId> for VertexRef {
    fn from(id: VertexId) -> Self {
        VertexRef::Id(id)
    }
}

impl From<VertexLabel> for VertexRef {
    fn from(label: VertexLabel) -> Self {
        match label {
            VertexLabel::Plain(name) => VertexRef::Plain(name),
            VertexLabel::Ordered(name, order) => VertexRef::Ordered(name, order),
        }
    }
}

/// 顶点标签（消歧后的名称）
///
/// 名称唯一时为名称本身，否则为 `[name, order]`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexLabel {
    Plain(String),
    Ordered(String, usize),
}

impl VertexLabel {
    pub fn name(&self) -> &str {
        match self {
            VertexLabel::Plain(name) | VertexLabel::Ordered(name, _) => name,
        }
    }

    pub fn is_disambiguated(&self) -> bool {
        matches!(self, VertexLabel::Ordered(..))
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexLabel::Plain(name) => write!(f, "{}", name),
            VertexLabel::Ordered(name, order) => write!(f, "[{}, {}]", name, order),
        }
    }
}

/// 边描述 `(from, to[, weight])`，用于批量添加
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: VertexRef,
    pub to: VertexRef,
    pub weight: Weight,
}

impl EdgeSpec {
    pub fn new(from: impl Into<VertexRef>, to: impl Into<VertexRef>, weight: Weight) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

impl<A, B> From<(A, B)> for EdgeSpec
where
    A: Into<VertexRef>,
    B: Into<VertexRef>,
{
    fn from((from, to): (A, B)) -> Self {
        EdgeSpec::new(from, to, DEFAULT_WEIGHT)
    }
}

impl<A, B, W> From<(A, B, W)> for EdgeSpec
where
    A: Into<VertexRef>,
    B: Into<VertexRef>,
    W: Into<Weight>,
{
    fn from((from, to, weight): (A, B, W)) -> Self {
        EdgeSpec::new(from, to, weight.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_reference() {
        let r: VertexRef = "  alpha ".parse().unwrap();
        assert_eq!(r, VertexRef::plain("alpha"));
    }

    #[test]
    fn test_parse_ordered_reference() {
        let r: VertexRef = "[x, 1]".parse().unwrap();
        assert_eq!(r, VertexRef::ordered("x", 1));

        // 名称中可以包含逗号，序号取最后一段
        let r: VertexRef = "[a,b, 0]".parse().unwrap();
        assert_eq!(r, VertexRef::ordered("a,b", 0));
    }

    #[test]
    fn test_parse_invalid_reference() {
        assert!("".parse::<VertexRef>().is_err());
        assert!("[x]".parse::<VertexRef>().is_err());
        assert!("[x, -1]".parse::<VertexRef>().is_err());
        assert!("[, 2]".parse::<VertexRef>().is_err());
    }

    #[test]
    fn test_label_display_round_trips_through_parse() {
        let label = VertexLabel::Ordered("x".to_string(), 3);
        assert!(label.is_disambiguated());
        assert!(!VertexLabel::Plain("x".to_string()).is_disambiguated());
        assert_eq!(label.to_string(), "[x, 3]");
        let r: VertexRef = label.to_string().parse().unwrap();
        assert_eq!(r, VertexRef::from(label));
    }

    #[test]
    fn test_edge_spec_default_weight() {
        let spec = EdgeSpec::from(("a", "b"));
        assert_eq!(spec.weight, DEFAULT_WEIGHT);

        let spec = EdgeSpec::from(("a", "b", 5));
        assert_eq!(spec.weight, 5.0);
        assert_eq!(spec.to, VertexRef::plain("b"));
    }
}
