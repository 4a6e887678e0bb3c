//! 错误类型定义
//!
//! 警告（重名顶点、重复边、权重更新）不属于错误，见 [`crate::graph::AddEdgeOutcome`]。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("图中有 {count} 个名为 '{name}' 的顶点, 请使用 [{name}, order] 形式引用")]
    AmbiguousName { name: String, count: usize },

    #[error("未找到: {0}")]
    NotFound(String),

    #[error("无效的顶点引用: {0}")]
    InvalidReference(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// 是否为名称歧义错误
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Error::AmbiguousName { .. })
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
