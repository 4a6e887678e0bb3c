//! DOT 导出
//!
//! 输出 Graphviz 可读的无向图描述，每条无向边只输出一次。

use super::graph::Graph;
use super::vertex::VertexId;
use crate::error::Result;
use crate::types::VertexLabel;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 默认导出文件名
pub const DEFAULT_EXPORT_FILE: &str = "graph.dot";

/// 导出选项
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// 图名称
    pub graph_name: String,
    /// 每行缩进
    pub indent: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            graph_name: "G".to_string(),
            indent: "   ".to_string(),
        }
    }
}

impl Graph {
    /// 导出为 DOT 文本
    ///
    /// 顶点按 ID 顺序声明，边按边索引顺序输出。未修改的图多次导出结果相同。
    pub fn export(&self) -> String {
        self.to_string()
    }

    /// 使用自定义选项导出
    pub fn export_with(&self, options: &ExportOptions) -> String {
        Dot {
            graph: self,
            options,
        }
        .to_string()
    }

    /// 将导出文本写入文件，IO 错误直接返回
    pub fn save_export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.export())?;
        debug!(path = %path.display(), "图已导出");
        Ok(())
    }

    fn write_dot<W: fmt::Write>(&self, out: &mut W, options: &ExportOptions) -> fmt::Result {
        let labels = self.labels();
        let label = |id: VertexId| labels.get(&id).map(quote).unwrap_or_default();
        let indent = &options.indent;

        writeln!(out, "graph {} {{", options.graph_name)?;
        for vertex in self.vertices() {
            writeln!(out, "{}{};", indent, label(vertex.id()))?;
        }
        for edge in self.undirected_edges() {
            writeln!(
                out,
                "{}{} -- {} [ label = \"{}\" ];",
                indent,
                label(edge.src()),
                label(edge.dst()),
                edge.weight()
            )?;
        }
        out.write_char('}')
    }
}

/// 按选项渲染的 DOT 视图
struct Dot<'a> {
    graph: &'a Graph,
    options: &'a ExportOptions,
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.graph.write_dot(f, self.options)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_dot(f, &ExportOptions::default())
    }
}

/// 加上双引号，转义内部的引号和反斜杠
fn quote(label: &VertexLabel) -> String {
    let text = label.to_string();
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
