//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::ShortestPaths;
use crate::graph::Graph;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印通用结果
    pub fn print_result(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}\n{} row(s) in set\n", output, rows.len())
    }

    /// 打印最短路径结果，每个顶点一行
    pub fn print_paths(&self, graph: &Graph, paths: &ShortestPaths) -> String {
        let columns: Vec<String> = ["ID", "Vertex", "Distance", "Path"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        let rows: Vec<Vec<String>> = paths
            .iter()
            .map(|(id, entry)| {
                let path = entry
                    .id_path
                    .iter()
                    .map(|hop| {
                        graph
                            .label(*hop)
                            .map(|label| label.to_string())
                            .unwrap_or_else(|| hop.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(" -> ");
                let distance = if entry.is_reachable() {
                    entry.distance.to_string()
                } else {
                    "inf".to_string()
                };
                vec![id.to_string(), entry.label.to_string(), distance, path]
            })
            .collect();

        self.print_result(&columns, &rows)
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();

        // 设置表格格式
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        // 添加表头
        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        // 添加数据行
        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row![
            "Directed Records",
            graph.directed_edge_count().to_string()
        ]);
        table.to_string()
    }
}
