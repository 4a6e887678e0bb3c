//! 数据导入模块
//!
//! 从 CSV 或 JSON Lines 边列表批量构建图。每行一条边 `from,to[,weight]`，
//! 端点写作 `name` 或 `[name, order]`。任何一行出错都会中止导入并报告行号，
//! 出错之前的行已经生效。

use crate::error::{Error, Result};
use crate::graph::{AddEdgeOutcome, Graph};
use crate::types::{EdgeSpec, VertexRef, Weight, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub vertices_created: usize,
    pub edges_created: usize,
    pub edges_updated: usize,
    pub edges_unchanged: usize,
    pub duration_ms: u64,
}

impl ImportStats {
    fn record(&mut self, outcome: AddEdgeOutcome) {
        match outcome {
            AddEdgeOutcome::Created => self.edges_created += 1,
            AddEdgeOutcome::WeightUpdated { .. } => self.edges_updated += 1,
            AddEdgeOutcome::Unchanged => self.edges_unchanged += 1,
        }
    }

    /// 处理过的行数
    pub fn rows(&self) -> usize {
        self.edges_created + self.edges_updated + self.edges_unchanged
    }
}

/// 边记录（JSON 格式）
#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    #[serde(default = "default_weight")]
    weight: Weight,
}

fn default_weight() -> Weight {
    DEFAULT_WEIGHT
}

/// 边列表导入器
#[derive(Debug, Clone)]
pub struct EdgeListImporter {
    has_headers: bool,
    delimiter: u8,
}

impl Default for EdgeListImporter {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
        }
    }
}

impl EdgeListImporter {
    /// 创建导入器（默认有表头，逗号分隔）
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否有表头
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// 设置分隔符
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&self, graph: &mut Graph, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_csv_reader(graph, file)
    }

    /// 从任意 CSV 输入导入
    pub fn import_csv_reader<R: Read>(&self, graph: &mut Graph, reader: R) -> Result<ImportStats> {
        let start = Instant::now();
        let vertices_before = graph.vertex_count();
        let mut stats = ImportStats::default();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let fields: Vec<&str> = record.iter().collect();
            let spec = parse_row(&fields, line)?;
            stats.record(graph.add_edge(spec.from, spec.to, spec.weight)?);
        }

        stats.vertices_created = graph.vertex_count() - vertices_before;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            edges = stats.rows(),
            vertices = stats.vertices_created,
            "CSV 导入完成"
        );
        Ok(stats)
    }

    /// 从 JSON Lines 文件导入
    pub fn import_jsonl<P: AsRef<Path>>(&self, graph: &mut Graph, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        self.import_jsonl_reader(graph, BufReader::new(file))
    }

    /// 从任意 JSON Lines 输入导入，空行跳过
    pub fn import_jsonl_reader<R: BufRead>(
        &self,
        graph: &mut Graph,
        reader: R,
    ) -> Result<ImportStats> {
        let start = Instant::now();
        let vertices_before = graph.vertex_count();
        let mut stats = ImportStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: EdgeRecord = serde_json::from_str(&line).map_err(|e| {
                Error::ImportError(format!("第 {} 行: JSON 解析错误: {}", index + 1, e))
            })?;
            let spec = EdgeSpec::new(
                parse_ref(&record.from, index as u64 + 1)?,
                parse_ref(&record.to, index as u64 + 1)?,
                record.weight,
            );
            stats.record(graph.add_edge(spec.from, spec.to, spec.weight)?);
        }

        stats.vertices_created = graph.vertex_count() - vertices_before;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            edges = stats.rows(),
            vertices = stats.vertices_created,
            "JSONL 导入完成"
        );
        Ok(stats)
    }
}

/// 解析一行 `from,to[,weight]`
fn parse_row(fields: &[&str], line: u64) -> Result<EdgeSpec> {
    let (from, to, weight) = match fields {
        [from, to] => (from, to, None),
        [from, to, weight] => (from, to, Some(weight)),
        _ => {
            return Err(Error::ImportError(format!(
                "第 {} 行: 需要 2 或 3 列, 实际 {} 列",
                line,
                fields.len()
            )))
        }
    };

    let weight = match weight {
        None => DEFAULT_WEIGHT,
        Some(w) if w.is_empty() => DEFAULT_WEIGHT,
        Some(w) => w.parse::<Weight>().map_err(|_| {
            Error::ImportError(format!("第 {} 行: 无效的权重 '{}'", line, w))
        })?,
    };

    Ok(EdgeSpec::new(parse_ref(from, line)?, parse_ref(to, line)?, weight))
}

fn parse_ref(text: &str, line: u64) -> Result<VertexRef> {
    text.parse::<VertexRef>()
        .map_err(|e| Error::ImportError(format!("第 {} 行: {}", line, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_csv() {
        let mut graph = Graph::new();
        let importer = EdgeListImporter::new();

        // 创建测试 CSV
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from,to,weight").unwrap();
        writeln!(file, "a,b,1").unwrap();
        writeln!(file, "b,c,2").unwrap();
        writeln!(file, "a, c").unwrap();
        writeln!(file, "b,a,4").unwrap();
        writeln!(file, "c,b,2").unwrap();

        let stats = importer.import_csv(&mut graph, file.path()).unwrap();
        assert_eq!(stats.vertices_created, 3);
        assert_eq!(stats.edges_created, 3);
        assert_eq!(stats.edges_updated, 1);
        assert_eq!(stats.edges_unchanged, 1);
        assert_eq!(graph.weight_between("a", "c").unwrap(), Some(DEFAULT_WEIGHT));
        assert_eq!(graph.weight_between("a", "b").unwrap(), Some(4.0));
    }

    #[test]
    fn test_import_csv_with_ordered_references() {
        let mut graph = Graph::new();
        graph.add_vertices_from_list(["x", "x"]);

        let data = "\"[x, 0]\";y;3\n\"[x, 1]\";y;5\n";
        let stats = EdgeListImporter::new()
            .with_headers(false)
            .with_delimiter(b';')
            .import_csv_reader(&mut graph, data.as_bytes())
            .unwrap();

        assert_eq!(stats.edges_created, 2);
        assert_eq!(stats.vertices_created, 1);
        assert_eq!(graph.neighbors("y").unwrap().len(), 2);
    }

    #[test]
    fn test_import_csv_reports_bad_row() {
        let mut graph = Graph::new();
        let data = "from,to,weight\na,b,1\na,c,heavy\nc,d,1\n";

        let err = EdgeListImporter::new()
            .import_csv_reader(&mut graph, data.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::ImportError(ref msg) if msg.contains("heavy")));
        // 出错之前的行已经生效
        assert!(graph.has_edge("a", "b").unwrap());
        assert!(!graph.contains("d"));
    }

    #[test]
    fn test_import_csv_propagates_ambiguity() {
        let mut graph = Graph::new();
        graph.add_vertices_from_list(["x", "x"]);

        let err = EdgeListImporter::new()
            .with_headers(false)
            .import_csv_reader(&mut graph, "x,y\n".as_bytes())
            .unwrap_err();
        assert!(err.is_ambiguous());
        assert!(!graph.contains("y"));
    }

    #[test]
    fn test_import_jsonl() {
        let mut graph = Graph::new();
        let importer = EdgeListImporter::new();

        // 创建测试 JSONL
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"from":"a","to":"b","weight":2.5}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"from":"b","to":"c"}}"#).unwrap();

        let stats = importer.import_jsonl(&mut graph, file.path()).unwrap();
        assert_eq!(stats.vertices_created, 3);
        assert_eq!(stats.edges_created, 2);
        assert_eq!(graph.weight_between("b", "c").unwrap(), Some(DEFAULT_WEIGHT));
        assert_eq!(graph.shortest_path("a", "c").unwrap().distance, 3.5);
    }

    #[test]
    fn test_import_jsonl_reports_line() {
        let mut graph = Graph::new();
        let data = "{\"from\":\"a\",\"to\":\"b\"}\nnot json\n";

        let err = EdgeListImporter::new()
            .import_jsonl_reader(&mut graph, data.as_bytes())
            .unwrap_err();
        assert!(matches!(err, Error::ImportError(ref msg) if msg.contains("第 2 行")));
    }
}
