//! WGraph CLI 工具
//!
//! 从边列表构建图，计算最短路径并导出 DOT 文件

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wgraph::cli::{PrintMode, Printer};
use wgraph::{EdgeListImporter, Graph, VertexRef, DEFAULT_EXPORT_FILE};

#[derive(Parser, Debug)]
#[command(name = "wgraph-cli")]
#[command(about = "WGraph 命令行工具")]
struct Args {
    /// 边列表文件，每行 from,to[,weight]
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// CSV 没有表头
    #[arg(long)]
    no_headers: bool,

    /// 最短路径的源顶点，重名时写作 "[name, order]"
    #[arg(short, long)]
    source: Option<String>,

    /// DOT 输出文件，只写 `-o` 时为 graph.dot
    #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    output: Option<PathBuf>,

    /// 以 JSON 输出最短路径
    #[arg(long)]
    json: bool,

    /// 垂直显示结果
    #[arg(long)]
    vertical: bool,

    /// 日志级别（RUST_LOG 优先），日志输出到 stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    // stdout 只留给结果输出
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("WGraph v{}", wgraph::VERSION);

    let mut graph = Graph::new();
    let importer = EdgeListImporter::new().with_headers(!args.no_headers);
    let stats = match args.format.as_str() {
        "csv" => importer.import_csv(&mut graph, &args.input),
        "jsonl" | "json" => importer.import_jsonl(&mut graph, &args.input),
        other => anyhow::bail!("不支持的格式: {}", other),
    }
    .with_context(|| format!("导入 {:?} 失败", args.input))?;

    let printer = Printer::new(if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    });

    if !args.json {
        println!("{}", "WGraph - 无向带权图".bold());
        println!(
            "导入完成: {} 行, 新建 {} 条边, 更新 {} 条, {} ms",
            stats.rows(),
            stats.edges_created,
            stats.edges_updated,
            stats.duration_ms
        );
        println!("{}", printer.print_stats(&graph));
    }

    if let Some(source) = &args.source {
        let source: VertexRef = source.parse()?;
        let paths = graph
            .shortest_paths(source.clone())
            .with_context(|| format!("无法从 {} 计算最短路径", source))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&paths)?);
        } else {
            println!("{} {}", "最短路径, 源点:".green(), source);
            print!("{}", printer.print_paths(&graph, &paths));
        }
    }

    if let Some(output) = &args.output {
        graph
            .save_export(output)
            .with_context(|| format!("写入 {:?} 失败", output))?;
        if !args.json {
            println!("{} {:?}", "已导出:".green(), output);
        }
    }

    Ok(())
}
