// wgraph-cli 端到端测试
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn edge_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_json_output_is_not_mixed_with_warnings() {
    // 重复边和权重更新都会产生警告
    let input = edge_file(&["from,to,weight", "a,b,1", "b,a,1", "a,b,2", "b,c,1"]);

    let output = Command::new(env!("CARGO_BIN_EXE_wgraph-cli"))
        .arg("--input")
        .arg(input.path())
        .args(["--source", "a", "--json"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let paths: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(paths["source"], serde_json::json!(0));
    assert!(stderr.contains("WARN"));
    assert!(!stdout.contains("WARN"));
}

#[test]
fn test_bare_output_flag_writes_default_file() {
    let input = edge_file(&["a,b,5"]);
    let dir = tempfile::tempdir().unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_wgraph-cli"))
        .current_dir(dir.path())
        .arg("--input")
        .arg(input.path())
        .args(["--no-headers", "-o"])
        .status()
        .unwrap();
    assert!(status.success());

    let dot = std::fs::read_to_string(dir.path().join("graph.dot")).unwrap();
    assert!(dot.contains("\"a\" -- \"b\" [ label = \"5\" ];"));
}
