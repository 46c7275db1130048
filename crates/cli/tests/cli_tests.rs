//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("newslink").unwrap()
}

const CANDIDATES: &str = r#"[
  {
    "url": "https://news.example.cn/tw/2025/06-01/1.shtml",
    "title": "国台办：坚持一个中国原则",
    "content": "国台办发言人表示，坚持一个中国原则是两岸关系和平发展的政治基础。"
  },
  {
    "url": "https://news.example.cn/cj/2025/06-01/2.shtml",
    "title": "前五月外贸数据公布",
    "content": "据海关统计，前5月外贸进出口同比增长6.3%，民营企业占比超过一半。"
  }
]"#;

fn write_candidates(dir: &TempDir) -> String {
    let path = dir.path().join("candidates.json");
    std::fs::write(&path, CANDIDATES).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_cli_file_input_writes_report() {
    let dir = TempDir::new().unwrap();
    let input = write_candidates(&dir);
    let out = dir.path().join("out");

    cmd()
        .args([input.as_str(), "--date", "2025-06-01", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("中华一家亲"));

    assert!(out.join("report_2025-06-01.json").exists());
    assert!(out.join("report_latest.json").exists());
    assert!(out.join("articles.json").exists());
}

#[test]
fn test_cli_stdin_input() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    cmd()
        .args(["-", "--date", "2025-06-01", "--output-dir"])
        .arg(&out)
        .write_stdin(CANDIDATES)
        .assert()
        .success()
        .stdout(predicate::str::contains("国台办"));
}

#[test]
fn test_cli_hot_signal_reorders() {
    let dir = TempDir::new().unwrap();
    let input = write_candidates(&dir);
    let hot = dir.path().join("hot.json");
    std::fs::write(&hot, r#"["/cj/2025/06-01/2.shtml"]"#).unwrap();
    let out = dir.path().join("out");

    let assert = cmd()
        .args([input.as_str(), "--date", "2025-06-01", "--hot"])
        .arg(&hot)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let trade = stdout.find("外贸数据").unwrap();
    let taiwan = stdout.find("国台办").unwrap();
    assert!(trade < taiwan);
}

#[test]
fn test_cli_custom_taxonomy() {
    let dir = TempDir::new().unwrap();
    let input = write_candidates(&dir);
    let taxonomy = dir.path().join("taxonomy.json");
    std::fs::write(
        &taxonomy,
        r#"{"rules":[{"keywords":["外贸"],"book_name":"测试册","chapter_title":"对外开放","base_score":95}]}"#,
    )
    .unwrap();
    let out = dir.path().join("out");

    cmd()
        .args([input.as_str(), "--date", "2025-06-01", "--taxonomy"])
        .arg(&taxonomy)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("对外开放"));
}

#[test]
fn test_cli_missing_input_fails() {
    cmd().arg("/nonexistent/candidates.json").assert().failure();
}

#[test]
fn test_cli_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "not json").unwrap();
    cmd()
        .arg(path.to_string_lossy().as_ref())
        .assert()
        .failure()
        .stderr(predicate::str::contains("candidates JSON"));
}

#[test]
fn test_cli_empty_candidate_list_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, "[]").unwrap();
    cmd().arg(path.to_string_lossy().as_ref()).assert().failure();
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("newslink"));
}
