use crate::common::{release, release_index_command, run};
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/releases/tool"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release("1.1.0-beta1", "2023-03-02T10:00:00.000Z"),
            release("1.0.1", "2023-02-20T10:00:00.000Z"),
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/tool"))
        .and(query_param("limit", "2"))
        .and(query_param("after", "2023-02-20T10:00:00.000Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release("1.1.0", "2023-02-10T10:00:00.000Z"),
        ])))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_writes_sorted_index() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("out").join("index.json");

    let mut cmd = release_index_command(temp.path());
    cmd.arg("fetch")
        .arg("--url")
        .arg(format!("{}/v1/releases/tool", server.uri()))
        .arg("--output")
        .arg(&output_path)
        .arg("--page-size")
        .arg("2");

    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 releases (2 pages)"));

    let index: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    let versions: Vec<&str> = index
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["version"].as_str().unwrap())
        .collect();
    assert_eq!(versions, vec!["1.1.0", "1.1.0-beta1", "1.0.1"]);
    assert_eq!(index[0]["builds"].as_array().unwrap().len(), 2);
    assert_eq!(index[1]["is_prerelease"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_versions_format() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("versions.json");

    let mut cmd = release_index_command(temp.path());
    cmd.args(["fetch", "--format", "versions", "--page-size", "2"])
        .arg("--url")
        .arg(format!("{}/v1/releases/tool", server.uri()))
        .arg("--output")
        .arg(&output_path);

    run(cmd).await.assert().success();

    let index: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(index["Versions"], json!(["1.1.0", "1.1.0-beta1", "1.0.1"]));
    assert!(index["LastUpdated"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_failure_writes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release("2.0.0", "2023-03-02T10:00:00.000Z"),
            release("1.9.0", "2023-02-20T10:00:00.000Z"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("after", "2023-02-20T10:00:00.000Z"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("index.json");

    let mut cmd = release_index_command(temp.path());
    cmd.args(["fetch", "--page-size", "2", "--url", server.uri().as_str()])
        .arg("--output")
        .arg(&output_path);

    run(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("502"));

    assert!(!output_path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_decode_failure_reports_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"code\": 429, \"message\": \"slow down\"}"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();

    let mut cmd = release_index_command(temp.path());
    cmd.args(["fetch", "--url", server.uri().as_str()])
        .arg("--output")
        .arg(temp.path().join("index.json"));

    run(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("slow down"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_invalid_url() {
    let temp = TempDir::new().unwrap();

    let mut cmd = release_index_command(temp.path());
    cmd.args(["fetch", "--url", "not a url"])
        .arg("--output")
        .arg(temp.path().join("index.json"));

    run(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_uses_env_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/from-env"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            release("0.1.0", "2023-01-01T00:00:00.000Z"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let output_path = temp.path().join("index.json");

    let mut cmd = release_index_command(temp.path());
    cmd.env("RELEASE_INDEX_API_URL", format!("{}/from-env", server.uri()))
        .arg("fetch")
        .arg("--output")
        .arg(&output_path);

    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 releases (1 pages)"));
}
