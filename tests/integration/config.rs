use crate::common::{release_index_command, run};
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_show_defaults() {
    let temp = TempDir::new().unwrap();

    let mut cmd = release_index_command(temp.path());
    cmd.args(["config", "show"]);

    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size: 20"))
        .stdout(predicate::str::contains("format: full"));
}

#[tokio::test]
async fn test_config_show_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yaml");
    std::fs::write(&path, "page_size: 100\nformat: versions\n").unwrap();

    let mut cmd = release_index_command(temp.path());
    cmd.args(["config", "show", "--config"]).arg(&path);

    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size: 100"))
        .stdout(predicate::str::contains("format: versions"));
}

#[tokio::test]
async fn test_config_rejects_zero_page_size() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yaml");
    std::fs::write(&path, "page_size: 0\n").unwrap();

    let mut cmd = release_index_command(temp.path());
    cmd.args(["config", "show", "--config"]).arg(&path);

    run(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be greater than zero"));
}
