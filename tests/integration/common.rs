//! Common utilities for integration tests

use assert_cmd::Command;
use serde_json::json;
use std::path::Path;
use std::process::Output;

/// Binary under test, isolated from the user's config and environment
pub fn release_index_command(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_release-index"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RELEASE_INDEX_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the command off the async runtime so the mock server keeps serving
pub async fn run(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("failed to run release-index"))
        .await
        .expect("command task panicked")
}

pub fn release(version: &str, created: &str) -> serde_json::Value {
    json!({
        "builds": [
            {"arch": "amd64", "os": "linux", "url": format!("https://releases.test/{}/linux_amd64.zip", version)},
            {"arch": "arm64", "os": "darwin", "url": format!("https://releases.test/{}/darwin_arm64.zip", version)}
        ],
        "is_prerelease": version.contains('-'),
        "timestamp_created": created,
        "version": version
    })
}
