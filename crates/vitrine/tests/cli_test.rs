//! Integration tests for the `vitrine` CLI binary.
//!
//! Argument parsing, help output, completions and error exits run without
//! a backend. Catalog round trips run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vitrine` binary with env isolation.
///
/// Clears all `VITRINE_*` env vars and points config lookups at a
/// nonexistent path so tests never touch the user's real configuration.
fn vitrine_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vitrine");
    cmd.env("HOME", "/tmp/vitrine-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vitrine-cli-test-nonexistent")
        .env(
            "VITRINE_CONFIG",
            "/tmp/vitrine-cli-test-nonexistent/config.toml",
        )
        .env_remove("VITRINE_PROFILE")
        .env_remove("VITRINE_API_URL")
        .env_remove("VITRINE_OUTPUT")
        .env_remove("VITRINE_INSECURE")
        .env_remove("VITRINE_TIMEOUT")
        .env("NO_COLOR", "1");
    cmd
}

/// Same isolation, with the config file at `config`.
fn vitrine_with_config(config: &Path) -> assert_cmd::Command {
    let mut cmd = vitrine_cmd();
    cmd.env("VITRINE_CONFIG", config);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn product_with_skus() -> Value {
    json!({
        "id": 3,
        "name": "Camiseta",
        "skus": [
            {"id": 10, "product_id": 3, "sku": "CAM-P", "cost_price": "20.00",
             "sale_price": "35.00", "price": "39.90", "quantity": 4},
            {"id": 11, "product_id": 3, "sku": "CAM-M", "cost_price": "20.00",
             "sale_price": "35.00", "price": "39.90", "quantity": 7}
        ]
    })
}

async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/3/skus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_with_skus()))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vitrine_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    vitrine_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("catalog")
            .and(predicate::str::contains("categories"))
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("skus")),
    );
}

#[test]
fn test_version_flag() {
    vitrine_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vitrine"));
}

#[test]
fn test_skus_help_lists_batch_commands() {
    vitrine_cmd()
        .args(["skus", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("sync")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("edit")),
        );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    vitrine_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    vitrine_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = vitrine_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_categories_list_without_config() {
    vitrine_cmd()
        .args(["categories", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No catalog API configured"));
}

#[test]
fn test_unknown_profile() {
    vitrine_cmd()
        .args(["--profile", "loja", "products", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'loja' not found"));
}

#[test]
fn test_open_unknown_route_exits_not_found() {
    vitrine_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "open", "/nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No page at route '/nope'"));
}

#[test]
fn test_skus_edit_needs_a_terminal() {
    vitrine_cmd()
        .args(["--api-url", "http://127.0.0.1:9", "skus", "edit", "3"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs an interactive terminal"));
}

#[test]
fn test_skus_sync_requires_file() {
    let output = vitrine_cmd().args(["skus", "sync", "3"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--from-file"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_set_then_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    vitrine_with_config(&config)
        .args(["config", "set", "api_url", "http://localhost:3333"])
        .assert()
        .success();
    vitrine_with_config(&config)
        .args(["config", "set", "timeout", "12"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("api_url = \"http://localhost:3333\""));
    assert!(written.contains("timeout = 12"));

    vitrine_with_config(&config)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    vitrine_with_config(&dir.path().join("config.toml"))
        .args(["config", "set", "password", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn test_config_use_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    vitrine_with_config(&dir.path().join("config.toml"))
        .args(["config", "use", "loja"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("(none)"));
}

// ── Against a catalog API ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Camisetas"},
            {"id": 2, "name": "Bonés", "description": "Acessórios"}
        ])))
        .mount(&server)
        .await;

    let output = vitrine_cmd()
        .args(["--api-url", &server.uri(), "-o", "json", "categories", "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[1]["name"], "Bonés");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_config_default_output_applies_without_flag() {
    let server = catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[defaults]\noutput = \"plain\"\n").unwrap();

    vitrine_with_config(&config)
        .args(["--api-url", &server.uri(), "skus", "list", "3"])
        .assert()
        .success()
        .stdout("10\n11\n");

    let output = vitrine_with_config(&config)
        .args(["--api-url", &server.uri(), "-o", "json", "skus", "list", "3"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skus_list_plain_prints_ids() {
    let server = catalog_server().await;

    vitrine_cmd()
        .args(["--api-url", &server.uri(), "-o", "plain", "skus", "list", "3"])
        .assert()
        .success()
        .stdout("10\n11\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skus_set_partial_batch_exits_9() {
    let server = catalog_server().await;
    Mock::given(method("PUT"))
        .and(path("/products/3/skus/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 10, "product_id": 3, "sku": "CAM-P", "price": "29.90"}
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/3/skus/11"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "sku already taken"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = vitrine_cmd()
        .args(["--api-url", &server.uri(), "skus", "set", "3", "10", "--price", "29.90"])
        .output()
        .unwrap();

    let text = combined_output(&output);
    assert_eq!(output.status.code(), Some(9), "{text}");
    assert!(text.contains("1 of 2 SKUs were not saved: CAM-M"), "{text}");
    assert!(text.contains("sku already taken"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skus_set_unknown_sku_exits_not_found() {
    let server = catalog_server().await;

    vitrine_cmd()
        .args(["--api-url", &server.uri(), "skus", "set", "3", "99", "--price", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("skus list 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_get_missing_names_the_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    vitrine_cmd()
        .args(["--api-url", &server.uri(), "products", "get", "7"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("product '7' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skus_sync_creates_rows_without_id() {
    let server = catalog_server().await;
    Mock::given(method("PUT"))
        .and(path("/products/3/skus/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 10})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/3/skus/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 11})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products/3/skus"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("skus.yaml");
    std::fs::write(
        &file,
        "- sku: CAM-G\n  cost_price: 20\n  sale_price: 35\n  price: 39.9\n  quantity: 2\n",
    )
    .unwrap();

    let output = vitrine_cmd()
        .args(["--api-url", &server.uri(), "-o", "json", "skus", "sync", "3", "-F"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let lines: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(lines.as_array().map(Vec::len), Some(3));
    assert_eq!(lines[2]["sku"], "CAM-G");
    assert_eq!(lines[2]["action"], "create");
    assert_eq!(lines[2]["saved"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_skus_delete_with_yes() {
    let server = catalog_server().await;
    Mock::given(method("DELETE"))
        .and(path("/products/3/skus/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    vitrine_cmd()
        .args(["--api-url", &server.uri(), "-y", "skus", "delete", "3", "11"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removido com sucesso!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "A"}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Camiseta", "skus": [{"id": 10}, {"id": 11}]},
            {"id": 4, "name": "Boné"}
        ])))
        .mount(&server)
        .await;

    let output = vitrine_cmd()
        .args(["--api-url", &server.uri(), "-o", "json", "dashboard"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary, json!({"categories": 1, "products": 2, "skus": 2}));
}
