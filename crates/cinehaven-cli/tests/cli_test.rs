#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POPULAR: &str = include_str!("../../../fixtures/tmdb/movie_popular_page1.json");
const UPCOMING: &str = include_str!("../../../fixtures/tmdb/movie_upcoming_page2.json");
const SEARCH_EMPTY: &str = include_str!("../../../fixtures/tmdb/search_movie_empty.json");
const DETAILS: &str = include_str!("../../../fixtures/tmdb/movie_details_550.json");
const CREDITS: &str = include_str!("../../../fixtures/tmdb/movie_credits_550.json");

/// A command with no ambient TMDB credentials or log overrides.
fn cinehaven() -> Command {
    let mut cmd = cargo_bin_cmd!("cinehaven");
    cmd.env_remove("TMDB_API_KEY")
        .env_remove("TMDB_API_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT");
    cmd
}

fn write_config(dir: &Path, base_url: &str) {
    let content = format!("[tmdb]\napi_key = \"test-key\"\nbase_url = \"{base_url}\"\n");
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    cinehaven()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("popular"))
        .stdout(predicate::str::contains("top-rated"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_popular_rejects_page_zero() {
    // Arrange & Act & Assert
    cinehaven()
        .args(["popular", "--page", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--page"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    cinehaven()
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_movie_rejects_non_numeric_id() {
    // Arrange & Act & Assert
    cinehaven()
        .args(["movie", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--id"));
}

#[test]
fn test_browse_rejects_unknown_route() {
    // Arrange & Act & Assert
    cinehaven()
        .args(["browse", "--route", "/tv/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown route"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    cinehaven()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cinehaven"));
}

#[test]
fn test_missing_credentials_is_error() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "popular"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_TOKEN or TMDB_API_KEY"));
}

#[test]
fn test_config_init_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    // Act
    cinehaven()
        .args(["--dir", dir_arg, "config", "init"])
        .assert()
        .success();

    // Assert
    assert!(dir.path().join("config.toml").exists());
    cinehaven()
        .args(["--dir", dir_arg, "config", "show"])
        .env("TMDB_API_TOKEN", "secret-token-value")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_token: secr****"))
        .stdout(predicate::str::contains("api_key: (not set)"))
        .stdout(predicate::str::contains("language: en-US"))
        .stdout(predicate::str::contains("secret-token-value").not());
}

#[test]
fn test_config_init_refuses_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let dir_arg = dir.path().to_str().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[tmdb]\n").unwrap();

    // Act & Assert
    cinehaven()
        .args(["--dir", dir_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    cinehaven()
        .args(["--dir", dir_arg, "config", "init", "--force"])
        .assert()
        .success();
}

#[tokio::test]
async fn test_popular_prints_movies() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("page", "1"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POPULAR))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/3/", mock_server.uri()));

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "popular"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Popular Movies: page 1 of 44360"))
        .stdout(predicate::str::contains("693134\tDune: Part Two"))
        .stdout(predicate::str::contains(
            "https://image.tmdb.org/t/p/w500/1pdfLvkbY9ohJlCjQH2CZjjYVvJ.jpg",
        ));
}

#[tokio::test]
async fn test_upcoming_passes_page_and_env_key() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/upcoming"))
        .and(query_param("page", "2"))
        .and(query_param("api_key", "env-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(UPCOMING))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/3", mock_server.uri()));

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "upcoming", "--page", "2"])
        .env("TMDB_API_KEY", "env-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kingdom of the Planet of the Apes"));
}

#[tokio::test]
async fn test_top_rated_server_error_fails() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/top_rated"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"{"status_code":11,"status_message":"Internal error."}"#,
        ))
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/3/", mock_server.uri()));

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "top-rated"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to fetch Top Rated Movies"))
        .stderr(predicate::str::contains("HTTP 500"));
}

#[tokio::test]
async fn test_search_without_results() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "zzzz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_EMPTY))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/3/", mock_server.uri()));

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "search", "--query", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Search Results for \"zzzz\": 0"));
}

#[test]
fn test_blank_search_is_rejected() {
    // Arrange & Act & Assert
    cinehaven()
        .args(["search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[tokio::test]
async fn test_movie_prints_details_and_cast() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAILS))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CREDITS))
        .expect(1)
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &format!("{}/3/", mock_server.uri()));

    // Act & Assert
    cinehaven()
        .args(["--dir", dir.path().to_str().unwrap(), "movie", "--id", "550"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fight Club (550)"))
        .stdout(predicate::str::contains("Rating: 8.43"))
        .stdout(predicate::str::contains("Runtime: 139 min"))
        .stdout(predicate::str::contains("Brad Pitt as Tyler Durden"));
}
