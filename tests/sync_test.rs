use mockito::{Mock, ServerGuard};
use relver::commands::sync;
use relver::domain::{Component, ComponentSet, EnvKey, RepoId};
use relver::infrastructure::GithubReleases;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn components(pairs: &[(&str, &str)]) -> ComponentSet {
    ComponentSet::new(
        pairs
            .iter()
            .map(|(key, repo)| Component::new(EnvKey::from(*key), RepoId::from(*repo)))
            .collect(),
    )
}

fn versions_path(dir: &TempDir) -> PathBuf {
    dir.path().join("versions.env")
}

fn mock_release(server: &mut ServerGuard, repo: &str, tag: &str) -> Mock {
    server
        .mock("GET", format!("/repos/{repo}/releases/latest").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"tag_name": "{tag}"}}"#))
        .create()
}

fn mock_release_404(server: &mut ServerGuard, repo: &str) -> Mock {
    server
        .mock("GET", format!("/repos/{repo}/releases/latest").as_str())
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Not Found"}"#)
        .create()
}

fn mock_tags(server: &mut ServerGuard, repo: &str, body: &str) -> Mock {
    server
        .mock("GET", format!("/repos/{repo}/tags").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

#[test]
fn test_sync_creates_versions_file() {
    let mut server = mockito::Server::new();
    let web = mock_release(&mut server, "acme/web", "v2.1.0");
    let backend = mock_release(&mut server, "acme/server", "v1.4.2");
    let agent = mock_release(&mut server, "acme/agent", "v0.9.0");

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    let set = components(&[
        ("WEB_VERSION", "acme/web"),
        ("SERVER_VERSION", "acme/server"),
        ("AGENT_VERSION", "acme/agent"),
    ]);

    sync::run(github, &set, &path).unwrap();

    web.assert();
    backend.assert();
    agent.assert();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "WEB_VERSION=v2.1.0\nSERVER_VERSION=v1.4.2\nAGENT_VERSION=v0.9.0\n"
    );
}

#[test]
fn test_sync_updates_in_place_and_appends_missing() {
    let mut server = mockito::Server::new();
    let web = mock_release(&mut server, "acme/web", "v2.0.0");
    let backend = mock_release(&mut server, "acme/server", "v3.0.0");

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);
    fs::write(&path, "# deployment pins\n\nWEB_VERSION=v1.0.0\nFOO=bar\n").unwrap();

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    let set = components(&[
        ("WEB_VERSION", "acme/web"),
        ("SERVER_VERSION", "acme/server"),
    ]);

    sync::run(github, &set, &path).unwrap();

    web.assert();
    backend.assert();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# deployment pins\n\nWEB_VERSION=v2.0.0\nFOO=bar\nSERVER_VERSION=v3.0.0\n"
    );
}

#[test]
fn test_sync_twice_yields_same_file() {
    let mut server = mockito::Server::new();
    let _web = mock_release(&mut server, "acme/web", "v2.1.0");

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);
    let set = components(&[("WEB_VERSION", "acme/web")]);

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    sync::run(github, &set, &path).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    sync::run(github, &set, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), first);
    assert_eq!(first, "WEB_VERSION=v2.1.0\n");
}

#[test]
fn test_sync_uses_first_tag_when_no_release() {
    let mut server = mockito::Server::new();
    let release = mock_release_404(&mut server, "acme/agent");
    let tags = mock_tags(
        &mut server,
        "acme/agent",
        r#"[{"name": "v0.3.0"}, {"name": "v0.2.0"}]"#,
    );

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    let set = components(&[("AGENT_VERSION", "acme/agent")]);

    sync::run(github, &set, &path).unwrap();

    release.assert();
    tags.assert();
    assert_eq!(fs::read_to_string(&path).unwrap(), "AGENT_VERSION=v0.3.0\n");
}

#[test]
fn test_sync_writes_fallback_when_lookup_fails() {
    let mut server = mockito::Server::new();
    let release = server
        .mock("GET", "/repos/acme/web/releases/latest")
        .with_status(500)
        .with_body("Internal Server Error")
        .create();

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);
    fs::write(&path, "WEB_VERSION=v1.0.0\nFOO=bar\n").unwrap();

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    let set = components(&[("WEB_VERSION", "acme/web")]);

    sync::run(github, &set, &path).unwrap();

    release.assert();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "WEB_VERSION=main\nFOO=bar\n",
        "a failed lookup should degrade to the fallback, not abort the run"
    );
}

#[test]
fn test_sync_mixes_outcomes_per_component() {
    let mut server = mockito::Server::new();
    let web = mock_release(&mut server, "acme/web", "v2.1.0");
    let backend_release = mock_release_404(&mut server, "acme/server");
    let backend_tags = mock_tags(&mut server, "acme/server", r#"[{"name": "v1.1.0"}]"#);
    let agent_release = mock_release_404(&mut server, "acme/agent");
    let agent_tags = mock_tags(&mut server, "acme/agent", "[]");

    let dir = TempDir::new().unwrap();
    let path = versions_path(&dir);

    let github = GithubReleases::with_base_url(&server.url()).unwrap();
    let set = components(&[
        ("WEB_VERSION", "acme/web"),
        ("SERVER_VERSION", "acme/server"),
        ("AGENT_VERSION", "acme/agent"),
    ]);

    sync::run(github, &set, &path).unwrap();

    web.assert();
    backend_release.assert();
    backend_tags.assert();
    agent_release.assert();
    agent_tags.assert();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "WEB_VERSION=v2.1.0\nSERVER_VERSION=v1.1.0\nAGENT_VERSION=main\n"
    );
}
