use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, starts_with};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn store_path(&self) -> PathBuf {
        self.dir.path().join("authorized_ids.json")
    }

    /// Command isolated from the user's config and data directories.
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idforge"));
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("IDFORGE_DIR", self.dir.path().join("data"))
            .env("IDFORGE_SECRET", "test-secret")
            .env("NO_COLOR", "1")
            .env_remove("IDFORGE_STORE")
            .env_remove("RUST_LOG")
            .arg("--store")
            .arg(self.store_path());
        cmd
    }

    fn generate_json(&self, name: &str) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["--format", "json", "generate", name])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .cmd()
            .args(["--format", "json", "list"])
            .output()
            .unwrap();
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn is_token(id: &str) -> bool {
    let chars: Vec<char> = id.chars().collect();
    chars.len() >= 12
        && chars.len() <= 15
        && chars[..chars.len() - 12].iter().all(|c| c.is_ascii_uppercase())
        && chars[chars.len() - 12..]
            .iter()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(c))
}

fn read_store(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idforge"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("idforge"))
        .stdout(contains("generate"))
        .stdout(contains("export"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idforge"));
    cmd.arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idforge"));
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_idforge"));
}

#[test]
fn test_generate_then_list() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["generate", "Marie"])
        .assert()
        .success()
        .stdout(contains("Name: Marie"))
        .stdout(contains("ID:   MAR"));

    let entries = sandbox.list_json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Marie");
    assert_eq!(entries[0]["active"], true);
    assert!(is_token(entries[0]["id"].as_str().unwrap()));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Marie"))
        .stdout(contains("Total: 1 ID(s)"));
}

#[test]
fn test_generate_joins_words_and_trims() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["generate", "  Jean", "Paul  "])
        .assert()
        .success();

    let entries = sandbox.list_json();
    assert_eq!(entries[0]["name"], "Jean Paul");
    assert!(entries[0]["id"].as_str().unwrap().starts_with("JEA"));
}

#[test]
fn test_generate_same_name_twice_keeps_both() {
    let sandbox = Sandbox::new();
    let first = sandbox.generate_json("Paul");
    let second = sandbox.generate_json("Paul");

    assert_ne!(first["id"], second["id"]);
    let entries = sandbox.list_json();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["name"] == "Paul"));
}

#[test]
fn test_generate_without_name_is_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("generate")
        .assert()
        .code(2)
        .stderr(contains("Usage"));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn test_generate_blank_name_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["generate", "   "])
        .assert()
        .code(1)
        .stderr(contains("name must not be empty"));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn test_generate_without_secret_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env_remove("IDFORGE_SECRET")
        .args(["generate", "Marie"])
        .assert()
        .code(1)
        .stderr(contains("secret not configured"))
        .stderr(contains("IDFORGE_SECRET"));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn test_secret_from_config_file() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.dir.path().join("config").join("idforge");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[generator]\nsecret = \"from-file\"\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .env_remove("IDFORGE_SECRET")
        .args(["generate", "Marie"])
        .assert()
        .success();
    assert_eq!(sandbox.list_json().len(), 1);
}

#[test]
fn test_list_on_empty_store() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No IDs issued yet."));
    assert!(!sandbox.store_path().exists());
}

#[test]
fn test_list_and_export_are_idempotent() {
    let sandbox = Sandbox::new();
    sandbox.generate_json("Marie");
    sandbox.generate_json("Paul");

    for verb in ["list", "export"] {
        let first = sandbox.cmd().arg(verb).output().unwrap();
        let second = sandbox.cmd().arg(verb).output().unwrap();
        assert!(first.status.success());
        assert_eq!(first.stdout, second.stdout);
    }
}

#[test]
fn test_delete_existing_id() {
    let sandbox = Sandbox::new();
    let keep = sandbox.generate_json("Marie");
    let gone = sandbox.generate_json("Paul");
    let gone_id = gone["id"].as_str().unwrap();

    sandbox
        .cmd()
        .arg("delete")
        .arg(gone_id.to_lowercase())
        .assert()
        .success()
        .stdout(contains(format!("ID {gone_id} (Paul) deleted.")));

    let entries = sandbox.list_json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], keep["id"]);

    let raw = read_store(&sandbox.store_path());
    assert!(raw["index"].get(gone_id).is_none());
    assert_eq!(raw["index"].as_object().unwrap().len(), 1);
}

#[test]
fn test_delete_missing_id_is_not_fatal() {
    let sandbox = Sandbox::new();
    sandbox.generate_json("Marie");
    let before = std::fs::read(sandbox.store_path()).unwrap();

    sandbox
        .cmd()
        .args(["delete", "NOPE00000000000"])
        .assert()
        .success()
        .stdout(contains("ID NOPE00000000000 not found."));

    assert_eq!(std::fs::read(sandbox.store_path()).unwrap(), before);
}

#[test]
fn test_delete_malformed_id_explains_shape() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["delete", "marie"])
        .assert()
        .success()
        .stdout(contains("ID marie not found."))
        .stdout(contains("12 hex digits"));

    sandbox
        .cmd()
        .args(["delete", "NOPE00000000000"])
        .assert()
        .success()
        .stdout(contains("hex digits").not());
}

#[test]
fn test_delete_json_reports_outcome() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["--format", "json", "delete", "abc"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["deleted"], false);
    assert_eq!(value["id"], "ABC");
}

#[test]
fn test_export_prints_allow_list() {
    let sandbox = Sandbox::new();
    let marie = sandbox.generate_json("Marie");
    let paul = sandbox.generate_json("Paul");

    let expected = format!(
        "const AUTHORIZED_IDS = [\"{}\", \"{}\"];",
        marie["id"].as_str().unwrap(),
        paul["id"].as_str().unwrap()
    );
    sandbox
        .cmd()
        .arg("export")
        .assert()
        .success()
        .stdout(contains(expected));
}

#[test]
fn test_export_skips_inactive_entries() {
    let sandbox = Sandbox::new();
    sandbox.generate_json("Marie");
    sandbox.generate_json("Paul");

    let path = sandbox.store_path();
    let mut raw = read_store(&path);
    let paul_id = raw["entries"][1]["id"].as_str().unwrap().to_string();
    raw["entries"][1]["active"] = serde_json::Value::Bool(false);
    raw["index"][&paul_id]["active"] = serde_json::Value::Bool(false);
    std::fs::write(&path, serde_json::to_string_pretty(&raw).unwrap()).unwrap();

    let output = sandbox
        .cmd()
        .args(["--format", "json", "export"])
        .output()
        .unwrap();
    let ids: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(ids.len(), 1);
    assert!(!ids.contains(&paul_id));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Inactive"));
}

#[test]
fn test_corrupt_store_is_fatal() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.store_path(), "not json").unwrap();

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .code(1)
        .stderr(contains("corrupt"));
    sandbox
        .cmd()
        .args(["generate", "Marie"])
        .assert()
        .failure();
    assert_eq!(
        std::fs::read_to_string(sandbox.store_path()).unwrap(),
        "not json"
    );
}

#[test]
fn test_store_path_from_env() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("from-env.json");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("idforge"));
    cmd.env("HOME", sandbox.dir.path())
        .env("XDG_CONFIG_HOME", sandbox.dir.path().join("config"))
        .env("IDFORGE_SECRET", "test-secret")
        .env("IDFORGE_STORE", &path)
        .args(["generate", "Marie"])
        .assert()
        .success();

    assert!(path.exists());
}
