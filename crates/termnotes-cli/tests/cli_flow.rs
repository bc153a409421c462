use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_termnotes"))
}

struct Env {
    _dir: TempDir,
    config: PathBuf,
    data: PathBuf,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir should be available");
        let config = dir.path().join("c");
        let data = dir.path().join("d");
        std::fs::create_dir_all(&config).expect("create config dir");
        std::fs::create_dir_all(&data).expect("create data dir");
        Self {
            _dir: dir,
            config,
            data,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("XDG_CONFIG_HOME", &self.config)
            .env("XDG_DATA_HOME", &self.data)
            .env_remove("TERMNOTES_PATH")
            .env_remove("TERMNOTES_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("run termnotes")
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "termnotes {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn store(&self) -> PathBuf {
        self.data.join("termnotes").join("notes.db")
    }

    fn list_json(&self, extra: &[&str]) -> serde_json::Value {
        let mut args = vec!["list", "--json"];
        args.extend_from_slice(extra);
        serde_json::from_str(&self.run_ok(&args)).expect("list --json should be JSON")
    }
}

fn ids(listing: &serde_json::Value) -> Vec<i64> {
    listing["notes"]
        .as_array()
        .expect("notes array")
        .iter()
        .map(|n| n["id"].as_i64().expect("numeric id"))
        .collect()
}

fn exit_code(output: &Output) -> Option<i32> {
    output.status.code()
}

#[test]
fn test_init_writes_config_store_and_key() {
    let env = Env::new();
    let out = env.run_ok(&["init"]);
    assert!(out.contains("Initialized notes store"));

    let config_path = env.config.join("termnotes").join("config.toml");
    let config = std::fs::read_to_string(&config_path).expect("config written");
    assert!(config.contains("[store]"));
    assert!(config.contains(&env.store().to_string_lossy().to_string()));

    assert!(env.store().exists());
    assert!(env.store().with_extension("key").exists());

    let again = env.run_ok(&["init"]);
    assert!(again.contains("already exists"));
}

#[test]
fn test_add_list_delete_undo_flow() {
    let env = Env::new();
    env.run_ok(&["add", "Buy", "milk"]);
    env.run_ok(&["add", "Call Bob", "--title", "Phone"]);

    let listing = env.list_json(&[]);
    assert_eq!(ids(&listing), vec![1, 2]);
    assert_eq!(listing["notes"][0]["content"], "Buy milk");
    assert_eq!(listing["notes"][1]["title"], "Phone");

    env.run_ok(&["delete", "1"]);
    assert_eq!(ids(&env.list_json(&[])), vec![2]);
    assert_eq!(ids(&env.list_json(&["--all"])), vec![1, 2]);

    let trash: serde_json::Value =
        serde_json::from_str(&env.run_ok(&["trash", "--json"])).unwrap();
    assert_eq!(ids(&trash), vec![1]);

    let out = env.run_ok(&["undo"]);
    assert!(out.contains("Restored note 1"));
    assert_eq!(ids(&env.list_json(&[])), vec![1, 2]);

    let output = env.run(&["undo"]);
    assert_eq!(exit_code(&output), Some(3));
}

#[test]
fn test_show_edit_and_errors() {
    let env = Env::new();
    env.run_ok(&["add", "first draft"]);

    let shown: serde_json::Value =
        serde_json::from_str(&env.run_ok(&["show", "1", "--json"])).unwrap();
    assert_eq!(shown["content"], "first draft");

    env.run_ok(&["edit", "1", "second", "draft", "--title", "Essay"]);
    let plain = env.run_ok(&["show", "1"]);
    assert!(plain.contains("second draft"));
    assert!(plain.contains("title=Essay"));

    let missing = env.run(&["show", "99"]);
    assert_eq!(exit_code(&missing), Some(3));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("Note 99 not found"));

    let bad_id = env.run(&["show", "abc"]);
    assert_eq!(exit_code(&bad_id), Some(4));

    let empty = env.run(&["add", "   "]);
    assert_eq!(exit_code(&empty), Some(4));
}

#[test]
fn test_restore_by_id_and_purge() {
    let env = Env::new();
    for text in ["one", "two", "three"] {
        env.run_ok(&["add", text]);
    }
    env.run_ok(&["delete", "1"]);
    env.run_ok(&["delete", "3"]);

    env.run_ok(&["restore", "1"]);
    assert_eq!(ids(&env.list_json(&[])), vec![1, 2]);

    env.run_ok(&["restore"]);
    assert_eq!(ids(&env.list_json(&[])), vec![1, 2, 3]);

    env.run_ok(&["purge", "2"]);
    assert_eq!(ids(&env.list_json(&["--all"])), vec![1, 3]);
    assert_eq!(exit_code(&env.run(&["purge", "2"])), Some(3));

    env.run_ok(&["add", "four"]);
    assert_eq!(ids(&env.list_json(&[])), vec![1, 3, 4]);
}

#[test]
fn test_search_is_case_insensitive() {
    let env = Env::new();
    env.run_ok(&["add", "Buy MILK"]);
    env.run_ok(&["add", "Dentist"]);

    let hits: serde_json::Value =
        serde_json::from_str(&env.run_ok(&["search", "milk", "--json"])).unwrap();
    assert_eq!(ids(&hits), vec![1]);

    let none = env.run_ok(&["search", "zebra"]);
    assert!(none.contains("No notes match"));
}

#[test]
fn test_search_without_query_is_usage_error() {
    let env = Env::new();
    env.run_ok(&["add", "anything"]);

    let missing = env.run(&["search"]);
    assert_eq!(exit_code(&missing), Some(4));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("termnotes search <query>"));

    let blank = env.run(&["search", "   "]);
    assert_eq!(exit_code(&blank), Some(4));
}

#[test]
fn test_export_import_between_stores() {
    let source = Env::new();
    source.run_ok(&["add", "Buy milk", "--title", "Groceries"]);
    source.run_ok(&["add", "Call Bob"]);

    let export_path = source.data.join("backup.json");
    source.run_ok(&["export", "--output", export_path.to_str().unwrap()]);
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 2);

    let stdout_export: serde_json::Value =
        serde_json::from_str(&source.run_ok(&["export"])).unwrap();
    assert_eq!(stdout_export, exported);

    let target = Env::new();
    let out = target.run_ok(&["import", export_path.to_str().unwrap()]);
    assert!(out.contains("Imported 2 note(s)"));
    let listing = target.list_json(&[]);
    assert_eq!(listing["notes"][0]["title"], "Groceries");
    assert_eq!(listing["notes"][1]["content"], "Call Bob");

    let mut child = target
        .command()
        .args(["import", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn import");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"[{"content":"x"},{"bogus":1}]"#)
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait import");
    assert!(output.status.success());
    assert_eq!(ids(&target.list_json(&[])), vec![1, 2, 3]);

    let bad = target.command().args(["import", "-"]).stdin(Stdio::null()).output().unwrap();
    assert_eq!(exit_code(&bad), Some(4));
}

#[test]
fn test_clear_requires_confirmation() {
    let env = Env::new();
    env.run_ok(&["add", "a"]);
    env.run_ok(&["add", "b"]);

    assert_eq!(exit_code(&env.run(&["clear"])), Some(4));
    assert_eq!(ids(&env.list_json(&[])), vec![1, 2]);

    env.run_ok(&["clear", "--yes"]);
    assert!(ids(&env.list_json(&["--all"])).is_empty());

    env.run_ok(&["add", "c"]);
    assert_eq!(ids(&env.list_json(&[])), vec![3]);
}

#[test]
fn test_check_detects_wrong_key() {
    let env = Env::new();
    env.run_ok(&["add", "secret"]);
    let out = env.run_ok(&["check"]);
    assert!(out.contains("All checks passed"));

    let key = env.store().with_extension("key");
    std::fs::remove_file(&key).unwrap();

    let output = env.run(&["check"]);
    assert_eq!(exit_code(&output), Some(6));

    let listing = env.list_json(&[]);
    assert!(ids(&listing).is_empty());
    assert_eq!(listing["unreadable"][0]["id"], 1);
}

#[test]
fn test_undo_reports_restore_of_unreadable_note() {
    let env = Env::new();
    env.run_ok(&["add", "keep"]);
    env.run_ok(&["add", "secret"]);
    env.run_ok(&["delete", "2"]);

    std::fs::remove_file(env.store().with_extension("key")).unwrap();

    let output = env.run(&["undo"]);
    assert!(
        output.status.success(),
        "undo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Restored note 2"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not be decrypted"));

    let trash: serde_json::Value =
        serde_json::from_str(&env.run_ok(&["trash", "--json"])).unwrap();
    assert!(ids(&trash).is_empty());
    assert_eq!(exit_code(&env.run(&["undo"])), Some(3));
}

#[test]
fn test_store_flag_and_config_precedence() {
    let env = Env::new();
    let custom = env.data.join("elsewhere").join("mine.db");
    let custom_str = custom.to_str().unwrap();

    env.run_ok(&["--store", custom_str, "add", "over here"]);
    assert!(custom.exists());
    assert!(Path::new(&custom.with_extension("key")).exists());
    assert!(!env.store().exists());

    let from_env = env
        .command()
        .env("TERMNOTES_PATH", custom_str)
        .args(["list", "--json"])
        .output()
        .unwrap();
    let listing: serde_json::Value = serde_json::from_slice(&from_env.stdout).unwrap();
    assert_eq!(ids(&listing), vec![1]);

    env.run_ok(&["init", custom_str]);
    let listing = env.list_json(&[]);
    assert_eq!(listing["notes"][0]["content"], "over here");
}
