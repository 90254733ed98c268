use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const PASSPHRASE: &str = "correct-horse-battery";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_daylog"))
}

/// Isolated home with its own XDG dirs and an initialized journal.
struct TestJournal {
    dir: TempDir,
}

impl TestJournal {
    fn new() -> Self {
        let journal = Self::empty();
        let path = journal.journal_path();
        let output = journal
            .command("2024-03-10")
            .args(["init", path.to_str().expect("utf8 path"), "--no-input"])
            .output()
            .expect("run init");
        assert_success(&output);
        journal
    }

    fn empty() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("config")).expect("config dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("data dir");
        Self { dir }
    }

    fn journal_path(&self) -> PathBuf {
        self.dir.path().join("data").join("journal.daylog")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("daylog").join("config.toml")
    }

    fn command(&self, today: &str) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("DAYLOG_PASSPHRASE", PASSPHRASE)
            .env("DAYLOG_TODAY", today)
            .env("NO_COLOR", "1")
            .env("DAYLOG_ASCII", "1")
            .env_remove("DAYLOG_PATH")
            .env_remove("DAYLOG_CONFIG")
            .env_remove("DAYLOG_LOG")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, today: &str, args: &[&str]) -> Output {
        self.command(today).args(args).output().expect("run daylog")
    }

    /// Run a quiet command that prints an entry id.
    fn run_id(&self, today: &str, args: &[&str]) -> String {
        let mut full = vec!["--quiet"];
        full.extend_from_slice(args);
        let output = self.run(today, &full);
        assert_success(&output);
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn view(&self, today: &str, date: Option<&str>) -> Value {
        let mut args = vec!["view", "--json"];
        if let Some(date) = date {
            args.extend_from_slice(&["--date", date]);
        }
        let output = self.run(today, &args);
        assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("view json")
    }
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn contents(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["content"].as_str().expect("content").to_string())
        .collect()
}

fn find<'a>(list: &'a Value, content: &str) -> &'a Value {
    list.as_array()
        .expect("array")
        .iter()
        .find(|entry| entry["content"] == content)
        .unwrap_or_else(|| panic!("no entry {} in {}", content, list))
}

#[test]
fn test_init_writes_config_and_encrypted_file() {
    let journal = TestJournal::new();
    assert!(journal.journal_path().exists());

    let config = std::fs::read_to_string(journal.config_path()).expect("config");
    assert!(config.contains("journal.daylog"));

    let raw = std::fs::read(journal.journal_path()).expect("journal bytes");
    assert!(raw.starts_with(b"age-encryption.org/v1"));
}

#[test]
fn test_init_refuses_existing_journal() {
    let journal = TestJournal::new();
    let path = journal.journal_path();
    let output = journal.run(
        "2024-03-10",
        &["init", path.to_str().expect("utf8"), "--no-input"],
    );
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_add_and_view_day() {
    let journal = TestJournal::new();
    journal.run_id("2024-03-10", &["add", "task", "Buy", "milk"]);
    journal.run_id("2024-03-10", &["add", "note", "Rainy morning"]);

    let view = journal.view("2024-03-10", None);
    assert_eq!(view["date"], "2024-03-10");
    assert_eq!(contents(&view["daily"]), vec!["Buy milk", "Rainy morning"]);
    assert_eq!(find(&view["daily"], "Buy milk")["type"], "task");
    assert_eq!(find(&view["daily"], "Buy milk")["status"], "incomplete");
    assert!(view["carryOver"].as_array().expect("array").is_empty());

    let plain = journal.run("2024-03-10", &["view"]);
    assert_success(&plain);
    let text = String::from_utf8_lossy(&plain.stdout);
    assert!(text.contains("Buy milk"));
    assert!(text.contains("[ ]"));
}

#[test]
fn test_overdue_task_carries_into_today() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "task", "File taxes"]);

    let view = journal.view("2024-03-12", None);
    let carried = find(&view["daily"], "File taxes");
    assert_eq!(carried["date"], "2024-03-12");
    assert_eq!(carried["originalDate"], "2024-03-10");
    assert_ne!(carried["id"], id.as_str());

    // The original day keeps no active copy.
    let past = journal.view("2024-03-12", Some("2024-03-10"));
    assert!(contents(&past["daily"]).is_empty());

    // A second look carries nothing twice.
    let again = journal.view("2024-03-12", None);
    assert_eq!(contents(&again["daily"]), vec!["File taxes"]);
}

#[test]
fn test_past_day_view_does_not_carry() {
    let journal = TestJournal::new();
    journal.run_id("2024-03-10", &["add", "task", "Call mom"]);

    let view = journal.view("2024-03-12", Some("2024-03-11"));
    assert!(contents(&view["daily"]).is_empty());

    let source = journal.view("2024-03-12", Some("2024-03-10"));
    assert_eq!(contents(&source["daily"]), vec!["Call mom"]);
}

#[test]
fn test_goals_show_every_day_until_done() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "goal", "Run a marathon"]);

    let later = journal.view("2024-04-01", None);
    assert_eq!(contents(&later["carryOver"]), vec!["Run a marathon"]);
    assert!(contents(&later["daily"]).is_empty());

    journal.run_id("2024-04-01", &["done", &id]);
    let after = journal.view("2024-04-02", None);
    assert!(contents(&after["carryOver"]).is_empty());
}

#[test]
fn test_done_and_undo_toggle_status() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "task", "Water plants"]);

    journal.run_id("2024-03-10", &["done", &id[..8]]);
    let view = journal.view("2024-03-10", None);
    assert_eq!(find(&view["daily"], "Water plants")["status"], "complete");

    journal.run_id("2024-03-10", &["undo", &id]);
    let view = journal.view("2024-03-10", None);
    assert_eq!(find(&view["daily"], "Water plants")["status"], "incomplete");
}

#[test]
fn test_completed_task_stays_on_its_day() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "task", "Pay rent"]);
    journal.run_id("2024-03-10", &["done", &id]);

    let today = journal.view("2024-03-11", None);
    assert!(contents(&today["daily"]).is_empty());

    let past = journal.view("2024-03-11", Some("2024-03-10"));
    assert_eq!(contents(&past["daily"]), vec!["Pay rent"]);
}

#[test]
fn test_edit_and_delete() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "note", "Draft"]);

    journal.run_id("2024-03-10", &["edit", &id, "Final", "text"]);
    let view = journal.view("2024-03-10", None);
    assert_eq!(contents(&view["daily"]), vec!["Final text"]);

    let output = journal.run("2024-03-10", &["delete", &id]);
    assert_success(&output);
    let view = journal.view("2024-03-10", None);
    assert!(contents(&view["daily"]).is_empty());
}

#[test]
fn test_migrate_moves_task_forward() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "task", "Renew passport"]);

    let clone_id = journal.run_id("2024-03-10", &["migrate", &id, "2024-03-15"]);
    assert_ne!(clone_id, id);

    let source = journal.view("2024-03-10", None);
    assert!(contents(&source["daily"]).is_empty());

    let target = journal.view("2024-03-10", Some("2024-03-15"));
    let moved = find(&target["daily"], "Renew passport");
    assert_eq!(moved["id"], clone_id.as_str());
    assert_eq!(moved["migratedFrom"], "2024-03-10");
    assert_eq!(moved["status"], "incomplete");

    // The original is retired and cannot be migrated again.
    let again = journal.run("2024-03-10", &["migrate", &id, "2024-03-16"]);
    assert_eq!(again.status.code(), Some(3));
}

#[test]
fn test_migrate_rejects_non_task() {
    let journal = TestJournal::new();
    let id = journal.run_id("2024-03-10", &["add", "note", "Not movable"]);
    let output = journal.run("2024-03-10", &["migrate", &id, "tomorrow"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_reflect_keeps_one_entry_per_day() {
    let journal = TestJournal::new();
    journal.run_id("2024-03-10", &["reflect", "morning", "Slept well"]);
    journal.run_id("2024-03-10", &["reflect", "morning", "Slept very well"]);

    let view = journal.view("2024-03-10", None);
    let daily = view["daily"].as_array().expect("array");
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["type"], "morningJournal");
    assert_eq!(daily[0]["content"], "Slept very well");
}

#[test]
fn test_add_reflection_twice_keeps_one_entry() {
    let journal = TestJournal::new();
    let first = journal.run_id("2024-03-10", &["add", "gratitude", "Family"]);
    let second = journal.run_id("2024-03-10", &["add", "gratitude", "Health"]);
    let third = journal.run_id("2024-03-10", &["reflect", "gratitude", "Sunshine"]);
    assert_eq!(first, second);
    assert_eq!(second, third);

    let view = journal.view("2024-03-10", None);
    let gratitude: Vec<&Value> = view["daily"]
        .as_array()
        .expect("array")
        .iter()
        .filter(|entry| entry["type"] == "gratitude")
        .collect();
    assert_eq!(gratitude.len(), 1);
    assert_eq!(gratitude[0]["content"], "Sunshine");
}

#[test]
fn test_missing_entry_exits_not_found() {
    let journal = TestJournal::new();
    let output = journal.run("2024-03-10", &["done", "ffffffff"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Entry not found"));
}

#[test]
fn test_invalid_input_exit_codes() {
    let journal = TestJournal::new();
    let unknown = journal.run("2024-03-10", &["add", "chore", "Sweep"]);
    assert_eq!(unknown.status.code(), Some(4));

    let bad_date = journal.run("2024-03-10", &["view", "--date", "03/10/2024"]);
    assert_eq!(bad_date.status.code(), Some(4));
}

#[test]
fn test_wrong_passphrase_exits_auth_failed() {
    let journal = TestJournal::new();
    let output = journal
        .command("2024-03-10")
        .env("DAYLOG_PASSPHRASE", "not-the-passphrase")
        .arg("view")
        .output()
        .expect("run view");
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_missing_config_exits_not_found() {
    let journal = TestJournal::empty();
    let output = journal.run("2024-03-10", &["view"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("daylog init"));
}

#[test]
fn test_settings_round_trip() {
    let journal = TestJournal::new();
    let set = journal.run("2024-03-10", &["settings", "set", "theme", "dark"]);
    assert_success(&set);

    let show = journal.run("2024-03-10", &["settings", "show", "--json"]);
    assert_success(&show);
    let settings: Value = serde_json::from_slice(&show.stdout).expect("settings json");
    assert_eq!(settings["theme"], "dark");
    assert_eq!(settings["language"], "en");
    assert_eq!(settings["notifications"], true);

    let bad = journal.run("2024-03-10", &["settings", "set", "font", "serif"]);
    assert_eq!(bad.status.code(), Some(4));
}

#[test]
fn test_inspire_needs_no_journal() {
    let journal = TestJournal::empty();
    let output = journal.run("2024-01-01", &["inspire", "--json"]);
    assert_success(&output);
    let passage: Value = serde_json::from_slice(&output.stdout).expect("json");
    // January 1st is ordinal 1.
    assert_eq!(passage["id"], 2);

    let same = journal.run("2024-01-01", &["inspire", "--json"]);
    assert_eq!(output.stdout, same.stdout);
}

#[test]
fn test_check_passes_on_fresh_journal() {
    let journal = TestJournal::new();
    journal.run_id("2024-03-10", &["add", "task", "Something"]);
    let output = journal.run("2024-03-10", &["check"]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Integrity check passed"));
}

#[test]
fn test_ephemeral_session_leaves_file_untouched() {
    let journal = TestJournal::new();
    let before = std::fs::read(journal.journal_path()).expect("read");

    let output = journal.run("2024-03-10", &["--ephemeral", "add", "task", "Scratch"]);
    assert_success(&output);

    let after = std::fs::read(journal.journal_path()).expect("read");
    assert_eq!(before, after);
    let view = journal.view("2024-03-10", None);
    assert!(contents(&view["daily"]).is_empty());
}

#[test]
fn test_journal_flag_overrides_config() {
    let journal = TestJournal::new();
    let other = journal.dir.path().join("other.daylog");
    daylog_core::AgeSqliteStore::create(&other, PASSPHRASE).expect("create");

    journal.run_id(
        "2024-03-10",
        &["--journal", path_str(&other), "add", "task", "Elsewhere"],
    );
    assert!(contents(&journal.view("2024-03-10", None)["daily"]).is_empty());
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}
