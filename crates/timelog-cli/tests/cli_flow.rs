use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_timelog"))
}

/// Isolated config/data dirs plus a database path for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("config")).expect("config dir");
        std::fs::create_dir_all(dir.path().join("data")).expect("data dir");
        Self { dir }
    }

    /// Sandbox with `init --timezone UTC` already run.
    fn initialized() -> Self {
        let sandbox = Self::new();
        let output = sandbox.run(&["init", "--timezone", "UTC"]);
        assert!(output.status.success(), "init failed: {}", stderr(&output));
        sandbox
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn db_path(&self) -> PathBuf {
        self.path().join("data").join("timelog").join("timelog.db")
    }

    fn config_path(&self) -> PathBuf {
        self.path().join("config").join("timelog").join("config.toml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("TIMELOG_DB")
            .env_remove("TIMELOG_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run timelog")
    }

    /// Run `add -q` and return the new entry ID.
    fn add(&self, args: &[&str]) -> String {
        let mut full = vec!["-q", "add"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(output.status.success(), "add failed: {}", stderr(&output));
        stdout(&output).trim().to_string()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_init_writes_config_and_database() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["init", "--timezone", "Europe/Berlin", "--display", "utc"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("status=ok"));

    let config = std::fs::read_to_string(sandbox.config_path()).unwrap();
    assert!(config.contains("Europe/Berlin"));
    assert!(config.contains("display = \"utc\""));
    assert!(sandbox.db_path().exists());

    let again = sandbox.run(&["init"]);
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("Config already exists"));

    let forced = sandbox.run(&["init", "--force"]);
    assert!(forced.status.success(), "stderr: {}", stderr(&forced));
}

#[test]
fn test_init_rejects_unknown_timezone() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["init", "--timezone", "Mars/Olympus"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Invalid timezone"));
    assert!(!sandbox.config_path().exists());
}

#[test]
fn test_runs_without_config_file() {
    let sandbox = Sandbox::new();
    let db = sandbox.path().join("explicit.db");
    let db_arg = db.to_string_lossy().to_string();

    let output = sandbox.run(&["--db", &db_arg, "add", "Standup", "--at", "2024-01-15T09:30:00Z"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(db.exists());

    let list = sandbox.run(&["--db", &db_arg, "list", "--utc"]);
    assert!(stdout(&list).contains("2024-01-15 09:30:00 UTC\tStandup"));
}

#[test]
fn test_add_and_list() {
    let sandbox = Sandbox::initialized();

    let output = sandbox.run(&["add", "Standup", "--at", "2024-01-15T09:30", "--notes", "daily"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("status=ok"));
    assert!(out.contains("time=01/15/2024, 09:30:00 AM (Local)"));
    assert!(out.contains("description=Standup"));

    sandbox.add(&["Code review", "--at", "2024-01-15T14:00"]);

    let list = sandbox.run(&["list", "--utc"]);
    assert!(list.status.success());
    let lines: Vec<String> = stdout(&list).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("\t2024-01-15 14:00:00 UTC\tCode review\t"));
    assert!(lines[1].ends_with("\t2024-01-15 09:30:00 UTC\tStandup\tdaily"));

    let limited = sandbox.run(&["list", "--limit", "1"]);
    let out = stdout(&limited);
    assert_eq!(out.lines().count(), 1);
    assert!(out.contains("01/15/2024, 02:00:00 PM (Local)"));
}

#[test]
fn test_add_requires_description() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["add", "--at", "2024-01-15T09:30"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Please enter both date/time and description"));

    let bad_time = sandbox.run(&["add", "Standup", "--at", "yesterday-ish"]);
    assert_eq!(bad_time.status.code(), Some(4));
}

#[test]
fn test_list_json_and_html() {
    let sandbox = Sandbox::initialized();
    let id = sandbox.add(&["<b>Deploy</b> & verify", "--at", "2024-02-01T08:00:00Z"]);

    let json = sandbox.run(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&json).trim()).unwrap();
    assert_eq!(parsed[0]["id"], id.as_str());
    assert_eq!(parsed[0]["timestamp"], "2024-02-01T08:00:00.000Z");
    assert_eq!(parsed[0]["description"], "<b>Deploy</b> & verify");

    let html = sandbox.run(&["list", "--format", "html"]);
    let out = stdout(&html);
    assert!(out.contains("&lt;b&gt;Deploy&lt;/b&gt; &amp; verify"));
    assert!(!out.contains("<b>Deploy"));
}

#[test]
fn test_quick_capture_then_edit() {
    let sandbox = Sandbox::initialized();

    let output = sandbox.run(&["quick", "--at", "2024-03-10T16:45", "--no-input"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("description=(Click to add description)"));
    assert!(out.contains("timelog edit"));

    let list = sandbox.run(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&list).trim()).unwrap();
    assert_eq!(parsed[0]["quick"], true);
    let id = parsed[0]["id"].as_str().unwrap().to_string();

    let edit = sandbox.run(&[
        "edit",
        &id,
        "--description",
        "Bug triage",
        "--notes",
        "ticket 77",
        "--no-input",
    ]);
    assert!(edit.status.success(), "stderr: {}", stderr(&edit));
    assert!(stdout(&edit).contains("description=Bug triage"));

    let list = sandbox.run(&["list", "--utc"]);
    assert!(stdout(&list).contains("\t2024-03-10 16:45:00 UTC\tBug triage\tticket 77"));
}

#[test]
fn test_quick_capture_now() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["-q", "quick", "--no-input"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let id = stdout(&output).trim().to_string();
    assert!(!id.is_empty());

    let list = sandbox.run(&["list"]);
    assert!(stdout(&list).starts_with(&format!("{}\t", id)));
}

#[test]
fn test_edit_unknown_entry() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["edit", "nope", "--description", "x", "--no-input"]);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("Entry nope not found"));
    assert!(err.contains("timelog list"));
}

#[test]
fn test_edit_keeps_unspecified_fields() {
    let sandbox = Sandbox::initialized();
    let id = sandbox.add(&["Planning", "--at", "2024-01-15T09:30", "--notes", "Q1"]);

    let output = sandbox.run(&["edit", &id, "--at", "2024-01-15T10:00", "--no-input"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let list = sandbox.run(&["list", "--utc"]);
    assert!(stdout(&list).contains(&format!("{}\t2024-01-15 10:00:00 UTC\tPlanning\tQ1", id)));

    let cleared = sandbox.run(&["edit", &id, "--notes", "", "--no-input"]);
    assert!(cleared.status.success());
    let list = sandbox.run(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&list).trim()).unwrap();
    assert_eq!(parsed[0]["notes"], serde_json::Value::Null);
}

#[test]
fn test_notes_only_edit_keeps_stored_time() {
    let sandbox = Sandbox::new();
    let init = sandbox.run(&["init", "--timezone", "America/New_York"]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));
    let id = sandbox.add(&["Late deploy", "--at", "2024-11-03T06:30:00.250Z"]);

    let output = sandbox.run(&["edit", &id, "--notes", "rollback plan", "--no-input"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let list = sandbox.run(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&list).trim()).unwrap();
    assert_eq!(parsed[0]["timestamp"], "2024-11-03T06:30:00.250Z");
    assert_eq!(parsed[0]["notes"], "rollback plan");
}

#[test]
fn test_delete_entry() {
    let sandbox = Sandbox::initialized();
    let keep = sandbox.add(&["Keep", "--at", "2024-01-15T09:00"]);
    let drop = sandbox.add(&["Drop", "--at", "2024-01-15T10:00"]);

    let output = sandbox.run(&["delete", &drop]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("status=ok"));

    let list = sandbox.run(&["list"]);
    let out = stdout(&list);
    assert!(out.contains(&keep));
    assert!(!out.contains(&drop));

    let missing = sandbox.run(&["delete", "no-such-id"]);
    assert!(missing.status.success());
    assert!(stdout(&missing).contains("nothing deleted"));
}

#[test]
fn test_clear_requires_confirmation() {
    let sandbox = Sandbox::initialized();
    sandbox.add(&["One", "--at", "2024-01-15T09:00"]);
    sandbox.add(&["Two", "--at", "2024-01-15T10:00"]);

    let refused = sandbox.run(&["clear"]);
    assert_eq!(refused.status.code(), Some(4));
    assert!(stderr(&refused).contains("--force"));
    assert_eq!(stdout(&sandbox.run(&["list"])).lines().count(), 2);

    let forced = sandbox.run(&["clear", "--force"]);
    assert!(forced.status.success());
    assert!(stdout(&forced).contains("removed=2"));
    assert!(stdout(&sandbox.run(&["list"])).trim().is_empty());
}

#[test]
fn test_export_empty_log() {
    let sandbox = Sandbox::initialized();
    let output = sandbox.run(&["export", "--stdout"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("No entries to download"));
}

#[test]
fn test_export_to_stdout() {
    let sandbox = Sandbox::initialized();
    sandbox.add(&["Standup, daily", "--at", "2024-01-15T09:30:00Z", "--notes", "said \"hi\""]);

    let output = sandbox.run(&["export", "--stdout"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines[0],
        "Timestamp (ISO),Timestamp (Local),Timestamp (UTC),Description,Notes"
    );
    assert_eq!(
        lines[1],
        "2024-01-15T09:30:00.000Z,\"01/15/2024, 09:30:00 AM\",2024-01-15 09:30:00 UTC,\"Standup, daily\",\"said \"\"hi\"\"\""
    );
}

#[test]
fn test_export_to_directory() {
    let sandbox = Sandbox::initialized();
    sandbox.add(&["Standup", "--at", "2024-01-15T09:30"]);
    let out_dir = sandbox.path().join("exports");
    let out_arg = out_dir.to_string_lossy().to_string();

    let output = sandbox.run(&["export", "--output", &out_arg]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("entries=1"));

    let files: Vec<String> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("time_tracker_"));
    assert!(files[0].ends_with(".csv"));
}

#[test]
fn test_templates_flow() {
    let sandbox = Sandbox::initialized();

    let output = sandbox.run(&["-q", "template", "add", "  Code review  "]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let template_id = stdout(&output).trim().to_string();

    let blank = sandbox.run(&["template", "add", "   "]);
    assert_eq!(blank.status.code(), Some(4));
    assert!(stderr(&blank).contains("Please enter template name"));

    let list = sandbox.run(&["template", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&list).trim()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["name"], "Code review");

    let entry_id = sandbox.add(&["--template", &template_id, "--at", "2024-01-15T11:00"]);
    let entries = sandbox.run(&["list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(stdout(&entries).trim()).unwrap();
    assert_eq!(parsed[0]["id"], entry_id.as_str());
    assert_eq!(parsed[0]["description"], "Code review");

    let unknown = sandbox.run(&["add", "--template", "missing"]);
    assert_eq!(unknown.status.code(), Some(3));
    assert!(stderr(&unknown).contains("timelog template list"));

    let deleted = sandbox.run(&["template", "delete", &template_id]);
    assert!(deleted.status.success());
    let list = sandbox.run(&["template", "list"]);
    assert!(stdout(&list).trim().is_empty());
}

#[test]
fn test_storage_quota_failure_is_reported() {
    let sandbox = Sandbox::new();
    let db = sandbox.path().join("tiny.db");
    let config_dir = sandbox.path().join("config").join("timelog");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "[storage]\npath = \"{}\"\nquota_bytes = 64\n\n[ui]\ntimezone = \"UTC\"\n",
            db.to_string_lossy()
        ),
    )
    .unwrap();

    let output = sandbox.run(&["add", &"long description ".repeat(10), "--at", "2024-01-15T09:00"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not be saved"));

    let list = sandbox.run(&["list"]);
    assert!(list.status.success());
    assert!(stdout(&list).trim().is_empty());
}

#[test]
fn test_completions() {
    let output = Sandbox::new().run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("timelog"));
}
