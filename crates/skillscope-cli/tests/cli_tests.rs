//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn skillscope(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("skillscope").unwrap();
    // Pin HOME so a developer's global config cannot leak into the tests.
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

fn init(dir: &TempDir) {
    skillscope(dir).arg("init").assert().success();
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    skillscope(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Team skill evaluation tracker"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    skillscope(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skillscope"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    skillscope(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created skillscope.toml"))
        .stdout(predicate::str::contains("Created skillscope.json"));

    assert!(dir.path().join("skillscope.toml").exists());
    assert!(dir.path().join("skillscope.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn commands_require_a_store_file() {
    let dir = TempDir::new().unwrap();
    skillscope(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("skillscope init"));
}

#[test]
fn add_member_then_show() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .args(["member", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Member 1"));

    skillscope(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"))
        .stdout(predicate::str::contains("3.0"));
}

#[test]
fn rate_updates_the_shown_average() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["rate", "1", "strategy", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set Strategy to 5"));

    skillscope(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("3.2"));
}

#[test]
fn rate_rejects_bad_level_and_unknown_key() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["rate", "1", "strategy", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    skillscope(&dir)
        .args(["rate", "1", "charisma", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown competency"));

    skillscope(&dir)
        .args(["rate", "42", "strategy", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no member with id 42"));
}

#[test]
fn show_member_detail_includes_rubric_text() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["show", "--member", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strengths:"))
        .stdout(predicate::str::contains("Weaknesses:"));
}

#[test]
fn snapshot_rejects_empty_or_bad_dates() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["snapshot", "record", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));

    skillscope(&dir)
        .args(["snapshot", "record", "junk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unparseable"));
}

#[test]
fn snapshot_record_and_list() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["snapshot", "record", "2024-01-01", "--memo", "baseline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded snapshot"));

    skillscope(&dir)
        .args(["snapshot", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01"))
        .stdout(predicate::str::contains("baseline"));
}

#[test]
fn timeline_runs_chronologically_and_ends_current() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();
    skillscope(&dir)
        .args(["snapshot", "record", "2024-01-01"])
        .assert()
        .success();
    skillscope(&dir)
        .args(["rate", "1", "strategy", "5"])
        .assert()
        .success();
    skillscope(&dir)
        .args(["snapshot", "record", "2024-06-01"])
        .assert()
        .success();

    let output = skillscope(&dir)
        .args(["timeline", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01"))
        .stdout(predicate::str::contains("2024-06-01"))
        .stdout(predicate::str::contains("current"))
        .stdout(predicate::str::contains("Growth: +0.2"));

    // Chronological order: January before June before current.
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let jan = stdout.find("2024-01-01").unwrap();
    let jun = stdout.find("2024-06-01").unwrap();
    let current = stdout.find("current").unwrap();
    assert!(jan < jun && jun < current);
}

#[test]
fn timeline_for_missing_member_fails() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .args(["timeline", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn stats_lists_strengths_and_weaknesses() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();
    skillscope(&dir)
        .args(["rate", "1", "creativity", "5"])
        .assert()
        .success();
    skillscope(&dir)
        .args(["rate", "1", "support", "1"])
        .assert()
        .success();

    skillscope(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Team strengths:  Creativity (5.0)"))
        .stdout(predicate::str::contains("Team weaknesses: Support (1.0)"));
}

#[test]
fn export_then_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();
    skillscope(&dir)
        .args(["rate", "1", "planning", "4"])
        .assert()
        .success();

    skillscope(&dir)
        .args(["export", "--output", "team.json"])
        .assert()
        .success();

    let exported = std::fs::read_to_string(dir.path().join("team.json")).unwrap();
    assert!(exported.contains("idealProfile"));
    assert!(exported.contains("evaluationHistory"));

    // Import into a second store file.
    skillscope(&dir)
        .args(["--store", "other.json", "import", "team.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 member(s)"));

    skillscope(&dir)
        .args(["--store", "other.json", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"));
}

#[test]
fn chart_commands_write_svg_files() {
    let dir = TempDir::new().unwrap();
    init(&dir);
    skillscope(&dir).args(["member", "add"]).assert().success();

    skillscope(&dir)
        .args(["chart", "radar", "1", "--output", "radar.svg"])
        .assert()
        .success();
    skillscope(&dir)
        .args(["chart", "scatter", "--output", "scatter.svg"])
        .assert()
        .success();

    let radar = std::fs::read_to_string(dir.path().join("radar.svg")).unwrap();
    assert!(radar.starts_with("<svg"));
    let scatter = std::fs::read_to_string(dir.path().join("scatter.svg")).unwrap();
    assert!(scatter.contains("<circle"));
}

#[test]
fn rubric_prints_all_levels() {
    let dir = TempDir::new().unwrap();
    skillscope(&dir)
        .args(["rubric", "planning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning"))
        .stdout(predicate::str::contains("5"));
}

#[test]
fn sync_without_backend_fails_with_hint() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .args(["sync", "push"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no backend configured"));
}

#[test]
fn session_edits_persist_on_quit() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .arg("session")
        .write_stdin("add\nrate 1 strategy 5\nstatus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added member 1"))
        .stdout(predicate::str::contains("unsaved changes"))
        .stdout(predicate::str::contains("Session ended."));

    skillscope(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Member 1"))
        .stdout(predicate::str::contains("3.2"));
}

#[test]
fn session_rejects_unknown_commands_without_exiting() {
    let dir = TempDir::new().unwrap();
    init(&dir);

    skillscope(&dir)
        .arg("session")
        .write_stdin("frobnicate\nadd\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command"))
        .stdout(predicate::str::contains("Added member 1"));
}
