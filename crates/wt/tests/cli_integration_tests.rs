//! CLI integration tests for wt commands

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

/// Temp layout: `<root>/widget` (repository), `<root>/trees` (base), `<root>/config`
struct TestRepo {
    _temp: tempfile::TempDir,
    root: PathBuf,
    repo: PathBuf,
    base: PathBuf,
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

impl TestRepo {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("failed to create temp dir");
        let root = fs::canonicalize(temp.path()).expect("canonicalize");
        let repo = root.join("widget");
        fs::create_dir_all(&repo).expect("mkdir repo");
        git(&repo, &["init", "-b", "main"]);
        git(&repo, &["config", "user.email", "test@example.com"]);
        git(&repo, &["config", "user.name", "Test User"]);
        git(&repo, &["config", "commit.gpgsign", "false"]);
        fs::write(repo.join("README.md"), "# widget\n").expect("write README");
        git(&repo, &["add", "."]);
        git(&repo, &["commit", "-m", "Initial commit"]);

        Self {
            base: root.join("trees"),
            _temp: temp,
            root,
            repo,
        }
    }

    /// Run wt in `dir` with an isolated configuration
    fn wt_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_wt"))
            .args(args)
            .current_dir(dir)
            .env("WT_WORKTREES_DIR", &self.base)
            .env("XDG_CONFIG_HOME", self.root.join("config"))
            .env("GIT_CEILING_DIRECTORIES", &self.root)
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run wt")
    }

    fn wt(&self, args: &[&str]) -> Output {
        self.wt_in(&self.repo, args)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("invalid JSON ({}): {}", e, stdout(output));
    })
}

#[test]
fn test_no_subcommand_prints_version() {
    let t = TestRepo::new();
    let output = t.wt(&[]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("wt v"));
}

#[test]
fn test_new_branch_lands_in_managed_directory() {
    let t = TestRepo::new();
    let output = t.wt(&["new", "feature/login"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let expected = t.base.join("widget").join("feature-login");
    assert!(stdout(&output).contains(&expected.display().to_string()));
    assert!(expected.join("README.md").exists());
}

#[test]
fn test_new_tag_json() {
    let t = TestRepo::new();
    git(&t.repo, &["tag", "v1.0.0"]);

    let output = t.wt(&["--json", "new", "v1.0.0"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value = json(&output);
    assert_eq!(value["status"], "ok");
    assert_eq!(value["command"], "new");
    assert_eq!(value["data"]["branch"], "tags-v1.0.0");
    assert_eq!(value["data"]["strategy"], "by_tag");
    assert!(t.base.join("widget").join("tags-v1.0.0").exists());
}

#[test]
fn test_new_explicit_relative_path() {
    let t = TestRepo::new();
    let output = t.wt(&["add", "scratch", "--path", "../elsewhere/scratch"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(t.root.join("elsewhere").join("scratch").join("README.md").exists());
}

#[test]
fn test_new_twice_fails_with_hint() {
    let t = TestRepo::new();
    assert!(t.wt(&["new", "topic"]).status.success());

    let output = t.wt(&["new", "topic"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("already exists"), "stderr: {}", err);
    assert!(err.contains("hint:"), "stderr: {}", err);
}

#[test]
fn test_list_json_reports_status() {
    let t = TestRepo::new();
    assert!(t.wt(&["new", "topic"]).status.success());
    fs::write(t.base.join("widget").join("topic").join("notes.txt"), "wip").expect("write");

    let output = t.wt(&["ls", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value = json(&output);
    let worktrees = value["data"]["worktrees"].as_array().expect("array");
    assert_eq!(worktrees.len(), 2);
    assert_eq!(worktrees[0]["primary"], true);
    assert_eq!(worktrees[0]["status"]["state"], "clean");
    assert_eq!(worktrees[1]["label"], "topic");
    assert_eq!(worktrees[1]["status"]["state"], "dirty");
    assert_eq!(worktrees[1]["status"]["untracked"], 1);
}

#[test]
fn test_list_survives_broken_worktree() {
    let t = TestRepo::new();
    assert!(t.wt(&["new", "a"]).status.success());
    assert!(t.wt(&["new", "b"]).status.success());
    fs::write(t.base.join("widget").join("a").join(".git"), "gitdir: /nonexistent\n")
        .expect("overwrite .git");

    let output = t.wt(&["list", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value = json(&output);
    let worktrees = value["data"]["worktrees"].as_array().expect("array");
    assert_eq!(worktrees.len(), 3);
    let row = |label: &str| {
        worktrees
            .iter()
            .find(|w| w["label"] == label)
            .unwrap_or_else(|| panic!("no row for {}", label))
    };
    assert_eq!(row("a")["status"]["state"], "unknown");
    assert_eq!(row("b")["status"]["state"], "clean");

    let human = t.wt(&["list"]);
    assert!(human.status.success(), "stderr: {}", stderr(&human));
    assert!(stdout(&human).contains("unknown"));
}

#[test]
fn test_new_checked_out_branch_explains_why() {
    let t = TestRepo::new();
    let output = t.wt(&["new", "main"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("could not check out 'main'"), "stderr: {}", err);
    assert!(err.contains("already"), "stderr: {}", err);
    assert!(!t.base.join("widget").exists());
}

#[test]
fn test_pr_existing_worktree_is_reused() {
    // no origin remote: any fetch would fail
    let t = TestRepo::new();
    fs::create_dir_all(t.base.join("widget").join("pr-123")).expect("mkdir");

    let output = t.wt(&["--json", "pr", "123"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["data"]["number"], 123);
    assert_eq!(value["data"]["created"], false);
}

#[test]
fn test_pr_invalid_reference() {
    let t = TestRepo::new();
    let output = t.wt(&["--json", "pr", "not-a-number"]);
    assert_eq!(output.status.code(), Some(1));

    let value = json(&output);
    assert_eq!(value["status"], "error");
    assert_eq!(value["issues"][0]["code"], "invalid_input");
}

#[test]
fn test_pr_fetch_failure() {
    let t = TestRepo::new();
    let output = t.wt(&["pr", "https://github.com/acme/widget/pull/77"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("PR #77"));
    assert!(!t.base.join("widget").join("pr-77").exists());
}

#[test]
fn test_prune_sweeps_empty_directories() {
    let t = TestRepo::new();
    assert!(t.wt(&["new", "doomed"]).status.success());
    fs::remove_dir_all(t.base.join("widget").join("doomed")).expect("rm worktree");

    let output = t.wt(&["--json", "prune"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let value = json(&output);
    assert_eq!(value["data"]["removed_dirs"], 1);
    assert!(!t.base.join("widget").exists());
    assert!(t.base.exists());

    let list = json(&t.wt(&["list", "--json"]));
    assert_eq!(list["data"]["worktrees"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_outside_repository() {
    let t = TestRepo::new();
    let outside = t.root.join("plain");
    fs::create_dir_all(&outside).expect("mkdir");

    let output = t.wt_in(&outside, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not inside a git repository"));
}

#[test]
fn test_doctor_json() {
    let t = TestRepo::new();
    let output = t.wt(&["doctor", "--json"]);
    assert!(output.status.success(), "stdout: {}", stdout(&output));

    let value = json(&output);
    assert_eq!(value["command"], "doctor");
    assert_eq!(value["data"]["config"]["worktrees_dir"], t.base.display().to_string());
    let checks = value["data"]["checks"].as_array().expect("checks");
    assert!(checks.iter().any(|c| c["name"] == "git" && c["status"] == "pass"));
    assert!(checks.iter().any(|c| c["name"] == "repository" && c["status"] == "pass"));
}
