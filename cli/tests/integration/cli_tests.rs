//! End-to-end tests for the `agentctl` binary.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = "\
label: io.example.agent
program: /usr/local/bin/agent
args: [service]
log_dir: /tmp/agent-logs
";

/// Temp workspace holding a config file and a LaunchAgents directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        std::fs::write(dir.path().join("environment.yaml"), CONFIG).expect("write config");
        Self { dir }
    }

    fn agents_dir(&self) -> PathBuf {
        self.dir.path().join("LaunchAgents")
    }

    fn installed(&self) -> PathBuf {
        self.agents_dir().join("io.example.agent.plist")
    }

    fn calls_log(&self) -> PathBuf {
        self.dir.path().join("launchctl.log")
    }

    /// Stand-in launchctl: logs its arguments, prints a job table for `list`
    /// and fails `load` when `fail_load` is set.
    #[cfg(unix)]
    fn fake_launchctl(&self, fail_load: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("launchctl");
        let load = if fail_load {
            "echo 'Load failed: 5: Input/output error' >&2; exit 5"
        } else {
            "true"
        };
        let script = format!(
            "#!/bin/sh\n\
             echo \"$@\" >> '{log}'\n\
             case \"$1\" in\n\
             list) printf 'PID\\tStatus\\tLabel\\n4242\\t0\\tio.example.agent\\n' ;;\n\
             load) {load} ;;\n\
             esac\n",
            log = self.calls_log().display(),
        );
        std::fs::write(&path, script).expect("write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentctl"));
        cmd.env("NO_COLOR", "1")
            .env("AGENTCTL_CONFIG", self.dir.path().join("environment.yaml"))
            .env("AGENTCTL_LAUNCH_AGENTS_DIR", self.agents_dir())
            .env_remove("AGENTCTL_RUN_MODE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn cmd_with_launchctl(&self, launchctl: &Path) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AGENTCTL_LAUNCHCTL", launchctl);
        cmd
    }
}

// --- Help and version ---

/// Binary with none of the env-backed arguments set.
fn bare_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentctl"));
    for var in [
        "NO_COLOR",
        "AGENTCTL_CONFIG",
        "AGENTCTL_RUN_MODE",
        "AGENTCTL_LAUNCH_AGENTS_DIR",
        "AGENTCTL_LAUNCHCTL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    bare_cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage: agentctl"))
        .stderr(predicate::str::contains("launchd agent"));
}

#[test]
fn test_cli_no_args_shows_help_with_env_set() {
    Workspace::new()
        .cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage: agentctl"));
}

#[test]
fn test_no_color_accepts_conventional_values() {
    let ws = Workspace::new();
    for value in ["1", "yes", "true", "0", ""] {
        ws.cmd()
            .env("NO_COLOR", value)
            .arg("print")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<?xml"));
    }
}

#[test]
fn test_cli_help_lists_commands() {
    Workspace::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("reload"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_version_command_json() {
    let output = Workspace::new()
        .cmd()
        .env("AGENTCTL_CONFIG", "/nonexistent/environment.yaml")
        .args(["version", "--json"])
        .output()
        .expect("run version");

    assert!(output.status.success(), "version must not need a config file");
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["name"], "agentctl");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

// --- print / install / uninstall ---

#[test]
fn test_print_renders_descriptor() {
    Workspace::new()
        .cmd()
        .arg("print")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<string>io.example.agent</string>"))
        .stdout(predicate::str::contains(
            "<string>/tmp/agent-logs/io.example.agent.log</string>",
        ));
}

#[test]
fn test_print_run_mode_override() {
    Workspace::new()
        .cmd()
        .args(["print", "--run-mode", "devel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<string>devel</string>"));
}

#[test]
fn test_print_rejects_unknown_run_mode() {
    Workspace::new()
        .cmd()
        .args(["print", "--run-mode", "beta"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("prod, staging, devel"));
}

#[test]
fn test_install_writes_printed_descriptor() {
    let ws = Workspace::new();
    let printed = ws.cmd().arg("print").output().expect("run print");

    ws.cmd()
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed"));

    assert_eq!(std::fs::read(ws.installed()).unwrap(), printed.stdout);
}

#[test]
fn test_uninstall_removes_descriptor() {
    let ws = Workspace::new();
    ws.cmd().arg("install").assert().success();
    ws.cmd()
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    assert!(!ws.installed().exists());
}

#[test]
fn test_missing_config_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .env("AGENTCTL_CONFIG", ws.dir.path().join("nope.yaml"))
        .arg("print")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

// --- launchctl-backed commands ---

#[cfg(unix)]
#[test]
fn test_status_json_reports_pid_from_list() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(false);
    ws.cmd().arg("install").assert().success();

    let output = ws
        .cmd_with_launchctl(&launchctl)
        .args(["status", "--json"])
        .output()
        .expect("run status");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["pid"], 4242);
    assert_eq!(v["running"], true);
    assert_eq!(v["installed"], "current");
}

#[test]
fn test_install_and_uninstall_json_reports() {
    let ws = Workspace::new();

    let output = ws.cmd().args(["install", "--json"]).output().expect("run install");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["label"], "io.example.agent");
    assert_eq!(v["path"], ws.installed().display().to_string());

    let output = ws.cmd().args(["uninstall", "--json"]).output().expect("run uninstall");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["removed"], true);
}

#[test]
fn test_print_json_wraps_descriptor() {
    let ws = Workspace::new();
    let raw = ws.cmd().arg("print").output().expect("run print");

    let output = ws.cmd().args(["print", "--json"]).output().expect("run print --json");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["descriptor"], String::from_utf8(raw.stdout).unwrap());
}

#[cfg(unix)]
#[test]
fn test_load_json_reports_action() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(false);
    ws.cmd().arg("install").assert().success();

    let output = ws
        .cmd_with_launchctl(&launchctl)
        .args(["load", "--json"])
        .output()
        .expect("run load");

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["label"], "io.example.agent");
    assert_eq!(v["action"], "loaded");
}

#[cfg(unix)]
#[test]
fn test_load_force_passes_w_flag() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(false);
    ws.cmd().arg("install").assert().success();

    ws.cmd_with_launchctl(&launchctl)
        .args(["load", "--force"])
        .assert()
        .success();

    let log = std::fs::read_to_string(ws.calls_log()).unwrap();
    assert_eq!(log, format!("load -w {}\n", ws.installed().display()));
}

#[cfg(unix)]
#[test]
fn test_load_failure_exits_non_zero_with_output() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(true);
    ws.cmd().arg("install").assert().success();

    ws.cmd_with_launchctl(&launchctl)
        .arg("load")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input/output error"));
}

#[cfg(unix)]
#[test]
fn test_load_failure_json_error_object() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(true);
    ws.cmd().arg("install").assert().success();

    let output = ws
        .cmd_with_launchctl(&launchctl)
        .args(["load", "--json"])
        .output()
        .expect("run load");

    assert_eq!(output.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "SERVICE_MANAGER");
}

#[cfg(unix)]
#[test]
fn test_reload_runs_unload_then_load_then_list() {
    let ws = Workspace::new();
    let launchctl = ws.fake_launchctl(false);
    ws.cmd().arg("install").assert().success();

    ws.cmd_with_launchctl(&launchctl)
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("pid 4242"));

    let path = ws.installed().display().to_string();
    let log = std::fs::read_to_string(ws.calls_log()).unwrap();
    assert_eq!(log, format!("unload {path}\nload {path}\nlist\n"));
}

#[test]
fn test_missing_launchctl_is_process_invocation_error() {
    let ws = Workspace::new();
    ws.cmd().arg("install").assert().success();
    ws.cmd_with_launchctl(&ws.dir.path().join("no-such-launchctl"))
        .args(["status", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("PROCESS_INVOCATION"));
}
