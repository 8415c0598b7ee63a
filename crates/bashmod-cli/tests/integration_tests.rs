//! End-to-end tests that drive the `bashmod` binary against a local registry.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context with a temporary HOME, a local registry and its scripts
struct TestContext {
    temp_dir: TempDir,
    install_dir: PathBuf,
    registry: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = temp_dir.path();
        let scripts = root.join("scripts");
        std::fs::create_dir_all(&scripts).expect("failed to create scripts dir");

        write(
            &scripts.join("git-tools.sh"),
            "alias gs='git status'\nalias ll='ls -l'\ngcm() {\n  git commit -m \"$1\"\n}\n",
        );
        write(
            &scripts.join("ls-colors.sh"),
            "alias ll='ls -l --color'\nexport LS_COLORS=auto\n",
        );
        write(&scripts.join("prompt.sh"), "export PS1='$ '\n");

        let registry = root.join("mods").join("registry.json");
        std::fs::create_dir_all(registry.parent().unwrap()).unwrap();
        let doc = serde_json::json!({
            "version": "1.0",
            "modules": [
                {
                    "id": "git-tools",
                    "description": "Git shortcuts",
                    "version": "1.0",
                    "url": scripts.join("git-tools.sh"),
                    "category": "git",
                    "exports": {"aliases": ["gs", "ll"], "functions": ["gcm"], "variables": []}
                },
                {
                    "id": "ls-colors",
                    "description": "Colorful ls",
                    "version": "0.3",
                    "url": scripts.join("ls-colors.sh"),
                    "category": "shell",
                    "exports": {"aliases": ["ll"], "functions": [], "variables": ["LS_COLORS"]}
                },
                {
                    "id": "prompt",
                    "description": "Minimal PS1",
                    "version": "0.1",
                    "url": scripts.join("prompt.sh"),
                    "category": "prompt"
                }
            ]
        });
        write(&registry, &doc.to_string());

        let install_dir = root.join("bashrc.d");
        Self {
            temp_dir,
            install_dir,
            registry,
        }
    }

    fn bashmod(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_bashmod");
        let mut cmd = Command::new(bin_path);
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("BASHMOD_CONFIG", self.temp_dir.path().join("config.toml"));
        cmd.env("BASHMOD_INSTALL_DIR", &self.install_dir);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd.arg("--registry").arg(&self.registry);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.bashmod().args(args).output().expect("failed to run bashmod")
    }
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write fixture");
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_shows_catalog() {
    let ctx = TestContext::new();
    let output = ctx.run(&["list"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("git-tools"));
    assert!(out.contains("ls-colors"));
    assert!(out.contains("prompt"));
}

#[test]
fn test_list_json_carries_source_label() {
    let ctx = TestContext::new();
    let output = ctx.run(&["list", "--json", "--category", "git"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let modules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let modules = modules.as_array().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0]["id"], "git-tools");
    let expected_label = ctx.registry.parent().unwrap().to_string_lossy().into_owned();
    assert_eq!(modules[0]["source"], expected_label.as_str());
}

#[test]
fn test_search_is_case_insensitive() {
    let ctx = TestContext::new();
    let output = ctx.run(&["search", "COLORFUL"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("ls-colors"));
    assert!(!out.contains("git-tools"));
}

#[test]
fn test_install_list_remove_round_trip() {
    let ctx = TestContext::new();

    let output = ctx.run(&["install", "prompt"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let script = ctx.install_dir.join("prompt.sh");
    assert_eq!(std::fs::read_to_string(&script).unwrap(), "export PS1='$ '\n");

    let sidecar: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(ctx.install_dir.join(".bashmod-installed.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(sidecar["prompt"]["version"], "0.1");

    let output = ctx.run(&["list", "--installed", "--json"]);
    let installed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(installed.as_array().unwrap().len(), 1);

    let output = ctx.run(&["remove", "prompt"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!script.exists());

    let output = ctx.run(&["list", "--installed", "--json"]);
    let installed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(installed.as_array().unwrap().is_empty());
}

#[test]
fn test_install_with_version_pin() {
    let ctx = TestContext::new();

    let output = ctx.run(&["install", "prompt@9.9"]);
    assert!(!output.status.success());
    assert!(!ctx.install_dir.join("prompt.sh").exists());

    let output = ctx.run(&["install", "prompt@0.1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(ctx.install_dir.join("prompt.sh").exists());
}

#[test]
fn test_install_unknown_module_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["install", "nope"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("not found"));
}

#[test]
fn test_remove_unknown_module_is_not_an_error() {
    let ctx = TestContext::new();
    let output = ctx.run(&["remove", "nope"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("not installed"));
}

#[test]
fn test_conflicts_after_install() {
    let ctx = TestContext::new();

    let output = ctx.run(&["conflicts"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "No conflicts detected.");

    let output = ctx.run(&["install", "git-tools", "ls-colors"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = ctx.run(&["conflicts"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Found 1 conflict(s):"), "{out}");
    assert!(out.contains("alias 'll' in: git-tools, ls-colors"));

    let output = ctx.run(&["conflicts", "--declared", "--json"]);
    let conflicts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        conflicts,
        serde_json::json!([{"name": "ll", "type": "alias", "modules": ["git-tools", "ls-colors"]}])
    );
}

#[test]
fn test_conflicts_follow_edited_scripts() {
    let ctx = TestContext::new();
    let output = ctx.run(&["install", "git-tools", "ls-colors"]);
    assert!(output.status.success(), "{}", stderr(&output));

    // The user edits the installed copy; the rescan sees the change.
    write(&ctx.install_dir.join("ls-colors.sh"), "export LS_COLORS=auto\n");

    let output = ctx.run(&["conflicts"]);
    assert_eq!(stdout(&output).trim(), "No conflicts detected.");

    let output = ctx.run(&["conflicts", "--declared"]);
    assert!(stdout(&output).contains("alias 'll'"));
}

#[test]
fn test_unreachable_registry_fails_hard() {
    let ctx = TestContext::new();
    let missing = ctx.temp_dir.path().join("missing").join("registry.json");
    let output = Command::new(env!("CARGO_BIN_EXE_bashmod"))
        .env("HOME", ctx.temp_dir.path())
        .env("BASHMOD_CONFIG", ctx.temp_dir.path().join("config.toml"))
        .env("BASHMOD_INSTALL_DIR", &ctx.install_dir)
        .env("NO_COLOR", "1")
        .arg("--registry")
        .arg(&missing)
        .arg("list")
        .output()
        .expect("failed to run bashmod");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load any registry"));
}

#[test]
fn test_partial_registry_failure_is_a_warning() {
    let ctx = TestContext::new();
    let missing = ctx.temp_dir.path().join("missing").join("registry.json");
    let output = ctx
        .bashmod()
        .arg("--registry")
        .arg(&missing)
        .arg("list")
        .output()
        .expect("failed to run bashmod");
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("git-tools"));
    assert!(stderr(&output).contains("Failed to load"));
}

#[test]
fn test_config_file_sources() {
    let ctx = TestContext::new();
    write(
        &ctx.temp_dir.path().join("config.toml"),
        &format!("registries = [{:?}]\n", ctx.registry.to_string_lossy()),
    );

    let output = Command::new(env!("CARGO_BIN_EXE_bashmod"))
        .env("HOME", ctx.temp_dir.path())
        .env("BASHMOD_CONFIG", ctx.temp_dir.path().join("config.toml"))
        .env("BASHMOD_INSTALL_DIR", &ctx.install_dir)
        .env("NO_COLOR", "1")
        .arg("sources")
        .output()
        .expect("failed to run bashmod");
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains(&*ctx.registry.to_string_lossy()));
}

#[test]
fn test_malformed_config_is_reported() {
    let ctx = TestContext::new();
    write(&ctx.temp_dir.path().join("config.toml"), "registries = 42\n");
    let output = ctx.run(&["sources"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load configuration"));
}

#[test]
fn test_relative_install_dir_survives_cwd_change() {
    let ctx = TestContext::new();
    let home = ctx.temp_dir.path();

    let output = ctx
        .bashmod()
        .current_dir(home)
        .env("BASHMOD_INSTALL_DIR", "bashrc.d")
        .args(["install", "prompt"])
        .output()
        .expect("failed to run bashmod");
    assert!(output.status.success(), "{}", stderr(&output));

    let script = ctx.install_dir.join("prompt.sh");
    assert!(script.exists());
    let sidecar: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(ctx.install_dir.join(".bashmod-installed.json")).unwrap(),
    )
    .unwrap();
    let recorded = PathBuf::from(sidecar["prompt"]["installed_path"].as_str().unwrap());
    assert!(recorded.is_absolute(), "{}", recorded.display());

    let elsewhere = home.join("elsewhere");
    std::fs::create_dir_all(&elsewhere).unwrap();
    let output = ctx
        .bashmod()
        .current_dir(&elsewhere)
        .args(["remove", "prompt"])
        .output()
        .expect("failed to run bashmod");
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!script.exists());
}
