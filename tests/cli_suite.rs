use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// uvstart with settings isolated in `config`
fn uvstart(config: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_uvstart"));
    cmd.env("UVSTART_CONFIG_DIR", config.path())
        .env("NO_COLOR", "1");
    cmd
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").unwrap();
}

#[test]
fn test_help_command() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unified front-end for Python package managers",
        ));
}

#[test]
fn test_version_flag() {
    let config = tempfile::tempdir().unwrap();
    let expected = format!("uvstart {}", env!("CARGO_PKG_VERSION"));

    uvstart(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_command_fails() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("unknown-command-xyz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: uvstart"));
}

#[test]
fn test_backends_lists_catalog_order() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("backends")
        .assert()
        .success()
        .stdout("pdm\nuv\npoetry\nrye\nhatch\n");
}

#[test]
fn test_detect_lock_file() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "uv.lock");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .arg("detect")
        .assert()
        .success()
        .stdout("uv\n");
}

#[test]
fn test_detect_manifest_pattern() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("pyproject.toml"),
        "[tool.poetry]\nname = \"demo\"\n",
    )
    .unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .arg("detect")
        .assert()
        .success()
        .stdout("poetry\n");
}

#[test]
fn test_detect_nothing() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .arg("detect")
        .assert()
        .code(1)
        .stdout("none\n");
}

#[test]
fn test_install_cmd() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["install-cmd", "poetry"])
        .assert()
        .success()
        .stdout("curl -sSL https://install.python-poetry.org | python3 -\n");
}

#[test]
fn test_install_cmd_unknown_backend() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["install-cmd", "pipenv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Backend not found: pipenv"));
}

#[test]
fn test_clean_files() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["clean-files", "uv"])
        .assert()
        .success()
        .stdout("uv.lock\n__pypackages__\n");

    uvstart(&config)
        .args(["clean-files", "pipenv"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_add_without_backend_fails() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["add", "requests"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No backend found or specified"));
}

#[test]
fn test_add_unknown_backend_fails() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["add", "requests", "--backend", "pipenv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Backend not found: pipenv"));
}

#[test]
fn test_dry_run_add_uses_detected_backend() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "uv.lock");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "add", "requests"])
        .assert()
        .success()
        .stdout("uv add requests\n");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "add", "--dev", "pytest"])
        .assert()
        .success()
        .stdout("uv add --group dev pytest\n");
}

#[test]
fn test_dry_run_run_passes_arguments_through() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "run", "--backend", "pdm", "pytest", "-x", "tests"])
        .assert()
        .success()
        .stdout("pdm run pytest -x tests\n");
}

#[test]
fn test_dry_run_fixed_template() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "poetry.lock");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "sync", "--dev"])
        .assert()
        .success()
        .stdout("poetry install --with dev\n");
}

#[test]
fn test_project_config_pins_backend() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "uv.lock");
    fs::write(project.path().join("uvstart.yaml"), "uvstart:\n  backend: rye\n").unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "list"])
        .assert()
        .success()
        .stdout("rye list\n");
}

#[test]
fn test_default_backend_setting() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["settings", "set", "default_backend", "hatch"])
        .assert()
        .success();

    uvstart(&config)
        .args(["settings", "get", "default_backend"])
        .assert()
        .success()
        .stdout("hatch\n");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "version"])
        .assert()
        .success()
        .stdout("hatch --version\n");

    // A detected project ignores the default
    touch(project.path(), "pdm.lock");
    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "version"])
        .assert()
        .success()
        .stdout("pdm --version\n");
}

#[test]
fn test_invalid_setting_value() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["settings", "set", "color", "sometimes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for 'color'"));
}

#[test]
fn test_clean_removes_backend_artifacts() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "poetry.lock");
    fs::create_dir_all(project.path().join(".venv/bin")).unwrap();
    touch(project.path(), "keep.txt");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: poetry.lock"))
        .stdout(predicate::str::contains("Removed: .venv"));

    assert!(!project.path().join("poetry.lock").exists());
    assert!(!project.path().join(".venv").exists());
    assert!(project.path().join("keep.txt").exists());
}

#[test]
fn test_clean_dry_run_keeps_files() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "poetry.lock");

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "clean"])
        .assert()
        .success()
        .stdout("Would remove: poetry.lock\n");

    assert!(project.path().join("poetry.lock").exists());
}

#[test]
fn test_info_json() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "hatch.lock");

    let output = uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["detection"]["backend"], "hatch");
    assert_eq!(json["lock_files"][0], "hatch.lock");
}

#[test]
fn test_completions() {
    let config = tempfile::tempdir().unwrap();

    uvstart(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uvstart"));
}

#[test]
fn test_broken_project_config_does_not_block_operations() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "uv.lock");
    fs::write(project.path().join("uvstart.json"), "{ not json").unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "add", "requests"])
        .assert()
        .success()
        .stdout("uv add requests\n")
        .stderr(predicate::str::contains("Ignoring project config"));
}

#[test]
fn test_numeric_python_version_in_project_config() {
    let config = tempfile::tempdir().unwrap();
    let project = tempfile::tempdir().unwrap();
    touch(project.path(), "uv.lock");
    fs::write(
        project.path().join("uvstart.yaml"),
        "name: demo\npython_version: 3.12\n",
    )
    .unwrap();

    uvstart(&config)
        .arg("--path")
        .arg(project.path())
        .args(["--dry-run", "sync"])
        .assert()
        .success()
        .stdout("uv sync\n");
}
