use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const BIN_NAME: &str = "contas_cli";

fn isolated_command(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("CONTAS_CORE_HOME", home.path());
    cmd
}

#[test]
fn version_prints_package_version() {
    let home = TempDir::new().expect("temp dir");
    isolated_command(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(contains("contas_core"));
}

#[test]
fn summary_renders_empty_dashboard() {
    let home = TempDir::new().expect("temp dir");
    isolated_command(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Total due"));
}

#[test]
fn list_rejects_unknown_direction() {
    let home = TempDir::new().expect("temp dir");
    isolated_command(&home)
        .args(["list", "sideways"])
        .assert()
        .failure()
        .stderr(contains("unknown direction"));
}

#[test]
fn help_prints_usage() {
    let home = TempDir::new().expect("temp dir");
    isolated_command(&home)
        .arg("help")
        .assert()
        .success()
        .stderr(contains("Usage: contas_cli"));
}
