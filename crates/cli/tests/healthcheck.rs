use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use spartan_testing_utils::{
    bin::CommandTempCwd,
    registry::{mock_latest, mock_latest_status, registry_url},
};
use std::process::Output;

const BRAIN: &str = "@spartan-ng/brain";
const CLI: &str = "@spartan-ng/cli";

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn outdated_manifest() -> String {
    json!({
        "name": "app",
        "dependencies": { BRAIN: "^1.0.0" },
        "devDependencies": { CLI: "^1.0.0" }
    })
    .to_string()
}

#[test]
fn should_skip_without_package_json() {
    let mut env = CommandTempCwd::init();

    let output = env.healthcheck.output().expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Spartan - Dependency Check\n  skipped: No package.json found.\n");
    assert!(!env.workspace.join("package.json").exists());

    drop(env.root); // cleanup
}

#[test]
fn should_report_healthy_project() {
    let mut server = mockito::Server::new();
    mock_latest(&mut server, BRAIN, "1.2.0").create();
    mock_latest(&mut server, CLI, "1.2.0").create();

    let mut env = CommandTempCwd::init().with_package_json(&outdated_manifest());
    let output = env
        .healthcheck
        .arg("--registry")
        .arg(registry_url(&server))
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Spartan - Dependency Check\n  ok\n");
    assert_eq!(env.package_json(), outdated_manifest());
}

#[test]
fn should_fix_outdated_dependencies_with_yes() {
    let mut server = mockito::Server::new();
    mock_latest(&mut server, BRAIN, "2.0.0").expect(2).create();
    mock_latest(&mut server, CLI, "2.1.0").expect(2).create();

    let mut env = CommandTempCwd::init().with_package_json(&outdated_manifest());
    let output = env
        .healthcheck
        .arg("--registry")
        .arg(registry_url(&server))
        .arg("--yes")
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        [
            "Spartan - Dependency Check",
            "  [warning] The installed version of @spartan-ng/brain is not the latest version. The latest version is 2.0.0. (fixable)",
            "  [warning] The installed version of @spartan-ng/cli is not the latest version. The latest version is 2.1.0. (fixable)",
            "  Would you like to update to the latest versions of the dependencies? yes",
            "  fixed",
            "",
        ]
        .join("\n")
    );

    let manifest: Value = serde_json::from_str(&env.package_json()).expect("parse package.json");
    assert_eq!(
        manifest,
        json!({
            "name": "app",
            "dependencies": { BRAIN: "^2.0.0" },
            "devDependencies": { CLI: "^2.1.0" }
        })
    );
}

#[test]
fn should_not_fix_without_a_terminal() {
    let mut server = mockito::Server::new();
    mock_latest(&mut server, BRAIN, "2.0.0").expect(1).create();
    mock_latest(&mut server, CLI, "2.0.0").expect(1).create();

    let mut env = CommandTempCwd::init().with_package_json(&outdated_manifest());
    let output = env
        .healthcheck
        .arg("--registry")
        .arg(registry_url(&server))
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    // warnings alone do not fail the run
    assert!(output.status.success());
    assert!(stdout(&output).contains("Rerun with --yes to apply the fix."));
    assert!(stdout(&output).contains("  fix skipped\n"));
    assert_eq!(env.package_json(), outdated_manifest());
}

#[test]
fn should_leave_manifest_untouched_when_fix_aborts() {
    let mut server = mockito::Server::new();
    let brain = mock_latest(&mut server, BRAIN, "2.0.0").expect(2).create();
    let cli = mock_latest(&mut server, CLI, "2.0.0").expect(0).create();

    let manifest = "{\n    \"dependencies\": {\n        \"@spartan-ng/brain\": \"^1.0.0\"\n    }\n}\n";
    let mut env = CommandTempCwd::init().with_package_json(manifest);
    let output = env
        .healthcheck
        .arg("--registry")
        .arg(registry_url(&server))
        .arg("--yes")
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("  [error] The dependency @spartan-ng/cli is not installed. (fixable)\n"));
    assert!(stdout(&output).contains("  fix failed\n"));
    assert!(stderr(&output).contains("Healthchecks reported errors"));
    assert_eq!(env.package_json(), manifest);
    brain.assert();
    cli.assert();
}

#[test]
fn should_check_every_dependency_when_registry_fails() {
    let mut server = mockito::Server::new();
    let brain = mock_latest_status(&mut server, BRAIN, 500).expect(1).create();
    let cli = mock_latest(&mut server, CLI, "1.0.0").expect(1).create();

    let mut env = CommandTempCwd::init().with_package_json(&outdated_manifest());
    let output = env
        .healthcheck
        .arg("--registry")
        .arg(registry_url(&server))
        .arg("--no-fix")
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(!output.status.success());
    assert_eq!(
        stdout(&output),
        "Spartan - Dependency Check\n  [error] Failed to fetch metadata for @spartan-ng/brain.\n"
    );
    brain.assert();
    cli.assert();
}

#[test]
fn should_read_registry_from_npmrc() {
    let mut server = mockito::Server::new();
    let brain = mock_latest(&mut server, BRAIN, "1.0.0").expect(1).create();
    let cli = mock_latest(&mut server, CLI, "1.0.0").expect(1).create();

    let npmrc = format!("registry={}\n", server.url());
    let mut env =
        CommandTempCwd::init().with_package_json(&outdated_manifest()).with_npmrc(&npmrc);
    let output = env.healthcheck.output().expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Spartan - Dependency Check\n  ok\n");
    brain.assert();
    cli.assert();
}

#[test]
fn should_check_another_directory() {
    let mut server = mockito::Server::new();
    mock_latest(&mut server, BRAIN, "1.0.0").create();
    mock_latest(&mut server, CLI, "1.0.0").create();

    let mut env = CommandTempCwd::init();
    let project = env.root.path().join("project");
    std::fs::create_dir(&project).expect("create project directory");
    std::fs::write(project.join("package.json"), outdated_manifest()).expect("write package.json");

    let output = env
        .healthcheck
        .arg("-C")
        .arg(&project)
        .arg("--registry")
        .arg(registry_url(&server))
        .output()
        .expect("execute spartan-healthcheck");
    dbg!(&output);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Spartan - Dependency Check\n  ok\n");
}
