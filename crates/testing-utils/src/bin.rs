use assert_cmd::prelude::*;
use command_extra::CommandExtra;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::{tempdir, TempDir};
use text_block_macros::text_block_fnl;

/// `.npmrc` written next to the project so the home directory of the test machine never leaks in.
const DEFAULT_NPMRC: &str = text_block_fnl! {
    "registry=http://127.0.0.1:9/"
};

/// The `spartan-healthcheck` binary together with a temporary project directory.
pub struct CommandTempCwd {
    pub healthcheck: Command,
    pub root: TempDir,
    pub workspace: PathBuf,
}

impl CommandTempCwd {
    /// Create a temporary directory, a `workspace` inside it, and a command whose
    /// current directory is the workspace.
    pub fn init() -> Self {
        let root = tempdir().expect("create temporary directory");
        let workspace = root.path().join("workspace");
        fs::create_dir(&workspace).expect("create temporary workspace");
        create_default_npmrc(&workspace);
        let healthcheck = Command::cargo_bin("spartan-healthcheck")
            .expect("find the spartan-healthcheck binary")
            .with_current_dir(&workspace);
        CommandTempCwd { healthcheck, root, workspace }
    }

    /// Write `content` to `package.json` in the workspace.
    pub fn with_package_json(self, content: &str) -> Self {
        fs::write(self.workspace.join("package.json"), content).expect("write to package.json");
        self
    }

    /// Replace the default `.npmrc` of the workspace.
    pub fn with_npmrc(self, content: &str) -> Self {
        fs::write(self.workspace.join(".npmrc"), content).expect("write to .npmrc");
        self
    }

    /// Content of `package.json` in the workspace.
    pub fn package_json(&self) -> String {
        fs::read_to_string(self.workspace.join("package.json")).expect("read from package.json")
    }
}

fn create_default_npmrc(workspace: &Path) {
    fs::write(workspace.join(".npmrc"), DEFAULT_NPMRC).expect("write to .npmrc");
}
