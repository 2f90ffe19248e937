use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch project directory for running the binary
pub struct CliTestHelper {
    _temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let project_root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            project_root,
        }
    }

    /// Create a command running in the project root
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cqlmt").unwrap();
        cmd.current_dir(&self.project_root).env_remove("RUST_LOG");
        cmd
    }

    pub fn write_tree(&self, filename: &str, tree: &Value) -> PathBuf {
        let path = self.project_root.join(filename);
        fs::write(&path, serde_json::to_string_pretty(tree).unwrap()).unwrap();
        path
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.project_root.join("cqlmt.yaml"), content).unwrap();
    }
}
