//! Isolated test environment with temp directory.

use super::{MarkCommand, TestBookmark};
use mark::storage::{JsonStorage, MarkData, Storage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data file and config home.
///
/// The temp directory is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with no data file yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the path to the bookmark data file.
    pub fn data_file(&self) -> PathBuf {
        self.root.join("mark.json")
    }

    /// Returns the directory used as `XDG_CONFIG_HOME`.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves bookmarks straight to the data file, bypassing the CLI.
    pub fn seed(&self, bookmarks: &[TestBookmark]) {
        let data = MarkData {
            bookmarks: bookmarks.iter().map(TestBookmark::to_bookmark).collect(),
            reminders: Vec::new(),
        };
        JsonStorage::new(self.data_file())
            .save(&data)
            .expect("Failed to seed data file");
    }

    /// Loads the data file as the CLI would see it.
    pub fn load(&self) -> MarkData {
        JsonStorage::new(self.data_file())
            .load()
            .expect("Failed to load data file")
    }

    /// Writes `config.toml` under the config home.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home().join("mark");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Creates a MarkCommand configured for this test environment.
    pub fn cmd(&self) -> MarkCommand {
        MarkCommand::new()
            .config_home(&self.config_home())
            .data(&self.data_file())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_seed_round_trips() {
        let env = TestEnv::new();
        env.seed(&[
            TestBookmark::new("NUSMods").url("https://nusmods.com"),
            TestBookmark::new("Rust Book").tag("rust"),
        ]);

        let data = env.load();
        assert_eq!(data.bookmarks.len(), 2);
        assert_eq!(data.bookmarks[0].url().as_str(), "https://nusmods.com");
        assert_eq!(data.bookmarks[1].tags()[0].as_str(), "rust");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--data");
        assert_eq!(args[1], env.data_file().to_string_lossy());
    }
}
