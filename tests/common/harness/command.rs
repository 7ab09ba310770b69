//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test files
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `mark` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct MarkCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
    stdin: Option<String>,
}

impl MarkCommand {
    /// Creates a new command for the `mark` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
            stdin: None,
        }
    }

    /// Sets the `--data` option to specify the data file.
    pub fn data(mut self, path: &Path) -> Self {
        self.args.push("--data".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `XDG_CONFIG_HOME` at `dir` so the user's config is never read.
    pub fn config_home(mut self, dir: &Path) -> Self {
        self.config_home = Some(dir.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the process on stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("mark").expect("Failed to find mark binary");
        cmd.args(&self.args).env_remove("RUST_LOG");
        if let Some(dir) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", dir);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `add` command.
    pub fn add(self, name: &str, url: &str) -> Self {
        self.args(["add", name, url])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `find` command.
    pub fn find(self, keyword: &str) -> Self {
        self.args(["find", keyword])
    }

    /// Configures for the `delete` command.
    pub fn delete(self, index: usize) -> Self {
        self.args(["delete".to_string(), index.to_string()])
    }

    /// Configures for the `remind` command.
    pub fn remind(self, index: usize, at: &str) -> Self {
        self.args(["remind".to_string(), index.to_string(), "--at".to_string(), at.to_string()])
    }

    /// Configures for the `reminders` command.
    pub fn reminders(self) -> Self {
        self.args(["reminders"])
    }

    /// Configures for the `shell` command.
    pub fn shell(self) -> Self {
        self.args(["shell"])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for MarkCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        MarkCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_data() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mark.json");
        let cmd = MarkCommand::new().data(&path);
        let args = cmd.get_args();
        assert_eq!(args[0], "--data");
        assert_eq!(args[1], path.to_string_lossy());
    }

    #[test]
    fn test_command_output_success() {
        let output = MarkCommand::new().args(["--help"]).output_success();
        assert!(output.contains("mark") || output.contains("bookmarks"));
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = MarkCommand::new().ls().format_json();
        let args = cmd.get_args();
        assert!(args.contains(&"ls".to_string()));
        assert!(args.contains(&"--format".to_string()));
        assert!(args.contains(&"json".to_string()));
    }
}
