#![allow(dead_code)]

use assert_cmd::Command;
use chrono::{Duration, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands against a temporary data directory
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with an empty data directory
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");

        Self { temp_dir, data_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("daybook").expect("Failed to find daybook binary");

        // Run inside the temp dir so a stray daybook.toml is never picked up
        cmd.current_dir(self.temp_dir.path());
        cmd.env("DAYBOOK_DATA_DIR", &self.data_dir);
        cmd.env_remove("RUST_LOG");

        cmd
    }

    /// Root of the temporary directory, the working directory of every run
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the data directory for this test instance
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Helper to run a command and return its stdout without color codes
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self.run_success(args).get_output().stdout.clone();
        strip_ansi(&String::from_utf8_lossy(&output))
    }

    /// Adds a task and returns its full id as printed by `add`
    pub fn add_task(&self, args: &[&str]) -> String {
        let mut full_args = vec!["add"];
        full_args.extend_from_slice(args);
        let stdout = self.stdout_of(&full_args);
        stdout
            .lines()
            .find_map(|line| line.split("Task ID:").nth(1))
            .map(|id| id.trim().to_string())
            .expect("add output should contain the task id")
    }
}

/// Removes ANSI escape sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// `today + days` formatted as `YYYY-MM-DD`
    pub fn day_offset(days: i64) -> String {
        (Self::today() + Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output indicates successful task creation
    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓")
            .and(predicate::str::contains("Created"))
            .and(predicate::str::contains("Task ID:"))
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
