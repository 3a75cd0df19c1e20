// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs
//!
//! Each spec gets its own data directory. Commands run the real `rollcall`
//! binary against it and assertions read stdout, stderr and the exit code.

#![allow(dead_code)]

pub use predicates::prelude::*;

use assert_cmd::assert::Assert;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;
use tempfile::TempDir;

/// A throwaway data directory
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the data directory
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// A `rollcall` invocation bound to this data directory
    pub fn rc(&self) -> Rc {
        let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_rollcall"));
        cmd.env("ROLLCALL_DATA_DIR", self.path()).env_remove("RUST_LOG");
        Rc { cmd }
    }

    /// Register an identity and return its id
    pub fn user(&self, name: &str, role: &str) -> String {
        let contact = format!("{}@example.com", name.to_lowercase());
        let json = self
            .rc()
            .args(&[
                "--format", "json", "user", "add", "--name", name, "--contact", &contact,
                "--credential", "secret", "--role", role,
            ])
            .passes()
            .json();
        json["id"].as_str().unwrap().to_string()
    }

    pub fn organizer(&self) -> String {
        self.user("Olive", "organizer")
    }

    /// An event starting in two days that accepts registrations until tomorrow
    pub fn event(&self, organizer: &str, capacity: u32) -> String {
        let start = Utc::now() + Duration::days(2);
        self.event_at(
            organizer,
            capacity,
            start,
            start + Duration::hours(3),
            start - Duration::days(1),
        )
    }

    pub fn event_at(
        &self,
        organizer: &str,
        capacity: u32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> String {
        let json = self
            .rc()
            .args(&[
                "--format",
                "json",
                "event",
                "create",
                "--organizer",
                organizer,
                "--name",
                "Meetup",
                "--venue",
                "Hall A",
                "--capacity",
                &capacity.to_string(),
                "--start",
                &start.to_rfc3339(),
                "--end",
                &end.to_rfc3339(),
                "--deadline",
                &deadline.to_rfc3339(),
                "--fee",
                "1500",
            ])
            .passes()
            .json();
        json["id"].as_str().unwrap().to_string()
    }

    /// Register and return the ticket
    pub fn register(&self, event: &str, user: &str) -> String {
        self.rc()
            .args(&["register", event, user])
            .passes()
            .stdout()
            .trim()
            .to_string()
    }
}

pub struct Rc {
    cmd: assert_cmd::Command,
}

impl Rc {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Run {
        Run {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> Run {
        Run {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct Run {
    assert: Assert,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(needle)),
        }
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(needle).not()),
        }
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(needle)),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
