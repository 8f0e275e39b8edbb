// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the specs.

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(20);

/// Environment the binary reads that must not leak in from the host.
const HOST_ENV: &[&str] = &[
    "GEMINI_API_KEY",
    "MEM0_API_KEY",
    "ALGOFLOW_MODEL",
    "ALGOFLOW_GEMINI_URL",
    "ALGOFLOW_MEM0_URL",
    "ALGOFLOW_USER_ID",
    "ALGOFLOW_INPUT_TIMEOUT_MS",
    "ALGOFLOW_HTTP_TIMEOUT_MS",
    "ALGOFLOW_LOG",
    "RUST_LOG",
    "COLOR",
];

/// A scratch directory holding program files and the state directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    /// Write `contents` to `name` and return the name.
    pub fn file<'a>(&self, name: &'a str, contents: &str) -> &'a str {
        std::fs::write(self.dir.path().join(name), contents).unwrap();
        name
    }

    /// The binary, run inside the project with isolated state.
    pub fn algoflow(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("algoflow").unwrap();
        cmd.current_dir(self.path())
            .env("ALGOFLOW_STATE_DIR", self.state_dir())
            .env("NO_COLOR", "1")
            .timeout(TIMEOUT);
        for name in HOST_ENV {
            cmd.env_remove(name);
        }
        CliBuilder { cmd, _project: None }
    }

    /// Run the binary with a stdin pipe that stays open, unwritten, until
    /// the process exits.
    pub fn run_with_idle_stdin(&self, args: &[&str], env: &[(&str, &str)]) -> RunAssert {
        let mut cmd = std::process::Command::new(assert_cmd::cargo::cargo_bin("algoflow"));
        cmd.current_dir(self.path())
            .env("ALGOFLOW_STATE_DIR", self.state_dir())
            .env("NO_COLOR", "1")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for name in HOST_ENV {
            cmd.env_remove(name);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }
        let mut child = cmd.spawn().unwrap();
        let stdin = child.stdin.take();
        let output = child.wait_with_output().unwrap();
        drop(stdin);
        RunAssert { output }
    }
}

/// The binary with throwaway state.
pub fn cli() -> CliBuilder {
    let project = Project::empty();
    let mut builder = project.algoflow();
    builder._project = Some(project);
    builder
}

pub struct CliBuilder {
    cmd: Command,
    /// Owns the scratch directory for [`cli`].
    _project: Option<Project>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Point the model client at `server`.
    pub fn gemini(self, server: &MockServer) -> Self {
        self.env("GEMINI_API_KEY", "test-key").env("ALGOFLOW_GEMINI_URL", server.uri())
    }

    fn output(mut self) -> RunAssert {
        RunAssert { output: self.cmd.output().unwrap() }
    }

    #[track_caller]
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    #[track_caller]
    pub fn fails(self) -> RunAssert {
        let run = self.output();
        assert!(!run.output.status.success(), "expected failure\n{}", run.describe());
        run
    }

    #[track_caller]
    pub fn exits(self, code: i32) -> RunAssert {
        let run = self.output();
        assert_eq!(run.output.status.code(), Some(code), "{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout()).unwrap_or_else(|e| panic!("{e}\n{}", self.describe()))
    }

    fn describe(&self) -> String {
        format!(
            "status: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.output.status.code(),
            self.stdout(),
            self.stderr()
        )
    }

    #[track_caller]
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout lacks {needle:?}\n{}", self.describe());
        self
    }

    #[track_caller]
    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout().contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    #[track_caller]
    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr lacks {needle:?}\n{}", self.describe());
        self
    }

    #[track_caller]
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout().as_str(), expected);
        self
    }
}

// ---------------------------------------------------------------------------
// Model responses
// ---------------------------------------------------------------------------

/// A generateContent reply whose text is `text`.
pub fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
}

/// Flowchart for an even/odd check.
pub fn parity_chart_json() -> String {
    json!({
        "nodes": [
            { "id": "1", "type": "input", "label": "Start", "data": { "label": "Start" } },
            { "id": "2", "type": "decision", "label": "n % 2 == 0?", "data": { "label": "n % 2 == 0?" } },
            { "id": "3", "type": "output", "label": "print('even')", "data": { "label": "print('even')" } },
            { "id": "4", "type": "output", "label": "print('odd')", "data": { "label": "print('odd')" } }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2" },
            { "id": "e2-3", "source": "2", "target": "3", "label": "True" },
            { "id": "e2-4", "source": "2", "target": "4", "label": "False" }
        ],
        "meta": {
            "timeComplexity": "O(1)",
            "spaceComplexity": "O(1)",
            "explanation": "Prints whether n is even."
        }
    })
    .to_string()
}

pub const PARITY_PROGRAM: &str = "n = 4\nif n % 2 == 0:\n    print('even')\nelse:\n    print('odd')\n";
