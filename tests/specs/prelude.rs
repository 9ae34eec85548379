//! Test helpers for behavioral specifications.
//!
//! Provides a fluent builder for running chedash and a canned HTTP server
//! standing in for the workspace API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

/// Variables read by chedash that must not leak in from the caller.
const CHEDASH_VARS: [&str; 10] = [
    "CHEDASH_CONFIG",
    "CHEDASH_URL",
    "CHEDASH_TOKEN",
    "CHEDASH_API_CONTEXT",
    "CHEDASH_WEBSOCKET_CONTEXT",
    "CHEDASH_REGISTRY_URLS",
    "CHEDASH_SETTLE_MS",
    "CHEDASH_START_TIMEOUT_MS",
    "CHEDASH_RECONNECT",
    "RUST_LOG",
];

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn chedash_binary() -> PathBuf {
    binary_path("chedash")
}

/// Create a CLI builder for chedash commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    /// Isolated state and config directories, kept alive for the run
    home: tempfile::TempDir,
}

impl CliBuilder {
    fn new() -> Self {
        let home = tempfile::tempdir().unwrap();
        let envs = vec![
            (
                "CHEDASH_STATE_DIR".to_string(),
                home.path().join("state").to_string_lossy().into_owned(),
            ),
            (
                "XDG_CONFIG_HOME".to_string(),
                home.path().join("config").to_string_lossy().into_owned(),
            ),
            ("CHEDASH_SETTLE_MS".to_string(), "0".to_string()),
            ("NO_COLOR".to_string(), "1".to_string()),
        ];
        Self {
            args: Vec::new(),
            envs,
            home,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Point the CLI at a server
    pub fn server(self, url: &str) -> Self {
        self.env("CHEDASH_URL", url)
    }

    /// Write a config file and point the CLI at it
    pub fn config(self, content: &str) -> Self {
        let path = self.home.path().join("chedash.toml");
        std::fs::write(&path, content).unwrap();
        self.env("CHEDASH_CONFIG", path)
    }

    /// Path of the log file the run writes
    pub fn log_path(&self) -> PathBuf {
        self.home.path().join("state").join("chedash.log")
    }

    /// Build the command without running it
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(chedash_binary());
        cmd.args(&self.args);
        for var in CHEDASH_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output, _home: self.home }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output, _home: self.home }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
    _home: tempfile::TempDir,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Stdout parsed as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap_or_else(|e| {
            panic!("stdout is not JSON ({e})\nstdout: {}", self.stdout())
        })
    }

    /// Assert the exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "unexpected exit code\nstderr: {}",
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

// =============================================================================
// Workspace API stand-in
// =============================================================================

/// HTTP server answering every request with the same canned response.
///
/// Runs on a background thread until the test process exits.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// Answer `200 OK` with `body`.
    pub fn json(body: &str) -> Self {
        Self::respond(200, body)
    }

    /// Answer `status` with `body`.
    pub fn respond(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            if status < 400 { "OK" } else { "Error" },
            body.len()
        );

        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Ok(read_half) = stream.try_clone() else {
                    continue;
                };
                let mut reader = BufReader::new(read_half);
                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                let mut header = String::new();
                loop {
                    header.clear();
                    match reader.read_line(&mut header) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if header == "\r\n" => break,
                        Ok(_) => {}
                    }
                }
                log.lock().unwrap().push(request_line.trim_end().to_string());
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { addr, requests }
    }

    /// Dashboard URL on this server
    pub fn url(&self) -> String {
        format!("http://{}/dashboard/", self.addr)
    }

    /// Request lines received so far ("GET /api/workspace HTTP/1.1")
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Two workspaces in the `che` namespace, one running.
pub const WORKSPACES: &str = r#"[
  {
    "id": "workspace-web",
    "namespace": "che",
    "status": "RUNNING",
    "devfile": {"apiVersion": "1.0.0", "metadata": {"name": "web"}},
    "attributes": {"created": "1700000000000"}
  },
  {
    "id": "workspace-api",
    "namespace": "che",
    "status": "STOPPED",
    "devfile": {"apiVersion": "1.0.0", "metadata": {"name": "api"}},
    "attributes": {"stackName": "Go"}
  }
]"#;
