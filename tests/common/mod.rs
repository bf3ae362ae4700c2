// Test utility module for docsynth integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

// Binary execution result for tests that need to verify CLI behavior
#[derive(Debug)]
pub struct BinaryResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl BinaryResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A scratch repository rooted at `<tempdir>/<name>`.
pub struct TestRepo {
    pub dir: TempDir,
    pub root: PathBuf,
}

impl TestRepo {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().join(name);
        fs::create_dir_all(&root).expect("Failed to create repo root");
        Self { dir, root }
    }

    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write test file");
        self
    }

    /// A path next to the repository, for command outputs.
    pub fn scratch(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }
}

/// A documented function of exactly `body_lines + 2` lines.
pub fn long_function(name: &str, body_lines: usize) -> String {
    let mut source = format!("def {}():\n    \"\"\"A deliberately long function.\"\"\"\n", name);
    for i in 0..body_lines {
        source.push_str(&format!("    value_{} = {}\n", i, i));
    }
    source
}

/// A small repository spread over several stages.
pub fn sample_repo() -> TestRepo {
    let repo = TestRepo::new("OasisLMF");
    for (i, stage_dir) in ["exposure", "hazard", "gul", "fm", "aggregation", "utils"]
        .iter()
        .enumerate()
    {
        repo.write(
            &format!("oasislmf/{}/module_{}.py", stage_dir, i),
            format!(
                "class Handler{i}:\n    \"\"\"Handles {stage_dir} records.\"\"\"\n\n    def run(self):\n        \"\"\"Run the {stage_dir} step.\"\"\"\n        return {i}\n\n\ndef helper_{i}(x):\n    \"\"\"Helper number {i} for {stage_dir}.\"\"\"\n    return x\n",
            ),
        );
    }
    repo
}

pub fn run_docsynth(args: &[&str], cwd: &Path) -> BinaryResult {
    let output = Command::new(env!("CARGO_BIN_EXE_docsynth"))
        .args(args)
        .current_dir(cwd)
        .env("DOCSYNTH_QUIET", "1")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute docsynth");

    BinaryResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(str::to_string)
        .collect()
}
