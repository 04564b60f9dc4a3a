//! Test harness for lsr integration tests

use std::path::Path;
use std::process::Command;

pub use lsr::test_utils::TestDir;

/// Command for the lsr binary, run inside `dir` with colors off.
pub fn lsr_command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lsr"));
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("FORCE_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_lsr(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = lsr_command(dir)
        .args(args)
        .output()
        .expect("Failed to run lsr");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let dir = TestDir::new();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let dir = TestDir::new();
        let file_path = dir.add_file("nested/test.txt", "content");
        assert!(file_path.exists());
    }
}
