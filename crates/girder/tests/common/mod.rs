//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/girder to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and runs it directly
pub fn get_girder_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "girder", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build girder");

    assert!(status.success(), "Failed to build girder binary");

    workspace.join("target/debug/girder")
}

/// Run the girder binary directly in the specified directory
pub fn run_girder_in_dir(dir: &Path, args: &[&str]) -> Output {
    let binary = get_girder_binary();

    Command::new(&binary)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute girder binary")
}

/// Create an artifact via the CLI and return its assigned ID.
///
/// Parses the ID out of the `Created artifact: <ID>` line so tests do not
/// have to assume how IDs are numbered.
#[allow(dead_code)]
pub fn create_artifact(dir: &Path, artifact_type: &str, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["create", artifact_type, title];
    args.extend_from_slice(extra);

    let output = run_girder_in_dir(dir, &args);
    assert!(
        output.status.success(),
        "Create failed: {:?}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Created artifact: "))
        .map(|id| id.trim().to_string())
        .unwrap_or_else(|| panic!("No artifact ID in create output: {}", stdout))
}
