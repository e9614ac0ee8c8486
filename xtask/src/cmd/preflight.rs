use crate::repo;
use anyhow::Result;
use std::process::{Command, Stdio};

/// Quality gate steps, run in order from the workspace root.
const STEPS: &[(&str, &[&str])] = &[
    ("cargo fetch", &["fetch"]),
    ("cargo check", &["check", "--workspace"]),
    ("cargo test --workspace", &["test", "--workspace"]),
    (
        "cargo test --release -- --ignored",
        &["test", "--release", "--lib", "--", "--ignored"],
    ),
    ("cargo fmt -- --check", &["fmt", "--all", "--", "--check"]),
    (
        "cargo clippy -- -D warnings",
        &["clippy", "--workspace", "--", "-D", "warnings"],
    ),
    ("cargo build --release", &["build", "--release"]),
];

pub fn run() -> Result<()> {
    let root = repo::repo_root()?;
    for (label, args) in STEPS {
        run_step(&root, label, args)?;
    }
    Ok(())
}

pub(crate) fn run_step(root: &std::path::Path, label: &str, args: &[&str]) -> Result<()> {
    eprintln!("==> {label}");
    let status = Command::new("cargo")
        .args(args)
        .current_dir(root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("{label} failed (status {status})");
    }
    Ok(())
}
