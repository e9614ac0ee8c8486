use crate::repo;
use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Exponents of every Mersenne prime with p <= 61.
const KNOWN_EXPONENTS: &[u32] = &[2, 3, 5, 7, 13, 17, 19, 31, 61];

pub fn run(limit: u32) -> Result<()> {
    let root = repo::repo_root()?;
    let limit_arg = limit.to_string();
    eprintln!("==> cargo run --bin mersenne-agent -- generate {limit_arg}");
    let output = Command::new("cargo")
        .args([
            "run",
            "--quiet",
            "--bin",
            "mersenne-agent",
            "--",
            "generate",
            &limit_arg,
        ])
        .current_dir(&root)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .context("failed to run mersenne-agent")?;

    if !output.status.success() {
        anyhow::bail!("mersenne-agent generate failed (status {})", output.status);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let prefix = expected_prefix(limit);
    if !stdout.starts_with(&prefix) {
        anyhow::bail!("expected output to start with `{prefix}`, got:\n{stdout}");
    }
    print!("{stdout}");
    Ok(())
}

/// Leading text `mersenne-agent generate` prints for `limit`.
fn expected_prefix(limit: u32) -> String {
    match expected_count(limit) {
        0 => "Found no Mersenne primes".to_string(),
        1 => "Found 1 Mersenne prime with".to_string(),
        count => format!("Found {count} Mersenne primes with"),
    }
}

fn expected_count(limit: u32) -> usize {
    KNOWN_EXPONENTS
        .iter()
        .filter(|&&p| p <= limit.min(61))
        .count()
}
