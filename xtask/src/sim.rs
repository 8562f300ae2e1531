use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

/// Cue files the simulator looks for in an assets directory.
const CUE_FILES: [&str; 2] = ["correct_answer.wav", "wrong_answer.wav"];

pub fn run(release: bool, assets: Option<&Path>, log: &str) -> Result<()> {
    println!();
    println!("{}", "🖥  Starting math quiz simulator...".cyan().bold());
    println!(
        "{}",
        format!("   {}", platform::config::dev_banner()).dimmed()
    );
    println!();

    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "firmware", "--bin", "simulator", "--features", "emulator"]);
    if release {
        cmd.arg("--release");
    }
    cmd.env("RUST_LOG", log);

    if let Some(dir) = assets {
        check_assets(dir)?;
        println!("{}", format!("  Cues from {}", dir.display()).cyan());
        cmd.env("QUIZ_ASSETS", dir);
    } else {
        println!("{}", "  Cues linked into the binary".cyan());
    }
    println!();

    let status = cmd.status().context("Failed to run simulator")?;
    if !status.success() {
        anyhow::bail!("Simulator exited with {status}");
    }
    Ok(())
}

/// Fail early with a readable message instead of a boot error in the window.
fn check_assets(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }
    let missing: Vec<&str> = CUE_FILES
        .iter()
        .copied()
        .filter(|name| !dir.join(name).is_file())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("{} is missing {}", dir.display(), missing.join(", "));
    }
    Ok(())
}
