use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cargo::Step;

/// Bare-metal target of the DE1-SoC's Cortex-A9.
const HARDWARE_TARGET: &str = "armv7a-none-eabi";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking math quiz builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let steps = [
        Step::new(
            "Hardware build (DE1-SoC)",
            &[
                "check",
                "-p",
                "firmware",
                "--target",
                HARDWARE_TARGET,
                "--features",
                "hardware",
            ],
        ),
        Step::new(
            "Simulator build (host)",
            &["check", "-p", "firmware", "--features", "emulator"],
        ),
        Step::new(
            "Platform crate (no_std)",
            &[
                "check",
                "-p",
                "platform",
                "--target",
                HARDWARE_TARGET,
                "--no-default-features",
            ],
        ),
        Step::new(
            "Quiz crate (no_std)",
            &[
                "check",
                "-p",
                "quiz",
                "--target",
                HARDWARE_TARGET,
                "--no-default-features",
            ],
        ),
        Step::new(
            "Clippy",
            &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        )
        .warn_only(),
        Step::new("Formatting", &["fmt", "--all", "--check"]).warn_only(),
    ];

    for step in &steps {
        step.run()?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!("     Run 'cargo fmt --all' if formatting reported problems");
    println!();

    Ok(())
}
