//! Hardware builds link with the DE1-SoC board support linker script.
//!
//! Set `DE1SOC_LINKER_SCRIPT` to the script shipped with the board's
//! bare-metal startup code; host builds ignore it.

fn main() {
    if std::env::var_os("CARGO_FEATURE_HARDWARE").is_some() {
        if let Some(script) = std::env::var_os("DE1SOC_LINKER_SCRIPT") {
            println!("cargo:rustc-link-arg-bins=-T{}", script.to_string_lossy());
        }
        println!("cargo:rerun-if-env-changed=DE1SOC_LINKER_SCRIPT");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
