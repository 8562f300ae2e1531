//! Application configuration and constants
//!
//! Central naming values used across the workspace. Branding and log banners
//! should reference these constants rather than hardcoding strings.

/// The application name
pub const APP_NAME: &str = "Math Quiz";

/// The board the firmware targets
pub const BOARD_NAME: &str = "DE1-SoC";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Full application title
pub const fn app_title() -> &'static str {
    APP_NAME
}

/// Simulator banner
pub const fn dev_banner() -> &'static str {
    "Math Quiz - Desktop Simulator"
}
