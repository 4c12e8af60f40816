//! Build information
//!
//! build.rs stamps each compile with a number and timestamp; the status tool
//! and startup banner report them.

use serde::Serialize;

const RAW_BUILD_NUMBER: Option<&str> = option_env!("RDA_BUILD_NUMBER");

pub const BUILD_TIMESTAMP: &str = match option_env!("RDA_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Stamped build number; 0 for builds that bypassed build.rs
fn build_number(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: build_number(RAW_BUILD_NUMBER),
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }

    /// "0.1.0 (build 12)"
    pub fn version_label(&self) -> String {
        format!("{} (build {})", self.version, self.build_number)
    }
}

/// Startup banner, written to stderr since stdout carries MCP traffic
pub fn print_startup_banner(catalog_size: usize, profile_count: usize) {
    let info = BuildInfo::current();
    let rule = "=".repeat(47);
    eprintln!("{}", rule);
    eprintln!("  RDA Tracker {}", info.version_label());
    eprintln!("  Compiled {}", info.build_timestamp);
    eprintln!("  {} catalog foods, {} RDA profiles", catalog_size, profile_count);
    eprintln!("{}", rule);
}
