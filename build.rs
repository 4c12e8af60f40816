//! Build script for rda_tracker
//!
//! Increments build number on each recompilation and embeds build metadata.

use std::fs;
use std::path::Path;

fn main() {
    // Catalog JSON is embedded with include_str!, so src/ covers it too
    println!("cargo:rerun-if-changed=src");

    let build_number_path = Path::new("build_number.txt");

    let current_build: u64 = if build_number_path.exists() {
        fs::read_to_string(build_number_path)
            .unwrap_or_else(|_| "0".to_string())
            .trim()
            .parse()
            .unwrap_or(0)
    } else {
        0
    };

    let new_build = current_build + 1;

    fs::write(build_number_path, new_build.to_string())
        .expect("Failed to write build number file");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=RDA_BUILD_NUMBER={}", new_build);
    println!("cargo:rustc-env=RDA_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:warning=rda_tracker build #{} at {}", new_build, timestamp);
}
