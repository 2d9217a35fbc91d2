use std::env;
use std::path::PathBuf;

fn main() {
    // CARGO_MANIFEST_DIR for rhugo-core is crates/rhugo-core, so we go up two levels.
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let crate_path = PathBuf::from(&manifest_dir);

    let repo_root = crate_path
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map_or_else(|| crate_path.clone(), std::path::Path::to_path_buf);

    // Bundled binaries live in <repo>/hugo-bin when running from source.
    println!(
        "cargo:rustc-env=RHUGO_REPO_ROOT={}",
        repo_root.to_string_lossy()
    );

    println!("cargo:rerun-if-changed=build.rs");
}
