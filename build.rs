//! Build script for the chart playlist CLI.
//!
//! Copies the `.env.example` template into the local data directory
//! (`chartcli/.env.example`) so users find a configuration example next to the
//! place where `.env` is read from. Any failure here only produces a cargo
//! warning; the build itself never depends on the user's data directory.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    if let Err(e) = copy_env_example() {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_env_example() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("chartcli");
    fs::create_dir_all(&out_dir)?;
    fs::copy(&env_example_path, out_dir.join(".env.example"))?;

    Ok(())
}
