use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::Path;

/// Get a Command for recap with the host's recap environment cleared
pub fn recap() -> Command {
    let mut cmd = cargo_bin_cmd!("recap");
    for var in [
        "RECAP_API_KEY",
        "RECAP_API_BASE_URL",
        "RECAP_VAULT",
        "RECAP_CONFIG",
        "RECAP_LOG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Write a vault-relative file, creating folders
pub fn write_file(vault: &Path, rel: &str, content: &str) {
    let path = vault.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[allow(dead_code)]
pub fn read_file(vault: &Path, rel: &str) -> String {
    fs::read_to_string(vault.join(rel)).unwrap()
}

/// Write `.recap/config.toml`
#[allow(dead_code)]
pub fn write_config(vault: &Path, toml: &str) {
    write_file(vault, ".recap/config.toml", toml);
}
