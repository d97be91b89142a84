#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub fn tome() -> Command {
    cargo_bin_cmd!("tomedb")
}

/// Create a unique, empty db root inside the system temp dir together with
/// a config file pointing at it. Returns (config_path, db_root).
pub fn setup_db_root(name: &str) -> (String, PathBuf) {
    let mut root: PathBuf = env::temp_dir();
    root.push(format!("{}_tomedb", name));
    fs::remove_dir_all(&root).ok();
    fs::create_dir_all(&root).expect("create db root");

    let config_path = root.join("tomedb.yml");
    fs::write(&config_path, format!("db_folder: \"{}\"\n", root.display()))
        .expect("write config file");

    (config_path.to_string_lossy().to_string(), root)
}

/// Drop a schema file under {root}/schemas/{folder}/.
pub fn write_schema(root: &Path, folder: &str, file: &str, content: &str) {
    let dir = root.join("schemas").join(folder);
    fs::create_dir_all(&dir).expect("create schema dir");
    fs::write(dir.join(file), content).expect("write schema file");
}

/// Initialize the database through the CLI (creates the ledger tables).
pub fn init_db(config: &str) {
    tome().args(["--config", config, "init"]).assert().success();
}
