#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::json;
use tempfile::TempDir;

/// Scratch directory holding a JSON collection and optional config.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Tasks 1..=count, even ids completed, owners in blocks of five.
    pub fn write_todos(&self, count: u64) -> std::io::Result<PathBuf> {
        let todos: Vec<_> = (1..=count)
            .map(|id| {
                json!({
                    "userId": (id - 1) / 5 + 1,
                    "id": id,
                    "title": format!("task number {id}"),
                    "completed": id % 2 == 0,
                })
            })
            .collect();
        self.write_file("todos.json", &serde_json::Value::Array(todos).to_string())
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".todoview.toml", contents)
    }
}

/// Binary command isolated from the caller's config and environment.
pub fn todoview_cmd(fixture: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("todoview").expect("binary");
    cmd.current_dir(fixture.path())
        .env_remove("TODOVIEW_CONFIG")
        .env_remove("TODOVIEW_ENDPOINT")
        .env_remove("RUST_LOG")
        .env("HOME", fixture.path())
        .env("XDG_CONFIG_HOME", fixture.path().join("xdg"));
    cmd
}
