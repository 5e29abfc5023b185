use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn compass_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".compass"))
}

pub fn ensure_compass_home() -> Result<PathBuf> {
    let dir = compass_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
