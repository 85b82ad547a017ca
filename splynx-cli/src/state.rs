use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DIGEST_DIR_NAME: &str = "Splynx_Comentarios";
pub const SUMMARY_DIR_NAME: &str = "Splynx_Tecnicos_Calendar";

pub fn home_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .context("neither HOME nor USERPROFILE is set")?;
    Ok(PathBuf::from(home))
}

pub fn app_home() -> Result<PathBuf> {
    Ok(home_dir()?.join(".splynx-reports"))
}

pub fn ensure_app_home() -> Result<PathBuf> {
    let dir = app_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// `Desktop`, then the Spanish-locale `Escritorio`, then `home` itself.
pub fn desktop_dir(home: &Path) -> PathBuf {
    ["Desktop", "Escritorio"]
        .iter()
        .map(|name| home.join(name))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| home.to_path_buf())
}
