use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn resolve_basedir(path: &Path) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("resolve base directory {}", path.display()))
}

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}
