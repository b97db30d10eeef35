//! Staged writes and all-or-nothing publish.
//!
//! Generated files are written under a transaction's `staging/` directory
//! first. Publishing moves each staged file into the base directory, backing
//! up whatever it replaces; if any file fails to publish, everything already
//! published is removed or restored so a failed run leaves no partial output.
use anyhow::{anyhow, Context, Result};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Transaction directory prefix, created inside the base directory.
const TXN_PREFIX: &str = ".catalog-txn-";

/// A staging area that is removed when dropped.
pub struct Transaction {
    dir: TempDir,
}

impl Transaction {
    /// Create a transaction directory inside `base`.
    ///
    /// Keeping it on the same filesystem as the outputs lets publish rename
    /// instead of copy.
    pub fn begin(base: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(TXN_PREFIX)
            .tempdir_in(base)
            .with_context(|| format!("create transaction dir in {}", base.display()))?;
        Ok(Self { dir })
    }

    pub fn staging_root(&self) -> PathBuf {
        self.dir.path().join("staging")
    }

    /// Stage text at a base-relative path.
    pub fn write_text(&self, rel_path: &Path, text: &str) -> Result<()> {
        write_staged_bytes(&self.staging_root(), rel_path, text.as_bytes())
    }

    /// Stage a copy of an existing file at a base-relative path.
    pub fn copy_file(&self, source: &Path, rel_path: &Path) -> Result<()> {
        let target = staged_target(&self.staging_root(), rel_path)?;
        fs::copy(source, &target)
            .with_context(|| format!("copy {} to {}", source.display(), target.display()))?;
        Ok(())
    }

    /// Publish every staged file under `base`, returning the published paths.
    pub fn publish(self, base: &Path) -> Result<Vec<PathBuf>> {
        publish_staging(&self.staging_root(), base)
    }
}

/// Write `bytes` at `rel_path` under the staging root, creating parents.
pub fn write_staged_bytes(staging_root: &Path, rel_path: &Path, bytes: &[u8]) -> Result<()> {
    let target = staged_target(staging_root, rel_path)?;
    fs::write(&target, bytes).with_context(|| format!("stage {}", rel_path.display()))
}

fn staged_target(staging_root: &Path, rel_path: &Path) -> Result<PathBuf> {
    let target = staging_root.join(rel_path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(target)
}

pub fn publish_staging(staging_root: &Path, base: &Path) -> Result<Vec<PathBuf>> {
    if !staging_root.exists() {
        return Ok(Vec::new());
    }
    let files = collect_files_recursive(staging_root)?;
    let txn_root = staging_root
        .parent()
        .ok_or_else(|| anyhow!("staging root has no parent"))?;
    let backup_root = txn_root.join("backup");
    fs::create_dir_all(&backup_root)
        .with_context(|| format!("create {}", backup_root.display()))?;
    let mut published = Vec::new();
    let mut backups: Vec<(PathBuf, PathBuf)> = Vec::new();
    for file in files {
        let rel = file
            .strip_prefix(staging_root)
            .context("strip staging prefix")?;
        let dest = base.join(rel);
        if dest.exists() {
            let backup = backup_root.join(rel);
            if let Some(parent) = backup.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            if let Err(err) = fs::copy(&dest, &backup)
                .map(|_| ())
                .with_context(|| format!("backup {}", dest.display()))
            {
                rollback_publish(&published, &backups);
                return Err(err);
            }
            backups.push((dest.clone(), backup));
        }

        if let Err(err) = publish_file(&file, &dest) {
            rollback_publish(&published, &backups);
            return Err(err);
        }
        published.push(dest);
    }
    tracing::debug!(files = published.len(), base = %base.display(), "published staged outputs");
    Ok(published)
}

/// List files under `root` recursively, sorted by path.
///
/// Symlinked directories are not descended into; symlinks to files are listed.
pub fn collect_files_recursive(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if root.exists() {
        walk_files(root, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn walk_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", entry.path().display()))?;
        let path = entry.path();
        if file_type.is_dir() {
            walk_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Replace `dest` with `source` through a sibling temp file and a rename.
fn publish_file(source: &Path, dest: &Path) -> Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(dest.file_name().unwrap_or_else(|| OsStr::new("staged")));
    tmp_name.push(".tmp");
    let tmp_path = parent.join(tmp_name);
    fs::copy(source, &tmp_path)
        .with_context(|| format!("stage {} next to {}", source.display(), dest.display()))?;
    fs::rename(&tmp_path, dest).with_context(|| format!("replace {}", dest.display()))?;
    Ok(())
}

// Best effort: the original publish error is what gets reported.
fn rollback_publish(published: &[PathBuf], backups: &[(PathBuf, PathBuf)]) {
    for path in published {
        let _ = fs::remove_file(path);
    }
    for (dest, backup) in backups {
        let _ = fs::copy(backup, dest);
    }
}
