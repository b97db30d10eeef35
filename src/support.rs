//! Support detection against the built artifacts.
//!
//! An item is supported exactly when its artifact is present in the
//! dependency directory. Detection always wins over persisted roadmap
//! decisions, and every supported descriptor is mirrored into the output
//! namespace.
use crate::model::Registry;
use crate::paths::CatalogPaths;
use crate::staging::Transaction;
use anyhow::{anyhow, Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A supported descriptor and where its copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorCopy {
    pub source: PathBuf,
    /// Destination relative to the base directory.
    pub dest_rel: PathBuf,
}

/// Items promoted during detection, with their pending descriptor copies.
#[derive(Debug, Default, Clone)]
pub struct SupportReport {
    pub artifacts: usize,
    pub copies: Vec<DescriptorCopy>,
}

/// List the regular files of the (flat) dependency directory.
pub fn list_artifacts(dependency_dir: &Path) -> Result<BTreeSet<String>> {
    if !dependency_dir.is_dir() {
        return Err(anyhow!(
            "dependency directory {} not found",
            dependency_dir.display()
        ));
    }
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dependency_dir)
        .with_context(|| format!("read {}", dependency_dir.display()))?
    {
        let entry = entry.with_context(|| format!("read {}", dependency_dir.display()))?;
        if !entry.path().is_file() {
            continue;
        }
        names.insert(entry.file_name().to_string_lossy().to_string());
    }
    Ok(names)
}

/// Promote every item whose artifact exists and plan its descriptor copy.
pub fn detect_supported(paths: &CatalogPaths, registry: &mut Registry) -> Result<SupportReport> {
    let artifacts = list_artifacts(&paths.dependency_dir())?;
    let mut report = SupportReport {
        artifacts: artifacts.len(),
        copies: Vec::new(),
    };
    for roadmap in registry.roadmaps_mut() {
        for item in roadmap.items_mut() {
            let Some(artifact_id) = item.artifact_id() else {
                continue;
            };
            if !artifacts.contains(&paths.artifact_file_name(artifact_id)) {
                continue;
            }
            let dest_rel = paths.descriptor_copy_rel(item.source_path())?;
            report.copies.push(DescriptorCopy {
                source: paths.descriptor_source(item.source_path()),
                dest_rel,
            });
            item.mark_supported();
        }
    }
    tracing::info!(
        artifacts = report.artifacts,
        supported = report.copies.len(),
        dir = %paths.dependency_dir().display(),
        "support detection complete"
    );
    Ok(report)
}

/// Stage the mirrored descriptors of all supported items.
pub fn stage_descriptor_copies(report: &SupportReport, txn: &Transaction) -> Result<()> {
    for copy in &report.copies {
        txn.copy_file(&copy.source, &copy.dest_rel)?;
    }
    Ok(())
}
