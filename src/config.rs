//! Catalog layout configuration.
//!
//! The layout names every input and output location relative to the base
//! directory. It is loaded from `catalog.json` (or `--config`) and falls back
//! to the Maven module layout the catalog has always been generated from.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default layout file looked up under the base directory.
pub const LAYOUT_FILE_NAME: &str = "catalog.json";

/// Relative locations and naming rules for one catalog run.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogLayout {
    /// Root of the descriptor tree.
    pub descriptor_dir: PathBuf,
    /// Flat directory of built artifacts.
    pub dependency_dir: PathBuf,
    /// Directory holding the `<kind>.roadmap` files.
    pub resources_dir: PathBuf,
    /// Root for properties files and copied descriptors.
    pub output_dir: PathBuf,
    /// Directory under `output_dir` receiving `<kind>s.properties`.
    pub properties_dir: PathBuf,
    /// Namespace under `output_dir` receiving copied descriptors.
    pub namespace: PathBuf,
    /// Leading descriptor path components replaced by `namespace`.
    pub strip_components: usize,
    pub artifact_extension: String,
    pub descriptor_extension: String,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            descriptor_dir: PathBuf::from("target/camel-catalog"),
            dependency_dir: PathBuf::from("target/dependency"),
            resources_dir: PathBuf::from("src/main/resources"),
            output_dir: PathBuf::from("target/classes"),
            properties_dir: PathBuf::from("org/wildfly/camel/catalog"),
            namespace: PathBuf::from("org/wildfly"),
            strip_components: 2,
            artifact_extension: "jar".to_string(),
            descriptor_extension: "json".to_string(),
        }
    }
}

/// Resolve the layout for a base directory.
///
/// An explicit path must exist; otherwise `<basedir>/catalog.json` is used
/// when present and the defaults when not.
pub fn load_layout(basedir: &Path, explicit: Option<&Path>) -> Result<CatalogLayout> {
    let layout = match explicit {
        Some(path) => read_layout(path)?,
        None => {
            let path = basedir.join(LAYOUT_FILE_NAME);
            if path.is_file() {
                read_layout(&path)?
            } else {
                CatalogLayout::default()
            }
        }
    };
    validate_layout(&layout)?;
    Ok(layout)
}

fn read_layout(path: &Path) -> Result<CatalogLayout> {
    let bytes = fs::read(path).with_context(|| format!("read layout {}", path.display()))?;
    let layout: CatalogLayout = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse layout JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded catalog layout");
    Ok(layout)
}

/// Reject layouts that could read or write outside the base directory.
pub fn validate_layout(layout: &CatalogLayout) -> Result<()> {
    let dirs = [
        ("descriptor_dir", &layout.descriptor_dir),
        ("dependency_dir", &layout.dependency_dir),
        ("resources_dir", &layout.resources_dir),
        ("output_dir", &layout.output_dir),
        ("properties_dir", &layout.properties_dir),
        ("namespace", &layout.namespace),
    ];
    for (field, path) in dirs {
        validate_relative_dir(field, path)?;
    }
    for (field, ext) in [
        ("artifact_extension", &layout.artifact_extension),
        ("descriptor_extension", &layout.descriptor_extension),
    ] {
        if ext.trim().is_empty() {
            return Err(anyhow!("{field} must not be empty"));
        }
        if ext.starts_with('.') {
            return Err(anyhow!("{field} must not start with '.', got {ext:?}"));
        }
    }
    Ok(())
}

fn validate_relative_dir(field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(anyhow!(
                    "{field} must not contain '..' (got {})",
                    path.display()
                ))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(anyhow!(
                    "{field} must be relative to the base directory (got {})",
                    path.display()
                ))
            }
        }
    }
    Ok(())
}
