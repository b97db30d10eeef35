//! Typed paths into a catalog module layout.
//!
//! Centralizing path construction keeps the scanner, detector and writers in
//! agreement about where inputs live and where outputs land.
use crate::config::CatalogLayout;
use crate::model::Kind;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Resolves layout-relative locations against the base directory.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    root: PathBuf,
    layout: CatalogLayout,
}

impl CatalogPaths {
    pub fn new(root: PathBuf, layout: CatalogLayout) -> Self {
        Self { root, layout }
    }

    /// Return the base directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Return the descriptor tree root.
    pub fn descriptor_root(&self) -> PathBuf {
        self.root.join(&self.layout.descriptor_dir)
    }

    /// Return the dependency directory scanned for artifacts.
    pub fn dependency_dir(&self) -> PathBuf {
        self.root.join(&self.layout.dependency_dir)
    }

    /// Return the `<kind>.roadmap` path relative to the base directory.
    pub fn roadmap_rel(&self, kind: Kind) -> PathBuf {
        self.layout.resources_dir.join(format!("{kind}.roadmap"))
    }

    /// Return the absolute `<kind>.roadmap` path.
    pub fn roadmap_path(&self, kind: Kind) -> PathBuf {
        self.root.join(self.roadmap_rel(kind))
    }

    /// Return the `<kind>s.properties` path relative to the base directory.
    pub fn properties_rel(&self, kind: Kind) -> PathBuf {
        self.layout
            .output_dir
            .join(&self.layout.properties_dir)
            .join(format!("{kind}s.properties"))
    }

    /// Return the absolute descriptor path for an item's source path.
    pub fn descriptor_source(&self, source_path: &Path) -> PathBuf {
        self.descriptor_root().join(source_path)
    }

    /// Map a descriptor's source path into the output namespace, relative to
    /// the base directory.
    ///
    /// The first `strip_components` components are replaced by the namespace;
    /// at least one component (the file name) must remain.
    pub fn descriptor_copy_rel(&self, source_path: &Path) -> Result<PathBuf> {
        let strip = self.layout.strip_components;
        let components: Vec<_> = source_path.components().collect();
        if components.len() <= strip {
            return Err(anyhow!(
                "descriptor {} has {} path components; cannot strip {} for the output namespace",
                source_path.display(),
                components.len(),
                strip
            ));
        }
        let remainder: PathBuf = components[strip..].iter().collect();
        Ok(self
            .layout
            .output_dir
            .join(&self.layout.namespace)
            .join(remainder))
    }

    /// Return the file name an item's artifact must have.
    pub fn artifact_file_name(&self, artifact_id: &str) -> String {
        format!("{artifact_id}.{}", self.layout.artifact_extension)
    }
}
