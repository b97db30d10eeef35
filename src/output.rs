//! Report output staging for properties and roadmap files.
//!
//! Outputs are staged to keep generate transactional and deterministic.
use crate::model::{Registry, State};
use crate::paths::CatalogPaths;
use crate::roadmap::{render_properties, render_roadmap};
use crate::staging::Transaction;
use anyhow::Result;

/// Stage `<kind>s.properties` for every kind.
pub fn stage_properties(paths: &CatalogPaths, registry: &Registry, txn: &Transaction) -> Result<()> {
    for roadmap in registry.roadmaps() {
        let rel = paths.properties_rel(roadmap.kind());
        txn.write_text(&rel, &render_properties(roadmap))?;
        tracing::debug!(
            kind = %roadmap.kind(),
            supported = roadmap.count(State::Supported),
            path = %rel.display(),
            "staged properties"
        );
    }
    Ok(())
}

/// Stage `<kind>.roadmap` for every kind, replacing the seed read this run.
pub fn stage_roadmaps(paths: &CatalogPaths, registry: &Registry, txn: &Transaction) -> Result<()> {
    for roadmap in registry.roadmaps() {
        let rel = paths.roadmap_rel(roadmap.kind());
        txn.write_text(&rel, &render_roadmap(roadmap))?;
        tracing::debug!(kind = %roadmap.kind(), items = roadmap.len(), path = %rel.display(), "staged roadmap");
    }
    Ok(())
}
