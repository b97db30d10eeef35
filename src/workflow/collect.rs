//! Collect phases shared by `generate` and `status`.
use super::CatalogContext;
use crate::model::Registry;
use crate::roadmap::{apply_roadmap_file, ResolveSummary};
use crate::scan::{scan_descriptors, ScanSummary};
use crate::support::{detect_supported, SupportReport};
use anyhow::Result;

/// Registry after scan, roadmap resolution and support detection.
pub(crate) struct Collected {
    pub(crate) registry: Registry,
    pub(crate) scan: ScanSummary,
    /// One entry per kind, in `Kind::ALL` order.
    pub(crate) resolved: Vec<ResolveSummary>,
    pub(crate) support: SupportReport,
}

/// Run scan, resolve and detect, strictly in that order.
pub(crate) fn collect(ctx: &CatalogContext) -> Result<Collected> {
    let paths = &ctx.paths;
    let mut registry = Registry::new(|kind| paths.roadmap_path(kind));
    let scan = scan_descriptors(paths, &mut registry)?;
    for roadmap in registry.roadmaps().filter(|roadmap| roadmap.is_empty()) {
        tracing::debug!(kind = %roadmap.kind(), "no descriptors of this kind");
    }
    let resolved = registry
        .roadmaps_mut()
        .map(apply_roadmap_file)
        .collect::<Result<Vec<_>>>()?;
    let support = detect_supported(paths, &mut registry)?;
    tracing::debug!(items = registry.item_count(), "collect complete");
    Ok(Collected {
        registry,
        scan,
        resolved,
        support,
    })
}
