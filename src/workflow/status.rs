//! Workflow status step.
//!
//! Status runs the collect phases without copying or writing anything, so it
//! previews exactly what the next `generate` would record.
use super::{collect, CatalogContext};
use crate::cli::StatusArgs;
use crate::model::{Kind, RoadMap, State};
use crate::roadmap::ResolveSummary;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-kind state counts and names.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub(crate) struct KindSummary {
    pub(crate) kind: Kind,
    pub(crate) total: usize,
    pub(crate) counts: BTreeMap<&'static str, usize>,
    pub(crate) items: BTreeMap<&'static str, Vec<String>>,
    /// Roadmap names that matched no descriptor.
    pub(crate) unknown: Vec<String>,
}

impl KindSummary {
    pub(crate) fn from_roadmap(roadmap: &RoadMap, resolved: &ResolveSummary) -> Self {
        let mut counts = BTreeMap::new();
        let mut items = BTreeMap::new();
        for state in State::ROADMAP_ORDER {
            let names = roadmap.sorted_names(state);
            counts.insert(state.as_str(), names.len());
            items.insert(state.as_str(), names);
        }
        Self {
            kind: roadmap.kind(),
            total: roadmap.len(),
            counts,
            items,
            unknown: resolved.unknown.clone(),
        }
    }

    /// One-line text rendering, states in roadmap order.
    pub(crate) fn line(&self) -> String {
        let parts: Vec<String> = State::ROADMAP_ORDER
            .iter()
            .map(|state| {
                let count = self.counts.get(state.as_str()).copied().unwrap_or(0);
                format!("{count} {state}")
            })
            .collect();
        format!("{}: {} items ({})", self.kind, self.total, parts.join(", "))
    }
}

#[derive(Serialize)]
struct StatusReport {
    basedir: String,
    descriptors: usize,
    skipped: usize,
    unparseable: usize,
    replaced: usize,
    artifacts: usize,
    kinds: Vec<KindSummary>,
}

/// Print the state summary for every kind.
pub(crate) fn run_status(args: &StatusArgs) -> Result<()> {
    let ctx = CatalogContext::load(&args.common)?;
    let collected = collect(&ctx)?;
    let kinds: Vec<KindSummary> = collected
        .registry
        .roadmaps()
        .zip(&collected.resolved)
        .map(|(roadmap, resolved)| KindSummary::from_roadmap(roadmap, resolved))
        .collect();

    if args.json {
        let report = StatusReport {
            basedir: ctx.paths.root().display().to_string(),
            descriptors: collected.scan.descriptors,
            skipped: collected.scan.skipped,
            unparseable: collected.scan.unparseable,
            replaced: collected.scan.replaced,
            artifacts: collected.support.artifacts,
            kinds,
        };
        let text = serde_json::to_string_pretty(&report).context("serialize status")?;
        println!("{text}");
        return Ok(());
    }

    for summary in &kinds {
        println!("{}", summary.line());
    }
    Ok(())
}
