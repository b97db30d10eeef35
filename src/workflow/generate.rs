//! Workflow generate step.
//!
//! Generate stages every output of the run and publishes them together, so a
//! failure anywhere leaves the previous catalog in place.
use super::{collect, CatalogContext, KindSummary};
use crate::cli::GenerateArgs;
use crate::output::{stage_properties, stage_roadmaps};
use crate::staging::Transaction;
use crate::support::stage_descriptor_copies;
use crate::util::display_path;
use anyhow::Result;

/// Run the full catalog pass and publish its outputs.
pub(crate) fn run_generate(args: &GenerateArgs) -> Result<()> {
    let ctx = CatalogContext::load(&args.common)?;
    let collected = collect(&ctx)?;
    let paths = &ctx.paths;

    let txn = Transaction::begin(paths.root())?;
    stage_descriptor_copies(&collected.support, &txn)?;
    stage_properties(paths, &collected.registry, &txn)?;
    stage_roadmaps(paths, &collected.registry, &txn)?;
    let published = txn.publish(paths.root())?;
    for path in &published {
        tracing::debug!(path = %display_path(path, Some(paths.root())), "published");
    }
    tracing::info!(
        files = published.len(),
        copies = collected.support.copies.len(),
        "catalog outputs published"
    );

    for (roadmap, resolved) in collected.registry.roadmaps().zip(&collected.resolved) {
        println!("{}", KindSummary::from_roadmap(roadmap, resolved).line());
    }
    Ok(())
}
