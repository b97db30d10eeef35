//! Workflow orchestration for a single catalog pass.
//!
//! Every command runs the same collect phases in order (scan, resolve, detect)
//! over one explicit registry; `generate` then stages and publishes outputs.
mod collect;
mod context;
mod generate;
mod status;

use collect::collect;
use context::CatalogContext;
use status::KindSummary;

pub(crate) use generate::run_generate;
pub(crate) use status::run_status;
