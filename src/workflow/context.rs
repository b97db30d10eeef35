use crate::cli::CommonArgs;
use crate::config::load_layout;
use crate::paths::CatalogPaths;
use crate::util::resolve_basedir;
use anyhow::Result;

/// Resolved base directory and layout for one invocation.
pub(crate) struct CatalogContext {
    pub(crate) paths: CatalogPaths,
}

impl CatalogContext {
    pub(crate) fn load(args: &CommonArgs) -> Result<Self> {
        let root = resolve_basedir(&args.basedir)?;
        let layout = load_layout(&root, args.config.as_deref())?;
        Ok(Self {
            paths: CatalogPaths::new(root, layout),
        })
    }
}
