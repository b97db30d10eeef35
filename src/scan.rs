//! Descriptor scanning.
//!
//! Walks the descriptor tree, extracts the four classification fields from
//! each JSON descriptor and registers an `Item` per recognized kind. Only the
//! directory walk and file reads are fatal; malformed descriptors are skipped.
use crate::model::{Item, Kind, Registry};
use crate::paths::CatalogPaths;
use crate::staging::collect_files_recursive;
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Diagnostic marker: skipped descriptors whose name contains it are dumped.
const DUMP_SKIPPED_MARKER: &str = "opentracing";

/// Counters reported after a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub descriptors: usize,
    pub classified: usize,
    pub skipped: usize,
    pub unparseable: usize,
    pub replaced: usize,
}

/// Fields consumed from a descriptor document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFields {
    pub kind: Option<String>,
    pub artifact_id: Option<String>,
    pub deprecated: bool,
    pub name: Option<String>,
}

impl DescriptorFields {
    pub fn from_document(document: &Value) -> Self {
        Self {
            kind: find_string(document, "kind"),
            artifact_id: find_string(document, "artifactId"),
            deprecated: find_value(document, "deprecated").is_some_and(is_true),
            name: find_string(document, "name"),
        }
    }
}

/// Scan the descriptor tree into `registry`.
pub fn scan_descriptors(paths: &CatalogPaths, registry: &mut Registry) -> Result<ScanSummary> {
    let root = paths.descriptor_root();
    if !root.is_dir() {
        return Err(anyhow!("descriptor directory {} not found", root.display()));
    }
    let extension = paths.layout().descriptor_extension.as_str();
    let mut summary = ScanSummary::default();
    for path in collect_files_recursive(&root)? {
        if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        summary.descriptors += 1;
        let rel = path
            .strip_prefix(&root)
            .with_context(|| format!("strip descriptor root from {}", path.display()))?;
        let bytes =
            fs::read(&path).with_context(|| format!("read descriptor {}", path.display()))?;
        let document: Value = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(path = %rel.display(), error = %err, "skipping unparseable descriptor");
                summary.unparseable += 1;
                continue;
            }
        };
        let fields = DescriptorFields::from_document(&document);
        let Some(kind) = classify(rel, &fields, &document) else {
            summary.skipped += 1;
            continue;
        };
        if fields.artifact_id.is_none() {
            tracing::warn!(path = %rel.display(), "descriptor has no artifactId; it can never be supported");
        }
        let item = Item::new(rel.to_path_buf(), kind, fields.artifact_id, fields.deprecated);
        if let Some(previous) = registry.roadmap_mut(kind).add(item) {
            tracing::warn!(
                kind = %kind,
                item = %previous.name(),
                replaced = %previous.source_path().display(),
                by = %rel.display(),
                "duplicate item name; later descriptor wins"
            );
            summary.replaced += 1;
        }
        summary.classified += 1;
    }
    tracing::info!(
        descriptors = summary.descriptors,
        classified = summary.classified,
        skipped = summary.skipped,
        unparseable = summary.unparseable,
        root = %root.display(),
        "descriptor scan complete"
    );
    Ok(summary)
}

fn classify(rel: &Path, fields: &DescriptorFields, document: &Value) -> Option<Kind> {
    if let Some(kind) = fields.kind.as_deref().and_then(Kind::from_descriptor) {
        return Some(kind);
    }
    let dump = fields
        .name
        .as_deref()
        .is_some_and(|name| name.contains(DUMP_SKIPPED_MARKER));
    if dump {
        tracing::warn!(path = %rel.display(), descriptor = %document, "skipping descriptor with unrecognized kind");
    } else {
        tracing::debug!(path = %rel.display(), kind = ?fields.kind, "skipping descriptor with unrecognized kind");
    }
    None
}

/// Depth-first lookup of the first field called `key`, in document order.
///
/// Each field name is checked before its value is searched, so a match nested
/// in an earlier sibling wins over a later top-level field.
pub fn find_value<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.iter().find_map(|(field, child)| {
            if field == key {
                Some(child)
            } else {
                find_value(child, key)
            }
        }),
        Value::Array(items) => items.iter().find_map(|child| find_value(child, key)),
        _ => None,
    }
}

fn find_string(value: &Value, key: &str) -> Option<String> {
    find_value(value, key)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}
