//! Roadmap file format.
//!
//! A roadmap lists every item of one kind under `[supported]`, `[planned]`,
//! `[undecided]` and `[rejected]` headers. Only the `[planned]` and
//! `[rejected]` sections are read back; the others are regenerated each run.
use crate::model::{PersistedState, RoadMap, State};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Outcome of overlaying one roadmap file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveSummary {
    pub planned: usize,
    pub rejected: usize,
    /// Names listed under a persisted section with no matching item.
    pub unknown: Vec<String>,
}

/// A name read from a persisted roadmap section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEntry {
    pub name: String,
    pub state: PersistedState,
}

/// Parse the persisted decisions of a roadmap, in file order.
pub fn parse_persisted<R: BufRead>(reader: R) -> Result<Vec<PersistedEntry>> {
    let mut section: Option<PersistedState> = None;
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.context("read roadmap line")?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == State::Planned.section_header() {
            section = Some(PersistedState::Planned);
        } else if line == State::Rejected.section_header() {
            section = Some(PersistedState::Rejected);
        } else if line.starts_with('[') {
            section = None;
        } else if let Some(state) = section {
            let name = line.trim().split(' ').next().unwrap_or_default();
            entries.push(PersistedEntry {
                name: name.to_string(),
                state,
            });
        }
    }
    Ok(entries)
}

/// Overlay the decisions in `roadmap`'s file onto its items.
///
/// The file is a precondition of the run: a missing or unreadable roadmap is
/// an error, never an empty baseline.
pub fn apply_roadmap_file(roadmap: &mut RoadMap) -> Result<ResolveSummary> {
    let path = roadmap.roadmap_path().to_path_buf();
    let file = File::open(&path).with_context(|| format!("open roadmap {}", path.display()))?;
    let entries = parse_persisted(BufReader::new(file))
        .with_context(|| format!("read roadmap {}", path.display()))?;

    let mut summary = ResolveSummary::default();
    for entry in entries {
        let Some(item) = roadmap.item_mut(&entry.name) else {
            if !entry.name.is_empty() {
                summary.unknown.push(entry.name);
            }
            continue;
        };
        item.apply_roadmap_state(entry.state);
    }
    summary.planned = roadmap.count(State::Planned);
    summary.rejected = roadmap.count(State::Rejected);
    if !summary.unknown.is_empty() {
        tracing::debug!(
            kind = %roadmap.kind(),
            names = ?summary.unknown,
            "roadmap names without a descriptor"
        );
    }
    tracing::info!(
        kind = %roadmap.kind(),
        planned = summary.planned,
        rejected = summary.rejected,
        path = %path.display(),
        "roadmap decisions applied"
    );
    Ok(summary)
}

/// Render the full roadmap for one kind.
pub fn render_roadmap(roadmap: &RoadMap) -> String {
    let mut text = String::new();
    for state in State::ROADMAP_ORDER {
        text.push_str(&state.section_header());
        text.push('\n');
        for item in roadmap.items_in(state) {
            text.push_str(&item.roadmap_entry());
            text.push('\n');
        }
        text.push('\n');
    }
    text
}

/// Render the supported-name list for one kind.
pub fn render_properties(roadmap: &RoadMap) -> String {
    let mut text = String::new();
    for name in roadmap.sorted_names(State::Supported) {
        text.push_str(&name);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, Kind};
    use std::fs;
    use std::path::PathBuf;

    fn roadmap_with(path: PathBuf, items: &[(&str, bool)]) -> RoadMap {
        let mut roadmap = RoadMap::new(Kind::Component, path);
        for (name, deprecated) in items {
            roadmap.add(Item::new(
                PathBuf::from(format!("org/apache/{name}.json")),
                Kind::Component,
                Some(format!("camel-{name}")),
                *deprecated,
            ));
        }
        roadmap
    }

    #[test]
    fn parse_tracks_only_persisted_sections() {
        let text = "\
# comment
[supported]
alpha
[planned]
beta
gamma (deprecated)

[undecided]
delta
[rejected]
  epsilon extra words
#zeta
[other]
eta
";
        let entries = parse_persisted(text.as_bytes()).expect("parse");
        let got: Vec<(&str, PersistedState)> = entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.state))
            .collect();
        assert_eq!(
            got,
            vec![
                ("beta", PersistedState::Planned),
                ("gamma", PersistedState::Planned),
                ("epsilon", PersistedState::Rejected),
            ]
        );
    }

    #[test]
    fn headers_must_match_exactly() {
        let entries = parse_persisted("[planned] \nfoo\n [rejected]\nbar\n".as_bytes())
            .expect("parse");
        assert!(entries.is_empty(), "unexpected entries {entries:?}");
    }

    #[test]
    fn last_persisted_section_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("component.roadmap");
        fs::write(&path, "[planned]\nfoo\n[rejected]\nfoo\nghost\n").expect("write");
        let mut roadmap = roadmap_with(path, &[("foo", false), ("bar", false)]);
        let summary = apply_roadmap_file(&mut roadmap).expect("apply");
        assert_eq!(roadmap.item("foo").expect("foo").state(), State::Rejected);
        assert_eq!(roadmap.item("bar").expect("bar").state(), State::Undecided);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.planned, 0);
        assert_eq!(summary.unknown, vec!["ghost".to_string()]);
    }

    #[test]
    fn supported_section_is_not_authoritative() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("component.roadmap");
        fs::write(&path, "[supported]\nfoo\n").expect("write");
        let mut roadmap = roadmap_with(path, &[("foo", false)]);
        apply_roadmap_file(&mut roadmap).expect("apply");
        assert_eq!(roadmap.item("foo").expect("foo").state(), State::Undecided);
    }

    #[test]
    fn missing_roadmap_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut roadmap = roadmap_with(dir.path().join("component.roadmap"), &[]);
        let err = apply_roadmap_file(&mut roadmap).expect_err("missing roadmap");
        assert!(format!("{err:#}").contains("component.roadmap"));
    }

    #[test]
    fn render_lists_every_state_in_order() {
        let mut roadmap = roadmap_with(
            PathBuf::from("component.roadmap"),
            &[("zeta", true), ("alpha", false), ("beta", false), ("old", true)],
        );
        roadmap.item_mut("zeta").expect("zeta").mark_supported();
        roadmap.item_mut("alpha").expect("alpha").mark_supported();
        roadmap
            .item_mut("old")
            .expect("old")
            .apply_roadmap_state(PersistedState::Rejected);

        assert_eq!(
            render_roadmap(&roadmap),
            "[supported]\nalpha\nzeta (deprecated)\n\n[planned]\n\n[undecided]\nbeta\n\n[rejected]\nold (deprecated)\n\n"
        );
        assert_eq!(render_properties(&roadmap), "alpha\nzeta\n");
    }

    #[test]
    fn rendered_roadmap_reads_back_the_same_decisions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("component.roadmap");
        let mut first = roadmap_with(path.clone(), &[("foo", true), ("bar", false), ("baz", false)]);
        first
            .item_mut("foo")
            .expect("foo")
            .apply_roadmap_state(PersistedState::Planned);
        first
            .item_mut("bar")
            .expect("bar")
            .apply_roadmap_state(PersistedState::Rejected);
        fs::write(&path, render_roadmap(&first)).expect("write");

        let mut second = roadmap_with(path, &[("foo", true), ("bar", false), ("baz", false)]);
        apply_roadmap_file(&mut second).expect("apply");
        assert_eq!(render_roadmap(&second), render_roadmap(&first));
    }

    #[test]
    fn empty_roadmap_renders_headers_only() {
        let roadmap = roadmap_with(PathBuf::from("other.roadmap"), &[]);
        assert_eq!(
            render_roadmap(&roadmap),
            "[supported]\n\n[planned]\n\n[undecided]\n\n[rejected]\n\n"
        );
        assert_eq!(render_properties(&roadmap), "");
    }
}
