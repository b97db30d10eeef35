//! Catalog items, their lifecycle state, and the per-kind roadmaps.
//!
//! Items are created by the scanner and only change state through
//! `Item::apply_roadmap_state` and `Item::mark_supported`, so every transition
//! in a run can be traced back to one of those two phases.
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Classification axis for discovered descriptors.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Component,
    Dataformat,
    Language,
    Other,
}

impl Kind {
    /// Every kind, in output order.
    pub const ALL: [Kind; 4] = [Kind::Component, Kind::Dataformat, Kind::Language, Kind::Other];

    /// Return the stable string identifier used in descriptors and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Component => "component",
            Kind::Dataformat => "dataformat",
            Kind::Language => "language",
            Kind::Other => "other",
        }
    }

    fn index(self) -> usize {
        match self {
            Kind::Component => 0,
            Kind::Dataformat => 1,
            Kind::Language => 2,
            Kind::Other => 3,
        }
    }

    /// Parse the exact `kind` value of a descriptor.
    pub fn from_descriptor(value: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an item.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Supported,
    Planned,
    #[default]
    Undecided,
    Rejected,
}

impl State {
    /// Section order of the roadmap file.
    pub const ROADMAP_ORDER: [State; 4] = [
        State::Supported,
        State::Planned,
        State::Undecided,
        State::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Supported => "supported",
            State::Planned => "planned",
            State::Undecided => "undecided",
            State::Rejected => "rejected",
        }
    }

    /// Roadmap section header for this state, e.g. `[planned]`.
    pub fn section_header(&self) -> String {
        format!("[{}]", self.as_str())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decisions that survive across runs through the roadmap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedState {
    Planned,
    Rejected,
}

impl From<PersistedState> for State {
    fn from(value: PersistedState) -> Self {
        match value {
            PersistedState::Planned => State::Planned,
            PersistedState::Rejected => State::Rejected,
        }
    }
}

/// One discovered descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    kind: Kind,
    artifact_id: Option<String>,
    deprecated: bool,
    source_path: PathBuf,
    state: State,
}

impl Item {
    /// Create an undecided item; the name is the file name up to its first `.`.
    pub fn new(
        source_path: PathBuf,
        kind: Kind,
        artifact_id: Option<String>,
        deprecated: bool,
    ) -> Self {
        let name = item_name(&source_path);
        Self {
            name,
            kind,
            artifact_id,
            deprecated,
            source_path,
            state: State::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    /// Descriptor path relative to the descriptor root.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Roadmap line for this item, with the deprecation suffix when set.
    pub fn roadmap_entry(&self) -> String {
        if self.deprecated {
            format!("{} (deprecated)", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Apply a `[planned]`/`[rejected]` decision read from a roadmap file.
    pub fn apply_roadmap_state(&mut self, state: PersistedState) {
        let next = State::from(state);
        if self.state != next {
            tracing::debug!(item = %self.name, kind = %self.kind, from = %self.state, to = %next, "roadmap state applied");
        }
        self.state = next;
    }

    /// Promote the item once its artifact was found. Overrides any decision.
    pub fn mark_supported(&mut self) {
        if self.state != State::Supported {
            tracing::debug!(item = %self.name, kind = %self.kind, from = %self.state, "artifact present");
        }
        self.state = State::Supported;
    }
}

fn item_name(source_path: &Path) -> String {
    let file_name = source_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

/// Items of one kind plus the roadmap file they are persisted to.
#[derive(Debug, Clone)]
pub struct RoadMap {
    kind: Kind,
    roadmap_path: PathBuf,
    items: BTreeMap<String, Item>,
}

impl RoadMap {
    pub fn new(kind: Kind, roadmap_path: PathBuf) -> Self {
        Self {
            kind,
            roadmap_path,
            items: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn roadmap_path(&self) -> &Path {
        &self.roadmap_path
    }

    /// Insert an item, returning the entry it replaced when the name was taken.
    pub fn add(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.name().to_string(), item)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn item_mut(&mut self, name: &str) -> Option<&mut Item> {
        self.items.get_mut(name)
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items currently in `state`, sorted by name.
    pub fn items_in(&self, state: State) -> impl Iterator<Item = &Item> {
        self.items.values().filter(move |item| item.state() == state)
    }

    /// Names of items currently in `state`, sorted.
    pub fn sorted_names(&self, state: State) -> Vec<String> {
        self.items_in(state)
            .map(|item| item.name().to_string())
            .collect()
    }

    pub fn count(&self, state: State) -> usize {
        self.items_in(state).count()
    }
}

/// The four roadmaps of a single run, indexed by `Kind`.
#[derive(Debug, Clone)]
pub struct Registry {
    roadmaps: [RoadMap; 4],
}

impl Registry {
    /// Build empty roadmaps, resolving each kind's roadmap file via `roadmap_path`.
    pub fn new(roadmap_path: impl Fn(Kind) -> PathBuf) -> Self {
        Self {
            roadmaps: Kind::ALL.map(|kind| RoadMap::new(kind, roadmap_path(kind))),
        }
    }

    pub fn roadmap(&self, kind: Kind) -> &RoadMap {
        &self.roadmaps[kind.index()]
    }

    pub fn roadmap_mut(&mut self, kind: Kind) -> &mut RoadMap {
        &mut self.roadmaps[kind.index()]
    }

    /// Iterate roadmaps in kind order.
    pub fn roadmaps(&self) -> impl Iterator<Item = &RoadMap> {
        self.roadmaps.iter()
    }

    pub fn roadmaps_mut(&mut self) -> impl Iterator<Item = &mut RoadMap> {
        self.roadmaps.iter_mut()
    }

    pub fn item_count(&self) -> usize {
        self.roadmaps.iter().map(RoadMap::len).sum()
    }
}
