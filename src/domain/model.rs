use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Topology hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortStatus {
    InUse,
    Free,
}

/// A connection point on a splitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub name: String,
    pub status: PortStatus,
    /// Downstream link identifier, empty when the port leads nowhere.
    pub next: String,
    /// Name of the owning splitter. Lookup only.
    pub splitter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Splitter {
    pub name: String,
    /// Name of the owning room. Lookup only.
    pub room: String,
    pub ports: IndexMap<String, Port>,
}

impl Splitter {
    pub fn new(name: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            ports: IndexMap::new(),
        }
    }

    /// Adds the port unless one with the same name exists. Returns whether it
    /// was inserted; the first writer always wins.
    pub fn insert_port(&mut self, name: &str, status: PortStatus, next: impl Into<String>) -> bool {
        if self.ports.contains_key(name) {
            return false;
        }
        self.ports.insert(
            name.to_string(),
            Port {
                name: name.to_string(),
                status,
                next: next.into(),
                splitter: self.name.clone(),
            },
        );
        true
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub name: String,
    pub splitters: IndexMap<String, Splitter>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            splitters: IndexMap::new(),
        }
    }

    /// Returns the named splitter, registering it on first sight.
    pub fn splitter_entry(&mut self, name: &str) -> &mut Splitter {
        let room = &self.name;
        self.splitters
            .entry(name.to_string())
            .or_insert_with(|| Splitter::new(name, room.clone()))
    }

    pub fn splitter(&self, name: &str) -> Option<&Splitter> {
        self.splitters.get(name)
    }

    pub fn port_count(&self) -> usize {
        self.splitters.values().map(|s| s.ports.len()).sum()
    }
}

/// Rooms parsed from one sheet, in first-seen order. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hierarchy {
    rooms: IndexMap<String, Room>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the named room, registering it on first sight.
    pub fn room_entry(&mut self, name: &str) -> &mut Room {
        self.rooms
            .entry(name.to_string())
            .or_insert_with(|| Room::new(name))
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn port_count(&self) -> usize {
        self.rooms.values().map(Room::port_count).sum()
    }
}

// ---------------------------------------------------------------------------
// Reconciliation results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Perfect,
    Success,
    Error,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perfect => write!(f, "PERFECT"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Port counts for one room present on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomReport {
    pub room_name: String,
    pub splitter_count: usize,
    pub all_ports: usize,
    pub on_count: usize,
    pub off_count: usize,
    pub matched: usize,
    pub mismatched: usize,
}

impl RoomReport {
    pub fn verdict(&self) -> OverallStatus {
        if self.matched == self.all_ports {
            OverallStatus::Perfect
        } else if self.mismatched > self.matched {
            OverallStatus::Error
        } else {
            OverallStatus::Success
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoomOutcome {
    Compared(RoomReport),
    /// The reference room has no counterpart in the source of truth.
    Missing { room_name: String },
}

impl RoomOutcome {
    pub fn room_name(&self) -> &str {
        match self {
            Self::Compared(report) => &report.room_name,
            Self::Missing { room_name } => room_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub status: OverallStatus,
    pub rooms: Vec<RoomOutcome>,
    /// True when a missing room stopped the pass early.
    pub halted: bool,
}

/// Counters collected while turning one sheet into a hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub rows_scanned: usize,
    pub rows_without_room: usize,
    pub duplicate_ports: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SideSummary {
    pub sheet: String,
    pub rooms: usize,
    pub ports: usize,
    pub stats: ParseStats,
}

/// Everything the presentation layer needs to render one run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub generated_at: DateTime<Utc>,
    pub status: OverallStatus,
    pub halted: bool,
    pub reference: SideSummary,
    pub truth: SideSummary,
    pub rooms: Vec<RoomOutcome>,
    pub summary: Vec<String>,
}
