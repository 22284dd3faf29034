//! Extracted schedule grid: stations in header order, each with its stops.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::StationLabel;

/// One timed stop of one run at one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEntry {
    /// Displayed time text. Usually a clock time, but kept raw so that
    /// tokens such as footnote markers survive.
    pub time: String,

    /// Route variant serving this stop, for schedules that have variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl StopEntry {
    /// Create a stop entry.
    pub fn new(time: impl Into<String>, route: Option<String>) -> Self {
        Self {
            time: time.into(),
            route,
        }
    }
}

/// Stations of a schedule, in header order, each with its stop entries in
/// row order.
///
/// This is an insertion-ordered map: the position of a station is the
/// column index used to align time cells, so it never changes once the
/// station is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    stations: Vec<(StationLabel, Vec<StopEntry>)>,
}

impl Schedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a station, keeping labels unique.
    ///
    /// The first occurrence of a label is registered as-is. A repeat visit
    /// is registered with `return_suffix` appended; should that collide too,
    /// the suffix is applied again until the label is free.
    ///
    /// Returns the label that was actually registered.
    pub fn register(&mut self, label: StationLabel, return_suffix: &str) -> StationLabel {
        let mut label = label;
        while self.contains(label.as_str()) {
            label = label.with_suffix(return_suffix);
        }
        self.stations.push((label.clone(), Vec::new()));
        label
    }

    /// Whether a station with this label is registered.
    pub fn contains(&self, label: &str) -> bool {
        self.stations.iter().any(|(l, _)| l == label)
    }

    /// Stop entries for a station, by label.
    pub fn get(&self, label: &str) -> Option<&[StopEntry]> {
        self.stations
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Mutable stop entries for the station at a column position.
    ///
    /// Returns `None` when the position lies beyond the registered stations.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Vec<StopEntry>> {
        self.stations.get_mut(index).map(|(_, entries)| entries)
    }

    /// Station labels in header order.
    pub fn labels(&self) -> impl Iterator<Item = &StationLabel> {
        self.stations.iter().map(|(l, _)| l)
    }

    /// Stations with their entries, in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationLabel, &[StopEntry])> {
        self.stations.iter().map(|(l, e)| (l, e.as_slice()))
    }

    /// Number of registered stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether no station is registered.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Total number of stop entries across all stations.
    pub fn entry_count(&self) -> usize {
        self.stations.iter().map(|(_, e)| e.len()).sum()
    }

    /// Whether at least one station has at least one stop entry.
    pub fn has_entries(&self) -> bool {
        self.stations.iter().any(|(_, e)| !e.is_empty())
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.stations.len()))?;
        for (label, entries) in &self.stations {
            map.serialize_entry(label, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = Schedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of station label to stop entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schedule, A::Error> {
                let mut stations = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, entries)) =
                    access.next_entry::<StationLabel, Vec<StopEntry>>()?
                {
                    stations.push((label, entries));
                }
                Ok(Schedule { stations })
            }
        }

        deserializer.deserialize_map(ScheduleVisitor)
    }
}

/// Route variant labels seen while walking a schedule, first-seen order,
/// no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubrouteSet(Vec<String>);

impl SubrouteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a label. Returns `true` if it was not seen before.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.0.iter().any(|l| l == label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no label was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the set, returning labels in first-seen order.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
