//! Telemetry observations and the per-individual observation log
//!
//! An observation log is a flat table of timestamped behavior records for
//! one age group. For interval queries it is partitioned by individual,
//! and each individual's records are kept sorted by timestamp:
//!
//! ```text
//! ObservationLog
//! └─ tracks: IndividualId → IndividualTrack
//!     └─ entries (sorted by timestamp, stable for ties)
//!         ├─ timestamp
//!         └─ behavior code (missing codes allowed)
//! ```
//!
//! Range queries over a track are inclusive at both ends and run in
//! `O(log n)` via binary search.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use storkwatch_analysis::{
//!     individual::IndividualId,
//!     interval::TimeWindow,
//!     observation::{BehaviorCode, Observation, ObservationLog},
//! };
//!
//! let at = |h, m| NaiveDate::from_ymd_opt(2014, 6, 1).unwrap().and_hms_opt(h, m, 0).unwrap();
//! let log = ObservationLog::from_observations([
//!     Observation::new(IndividualId::new("1"), at(9, 0), Some(BehaviorCode(40))),
//!     Observation::new(IndividualId::new("1"), at(9, 5), Some(BehaviorCode(1))),
//! ]);
//!
//! let track = log.track(&IndividualId::new("1")).unwrap();
//! let counts = track.count_in(&TimeWindow::new(at(9, 0), at(9, 5)), BehaviorCode(40));
//! assert_eq!((counts.matched, counts.total), (1, 2));
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{aggregate::WindowCounts, individual::IndividualId, interval::TimeWindow};

/// Categorical behavior code assigned to an observation (e.g. `40` for pecking).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct BehaviorCode(pub i64);

/// One timestamped record for one individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub individual: IndividualId,
    pub timestamp: NaiveDateTime,
    /// `None` when the record carries no behavior classification.
    ///
    /// Such records still count toward the number of observations in a
    /// window but never match a target code.
    pub behavior: Option<BehaviorCode>,
}

impl Observation {
    #[must_use]
    pub fn new(
        individual: IndividualId,
        timestamp: NaiveDateTime,
        behavior: Option<BehaviorCode>,
    ) -> Self {
        Self {
            individual,
            timestamp,
            behavior,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrackEntry {
    timestamp: NaiveDateTime,
    behavior: Option<BehaviorCode>,
}

/// All observations of one individual, ordered by timestamp.
#[derive(Debug, Clone, Default)]
pub struct IndividualTrack {
    entries: Vec<TrackEntry>,
}

impl IndividualTrack {
    fn push(&mut self, timestamp: NaiveDateTime, behavior: Option<BehaviorCode>) {
        self.entries.push(TrackEntry {
            timestamp,
            behavior,
        });
    }

    fn sort(&mut self) {
        // stable: records sharing a timestamp keep their input order
        self.entries.sort_by_key(|entry| entry.timestamp);
    }

    /// Number of observations in the track.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamps of the track in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.entries.iter().map(|entry| entry.timestamp)
    }

    fn in_window(&self, window: &TimeWindow) -> &[TrackEntry] {
        if window.is_empty() {
            return &[];
        }
        let lo = self
            .entries
            .partition_point(|entry| entry.timestamp < window.start);
        let hi = self
            .entries
            .partition_point(|entry| entry.timestamp <= window.end);
        &self.entries[lo..hi]
    }

    /// Counts observations inside `window` (inclusive at both ends) and how
    /// many of them carry the `target` behavior code.
    #[must_use]
    pub fn count_in(&self, window: &TimeWindow, target: BehaviorCode) -> WindowCounts {
        let entries = self.in_window(window);
        WindowCounts {
            matched: entries
                .iter()
                .filter(|entry| entry.behavior == Some(target))
                .count(),
            total: entries.len(),
        }
    }
}

/// Observation log of one age group, partitioned and indexed by individual.
#[derive(Debug, Clone, Default)]
pub struct ObservationLog {
    tracks: BTreeMap<IndividualId, IndividualTrack>,
    num_observations: usize,
}

impl ObservationLog {
    /// Builds the per-individual index from a flat sequence of observations.
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut tracks = BTreeMap::<IndividualId, IndividualTrack>::new();
        let mut num_observations = 0;
        for observation in observations {
            tracks
                .entry(observation.individual)
                .or_default()
                .push(observation.timestamp, observation.behavior);
            num_observations += 1;
        }
        for track in tracks.values_mut() {
            track.sort();
        }
        Self {
            tracks,
            num_observations,
        }
    }

    /// Distinct individual identifiers, in the log's discovery order
    /// (ascending [`IndividualId`] order).
    pub fn individuals(&self) -> impl Iterator<Item = &IndividualId> {
        self.tracks.keys()
    }

    /// Individuals paired with their tracks, in discovery order.
    pub fn tracks(&self) -> impl Iterator<Item = (&IndividualId, &IndividualTrack)> {
        self.tracks.iter()
    }

    #[must_use]
    pub fn track(&self, individual: &IndividualId) -> Option<&IndividualTrack> {
        self.tracks.get(individual)
    }

    #[must_use]
    pub fn contains(&self, individual: &IndividualId) -> bool {
        self.tracks.contains_key(individual)
    }

    #[must_use]
    pub fn num_individuals(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn num_observations(&self) -> usize {
        self.num_observations
    }
}
