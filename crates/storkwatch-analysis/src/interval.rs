//! Status intervals: the time spans during which an individual is in a status
//!
//! A single individual may have no interval for a status, one interval, or
//! several (e.g. repeated nesting attempts). The [`IntervalTable`] groups the
//! intervals of one (age group, status) combination by individual while
//! preserving each individual's input order.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::{individual::IndividualId, observation::ObservationLog};

/// Closed time window `[start, end]`.
///
/// A window whose `start` lies after its `end` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// One interval row: an individual and the window it spends in a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInterval {
    pub individual: IndividualId,
    pub window: TimeWindow,
}

impl StatusInterval {
    #[must_use]
    pub fn new(individual: IndividualId, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            individual,
            window: TimeWindow::new(start, end),
        }
    }
}

/// Status intervals of one (age group, status) combination, grouped by individual.
#[derive(Debug, Clone, Default)]
pub struct IntervalTable {
    windows: BTreeMap<IndividualId, Vec<TimeWindow>>,
    num_intervals: usize,
}

impl IntervalTable {
    #[must_use]
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = StatusInterval>,
    {
        let mut windows = BTreeMap::<IndividualId, Vec<TimeWindow>>::new();
        let mut num_intervals = 0;
        for interval in intervals {
            windows
                .entry(interval.individual)
                .or_default()
                .push(interval.window);
            num_intervals += 1;
        }
        Self {
            windows,
            num_intervals,
        }
    }

    /// Windows recorded for `individual`, in input order; empty when none.
    #[must_use]
    pub fn windows_for(&self, individual: &IndividualId) -> &[TimeWindow] {
        self.windows
            .get(individual)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn individuals(&self) -> impl Iterator<Item = &IndividualId> {
        self.windows.keys()
    }

    /// Individuals that have intervals but no observations in `log`.
    ///
    /// Their interval rows never contribute to an aggregation.
    pub fn orphans<'a>(
        &'a self,
        log: &'a ObservationLog,
    ) -> impl Iterator<Item = &'a IndividualId> + 'a {
        self.individuals().filter(|id| !log.contains(id))
    }

    #[must_use]
    pub fn num_intervals(&self) -> usize {
        self.num_intervals
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::observation::{BehaviorCode, Observation};

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_window_membership() {
        let window = TimeWindow::new(day(2), day(4));
        assert!(window.contains(day(2)));
        assert!(window.contains(day(4)));
        assert!(!window.contains(day(5)));
        assert!(!window.is_empty());
        assert!(TimeWindow::new(day(4), day(2)).is_empty());
    }

    #[test]
    fn test_groups_windows_in_input_order() {
        let table = IntervalTable::from_intervals([
            StatusInterval::new(IndividualId::new("5"), day(10), day(12)),
            StatusInterval::new(IndividualId::new("2"), day(1), day(3)),
            StatusInterval::new(IndividualId::new("5"), day(1), day(2)),
        ]);
        assert_eq!(table.num_intervals(), 3);
        assert_eq!(
            table.windows_for(&IndividualId::new("5")),
            [TimeWindow::new(day(10), day(12)), TimeWindow::new(day(1), day(2))]
        );
        assert!(table.windows_for(&IndividualId::new("9")).is_empty());
    }

    #[test]
    fn test_orphans_are_individuals_missing_from_log() {
        let table = IntervalTable::from_intervals([
            StatusInterval::new(IndividualId::new("1"), day(1), day(2)),
            StatusInterval::new(IndividualId::new("4"), day(1), day(2)),
        ]);
        let log = ObservationLog::from_observations([Observation::new(
            IndividualId::new("1"),
            day(1),
            Some(BehaviorCode(40)),
        )]);
        let orphans = table.orphans(&log).collect::<Vec<_>>();
        assert_eq!(orphans, [&IndividualId::new("4")]);
    }
}
