//! Behavior-window aggregation
//!
//! For one (age group, status) combination this module measures, per
//! individual, the share of observations that carry the target behavior
//! code while the individual is in the status.
//!
//! # Algorithm
//!
//! ```text
//! for each individual in the observation log (discovery order):
//!     matched, total = 0, 0
//!     for each of the individual's status windows [start, end]:
//!         matched += observations in window with code == target
//!         total   += observations in window
//!     percentage = 100 * matched / total   (undefined when total == 0)
//! ```
//!
//! Individuals are driven by the observation log. Interval rows for
//! individuals absent from the log are ignored, and an individual without
//! any interval row gets an undefined percentage rather than zero.
//!
//! Counts accumulate per window. When two windows of the same individual
//! overlap, observations in the overlap are counted once for each window.

use std::iter::Sum;

use crate::{
    individual::IndividualId,
    interval::IntervalTable,
    observation::{BehaviorCode, ObservationLog},
};

/// Observation counts accumulated over one or more windows.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Add, derive_more::AddAssign,
)]
pub struct WindowCounts {
    /// Observations carrying the target behavior code.
    pub matched: usize,
    /// All observations, regardless of behavior code.
    pub total: usize,
}

impl WindowCounts {
    /// Share of matched observations scaled to 0-100.
    ///
    /// Returns `None` when no observation fell inside the windows, keeping
    /// "no data" distinct from "zero percent".
    ///
    /// # Examples
    ///
    /// ```
    /// use storkwatch_analysis::aggregate::WindowCounts;
    ///
    /// assert_eq!(WindowCounts { matched: 1, total: 4 }.percentage(), Some(25.0));
    /// assert_eq!(WindowCounts { matched: 0, total: 4 }.percentage(), Some(0.0));
    /// assert_eq!(WindowCounts { matched: 0, total: 0 }.percentage(), None);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percentage(self) -> Option<f64> {
        (self.total != 0).then(|| 100.0 * self.matched as f64 / self.total as f64)
    }
}

impl Sum for WindowCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, counts| acc + counts)
    }
}

/// Target-behavior percentage of one individual for one status.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentageRecord {
    pub individual: IndividualId,
    /// Counts accumulated over all of the individual's windows.
    pub counts: WindowCounts,
    /// `100 * matched / total`, or `None` when `total` is zero.
    pub percentage: Option<f64>,
}

impl PercentageRecord {
    #[must_use]
    pub fn new(individual: IndividualId, counts: WindowCounts) -> Self {
        Self {
            individual,
            counts,
            percentage: counts.percentage(),
        }
    }
}

/// Computes the per-individual percentage of `target` observations within
/// each individual's status windows.
///
/// Returns one record per distinct individual of `log`, in the log's
/// discovery order.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storkwatch_analysis::{
///     aggregate::aggregate,
///     individual::IndividualId,
///     interval::{IntervalTable, StatusInterval},
///     observation::{BehaviorCode, Observation, ObservationLog},
/// };
///
/// let at = |h, m| NaiveDate::from_ymd_opt(2014, 6, 1).unwrap().and_hms_opt(h, m, 0).unwrap();
/// let id = IndividualId::new("1");
/// let log = ObservationLog::from_observations([
///     Observation::new(id.clone(), at(9, 0), Some(BehaviorCode(40))),
///     Observation::new(id.clone(), at(9, 5), Some(BehaviorCode(1))),
///     Observation::new(id.clone(), at(9, 10), Some(BehaviorCode(40))),
/// ]);
/// let intervals = IntervalTable::from_intervals([StatusInterval::new(id, at(9, 0), at(9, 10))]);
///
/// let records = aggregate(&log, &intervals, BehaviorCode(40));
/// assert_eq!(records.len(), 1);
/// assert!((records[0].percentage.unwrap() - 200.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn aggregate(
    log: &ObservationLog,
    intervals: &IntervalTable,
    target: BehaviorCode,
) -> Vec<PercentageRecord> {
    let orphans = intervals.orphans(log).count();
    if orphans > 0 {
        log::debug!("Ignoring interval rows of {orphans} individuals without observations");
    }

    log.tracks()
        .map(|(individual, track)| {
            let windows = intervals.windows_for(individual);
            let counts = windows
                .iter()
                .map(|window| track.count_in(window, target))
                .sum::<WindowCounts>();
            log::debug!(
                "Individual {individual}: {} windows, {}/{} observations with code {target}",
                windows.len(),
                counts.matched,
                counts.total,
            );
            PercentageRecord::new(individual.clone(), counts)
        })
        .collect()
}

/// Defined percentages of `records`, in record order.
pub fn defined_percentages(records: &[PercentageRecord]) -> impl Iterator<Item = f64> + '_ {
    records.iter().filter_map(|record| record.percentage)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{
        interval::{StatusInterval, TimeWindow},
        observation::Observation,
    };

    const TARGET: BehaviorCode = BehaviorCode(40);

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn id(n: u32) -> IndividualId {
        IndividualId::from(n)
    }

    fn obs(n: u32, h: u32, m: u32, code: i64) -> Observation {
        Observation::new(id(n), at(h, m), Some(BehaviorCode(code)))
    }

    fn interval(n: u32, start: (u32, u32), end: (u32, u32)) -> StatusInterval {
        StatusInterval::new(id(n), at(start.0, start.1), at(end.0, end.1))
    }

    #[test]
    fn test_two_of_three_in_window() {
        let log = ObservationLog::from_observations([
            obs(1, 9, 0, 40),
            obs(1, 9, 5, 1),
            obs(1, 9, 10, 40),
        ]);
        let intervals = IntervalTable::from_intervals([interval(1, (9, 0), (9, 10))]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].individual, id(1));
        assert_eq!(records[0].counts, WindowCounts { matched: 2, total: 3 });
        let percentage = records[0].percentage.unwrap();
        assert!((percentage - 66.666_666_666_666_67).abs() < 1e-9);
    }

    #[test]
    fn test_no_observation_in_window_is_undefined() {
        let log = ObservationLog::from_observations([obs(2, 10, 0, 1)]);
        let intervals = IntervalTable::from_intervals([interval(2, (8, 0), (9, 0))]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].individual, id(2));
        assert_eq!(records[0].counts.total, 0);
        assert_eq!(records[0].percentage, None);
    }

    #[test]
    fn test_individual_without_intervals_is_undefined() {
        let log = ObservationLog::from_observations([obs(3, 9, 0, 40), obs(4, 9, 0, 40)]);
        let intervals = IntervalTable::from_intervals([interval(4, (8, 0), (10, 0))]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].individual, id(3));
        assert_eq!(records[0].percentage, None);
        assert_eq!(records[1].percentage, Some(100.0));
    }

    #[test]
    fn test_zero_matches_is_zero_not_undefined() {
        let log = ObservationLog::from_observations([obs(1, 9, 0, 7), obs(1, 9, 1, 8)]);
        let intervals = IntervalTable::from_intervals([interval(1, (9, 0), (9, 1))]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records[0].percentage, Some(0.0));
    }

    #[test]
    fn test_interval_only_individual_produces_no_row() {
        let log = ObservationLog::from_observations([obs(1, 9, 0, 40)]);
        let intervals = IntervalTable::from_intervals([
            interval(1, (8, 0), (10, 0)),
            interval(99, (8, 0), (10, 0)),
        ]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records.len(), 1);
        assert!(records.iter().all(|record| record.individual != id(99)));
    }

    #[test]
    fn test_multiple_windows_accumulate_before_normalizing() {
        // 1/1 in the first window and 0/3 in the second: 1/4 overall,
        // not the mean of per-window ratios.
        let log = ObservationLog::from_observations([
            obs(1, 8, 0, 40),
            obs(1, 12, 0, 1),
            obs(1, 12, 1, 1),
            obs(1, 12, 2, 1),
            obs(1, 15, 0, 40),
        ]);
        let intervals = IntervalTable::from_intervals([
            interval(1, (7, 0), (9, 0)),
            interval(1, (11, 0), (13, 0)),
        ]);

        let records = aggregate(&log, &intervals, TARGET);
        assert_eq!(records[0].counts, WindowCounts { matched: 1, total: 4 });
        assert_eq!(records[0].percentage, Some(25.0));
    }

    #[test]
    fn test_overlapping_windows_count_overlap_per_window() {
        let log = ObservationLog::from_observations([
            obs(1, 9, 0, 40),
            obs(1, 9, 30, 1),
            obs(1, 10, 0, 40),
        ]);
        let intervals = IntervalTable::from_intervals([
            interval(1, (9, 0), (9, 30)),
            interval(1, (9, 30), (10, 0)),
        ]);

        let records = aggregate(&log, &intervals, TARGET);
        // 09:30 lies in both windows and is counted twice
        assert_eq!(records[0].counts, WindowCounts { matched: 2, total: 4 });
        assert_eq!(records[0].percentage, Some(50.0));
    }

    #[test]
    fn test_output_follows_discovery_order() {
        let log = ObservationLog::from_observations([
            obs(30, 9, 0, 40),
            obs(4, 9, 0, 40),
            obs(100, 9, 0, 40),
        ]);
        let records = aggregate(&log, &IntervalTable::default(), TARGET);
        let ids = records
            .iter()
            .map(|record| record.individual.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["4", "30", "100"]);
        assert_eq!(defined_percentages(&records).count(), 0);
    }

    #[test]
    fn test_randomized_counts_match_brute_force() {
        let mut rng = Pcg64::seed_from_u64(0x5702_4b);
        let base = at(0, 0);

        for _ in 0..50 {
            let num_individuals = rng.random_range(1..6_u32);
            let observations = (0..rng.random_range(0..200))
                .map(|_| {
                    let minutes = rng.random_range(0..600);
                    let code = if rng.random_bool(0.3) {
                        40
                    } else {
                        rng.random_range(0..5)
                    };
                    Observation::new(
                        id(rng.random_range(0..num_individuals)),
                        base + TimeDelta::minutes(minutes),
                        Some(BehaviorCode(code)),
                    )
                })
                .collect::<Vec<_>>();
            let intervals = (0..rng.random_range(0..8))
                .map(|_| {
                    let start = rng.random_range(0..600);
                    let end = rng.random_range(0..600);
                    StatusInterval::new(
                        id(rng.random_range(0..num_individuals + 2)),
                        base + TimeDelta::minutes(start),
                        base + TimeDelta::minutes(end),
                    )
                })
                .collect::<Vec<_>>();

            let log = ObservationLog::from_observations(observations.clone());
            let table = IntervalTable::from_intervals(intervals.clone());
            let records = aggregate(&log, &table, TARGET);

            assert_eq!(records.len(), log.num_individuals());
            for record in &records {
                let expected = intervals
                    .iter()
                    .filter(|interval| interval.individual == record.individual)
                    .map(|interval| {
                        let in_window = observations.iter().filter(|o| {
                            o.individual == record.individual
                                && TimeWindow::contains(&interval.window, o.timestamp)
                        });
                        in_window.fold(WindowCounts::default(), |acc, o| WindowCounts {
                            matched: acc.matched + usize::from(o.behavior == Some(TARGET)),
                            total: acc.total + 1,
                        })
                    })
                    .sum::<WindowCounts>();
                assert_eq!(record.counts, expected);
                match record.percentage {
                    Some(p) => assert!((0.0..=100.0).contains(&p), "out of range: {p}"),
                    None => assert_eq!(record.counts.total, 0),
                }
            }
        }
    }
}
