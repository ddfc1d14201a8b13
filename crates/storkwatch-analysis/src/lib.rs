//! Behavior prevalence analysis for tracked storks
//!
//! This crate turns raw telemetry observations into per-individual behavior
//! percentages and compares those percentages between two age groups.
//!
//! # Overview
//!
//! The analysis runs in two stages with a file-based handoff in between:
//!
//! ## Aggregation
//!
//! For one (age group, status) combination:
//!
//! 1. **Index Observations** ([`observation::ObservationLog`]): Partition the
//!    age group's log by individual and sort each track by timestamp
//! 2. **Group Intervals** ([`interval::IntervalTable`]): Collect each
//!    individual's status windows
//! 3. **Aggregate** ([`aggregate::aggregate`]): Count target-behavior and total
//!    observations across all of an individual's windows and normalize to a
//!    percentage ([`aggregate::PercentageRecord`])
//!
//! ## Comparison
//!
//! For each status, once every aggregation has been persisted:
//!
//! 1. **Filter** ([`compare::GroupSamples`]): Drop undefined percentages from
//!    each age group
//! 2. **Test** ([`compare::compare`]): Run Levene's test and Student's t-test
//!    and collect the results ([`compare::GroupStatistics`])
//!
//! The groups, statuses, target behavior and file layout are described by a
//! [`study::StudyConfig`]. Timestamps are parsed with [`timestamp`].
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use storkwatch_analysis::{
//!     aggregate::aggregate,
//!     individual::IndividualId,
//!     interval::{IntervalTable, StatusInterval},
//!     observation::{BehaviorCode, Observation, ObservationLog},
//! };
//!
//! let at = |h, m| NaiveDate::from_ymd_opt(2014, 5, 2).unwrap().and_hms_opt(h, m, 0).unwrap();
//! let id = IndividualId::new("1");
//! let log = ObservationLog::from_observations([
//!     Observation::new(id.clone(), at(9, 0), Some(BehaviorCode(40))),
//!     Observation::new(id.clone(), at(9, 5), Some(BehaviorCode(1))),
//!     Observation::new(id.clone(), at(9, 10), Some(BehaviorCode(40))),
//! ]);
//! let intervals = IntervalTable::from_intervals([StatusInterval::new(id, at(9, 0), at(9, 10))]);
//!
//! let records = aggregate(&log, &intervals, BehaviorCode(40));
//! let percentage = records[0].percentage.unwrap();
//! assert!((percentage - 200.0 / 3.0).abs() < 1e-9);
//! ```

pub mod aggregate;
pub mod compare;
pub mod individual;
pub mod interval;
pub mod observation;
pub mod study;
pub mod timestamp;
