//! Study configuration: which groups are compared, what is measured, and
//! where the files live.
//!
//! The configuration is plain serde data so it can be stored as JSON next to
//! the study data. Every field has a default reproducing the migration study
//! of adult and juvenile storks, so an empty JSON object `{}` is a valid
//! configuration.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use storkwatch_stats::hypothesis::Center;

use crate::observation::BehaviorCode;

/// Number of age groups a study compares.
pub const AGE_GROUP_COUNT: usize = 2;

/// Age group compared in the study (e.g. adults).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AgeGroup {
    /// Key used in file names.
    pub name: String,
    /// Text shown in reports and legends.
    pub label: String,
}

/// Life-cycle or seasonal phase during which behavior is measured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Status {
    /// Key used in file names and result columns.
    pub name: String,
    /// Text shown under the status in plots.
    pub label: String,
}

impl AgeGroup {
    #[must_use]
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
        }
    }
}

impl Status {
    #[must_use]
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Location for the absolute deviations of Levene's test.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeveneCenter {
    #[default]
    Median,
    Mean,
}

impl From<LeveneCenter> for Center {
    fn from(center: LeveneCenter) -> Self {
        match center {
            LeveneCenter::Median => Center::Median,
            LeveneCenter::Mean => Center::Mean,
        }
    }
}

/// Directory layout of a study, relative to a data root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLayout {
    pub raw_data_dir: PathBuf,
    pub boundaries_dir: PathBuf,
    pub percentages_dir: PathBuf,
    pub results_dir: PathBuf,
    pub figure_path: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            raw_data_dir: PathBuf::from("RawData"),
            boundaries_dir: PathBuf::from("TimeBoundaries"),
            percentages_dir: PathBuf::from("40Percentages"),
            results_dir: PathBuf::from("StatisticResults"),
            figure_path: PathBuf::from("StatisticResults/boxplot.png"),
        }
    }
}

impl DataLayout {
    /// Returns the layout with every path placed under `root`.
    ///
    /// Absolute paths are kept as they are.
    #[must_use]
    pub fn rooted(&self, root: &Path) -> Self {
        Self {
            raw_data_dir: root.join(&self.raw_data_dir),
            boundaries_dir: root.join(&self.boundaries_dir),
            percentages_dir: root.join(&self.percentages_dir),
            results_dir: root.join(&self.results_dir),
            figure_path: root.join(&self.figure_path),
        }
    }

    /// `<raw_data_dir>/<age>.csv`
    #[must_use]
    pub fn observation_log(&self, age: &AgeGroup) -> PathBuf {
        self.raw_data_dir.join(format!("{}.csv", age.name))
    }

    /// `<boundaries_dir>/<age>/<status>.csv`
    #[must_use]
    pub fn interval_table(&self, age: &AgeGroup, status: &Status) -> PathBuf {
        self.boundaries_dir
            .join(&age.name)
            .join(format!("{}.csv", status.name))
    }

    /// `<percentages_dir>/<age>/<status>.csv`
    #[must_use]
    pub fn percentage_table(&self, age: &AgeGroup, status: &Status) -> PathBuf {
        self.percentages_dir
            .join(&age.name)
            .join(format!("{}.csv", status.name))
    }

    #[must_use]
    pub fn pvalues_table(&self) -> PathBuf {
        self.results_dir.join("pvalues.csv")
    }

    #[must_use]
    pub fn statistics_table(&self) -> PathBuf {
        self.results_dir.join("statistics.csv")
    }

    #[must_use]
    pub fn freedom_degree_table(&self) -> PathBuf {
        self.results_dir.join("freedom_degree.csv")
    }
}

/// Reasons a [`StudyConfig`] is rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("expected exactly 2 age groups, got {count}")]
    AgeGroupCount { count: usize },
    #[display("at least one status is required")]
    NoStatuses,
    #[display("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },
    #[display("significance level must lie in (0, 1), got {value}")]
    SignificanceLevel { value: f64 },
}

/// Complete configuration of one study.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StudyConfig {
    pub age_groups: Vec<AgeGroup>,
    /// Statuses in report and plot order.
    pub statuses: Vec<Status>,
    pub target_behavior: BehaviorCode,
    /// A t-test p-value below this level is marked significant.
    pub significance_level: f64,
    pub levene_center: LeveneCenter,
    pub layout: DataLayout,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            age_groups: vec![
                AgeGroup::new("Adults", "Adults"),
                AgeGroup::new("Juveniles", "Juveniles"),
            ],
            statuses: vec![
                Status::new("nesting", "Nesting"),
                Status::new("migration_to_africa", "Fall Migration"),
                Status::new("wintering", "Wintering"),
                Status::new("migration_to_europe", "Spring Migration"),
            ],
            target_behavior: BehaviorCode(40),
            significance_level: 0.05,
            levene_center: LeveneCenter::Median,
            layout: DataLayout::default(),
        }
    }
}

impl StudyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.age_groups.len() != AGE_GROUP_COUNT {
            return Err(ConfigError::AgeGroupCount {
                count: self.age_groups.len(),
            });
        }
        if self.statuses.is_empty() {
            return Err(ConfigError::NoStatuses);
        }
        check_unique("age group", self.age_groups.iter().map(|a| a.name.as_str()))?;
        check_unique("status", self.statuses.iter().map(|s| s.name.as_str()))?;
        let alpha = self.significance_level;
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::SignificanceLevel { value: alpha });
        }
        Ok(())
    }

    #[must_use]
    pub fn age_group(&self, name: &str) -> Option<&AgeGroup> {
        self.age_groups.iter().find(|age| age.name == name)
    }

    #[must_use]
    pub fn status(&self, name: &str) -> Option<&Status> {
        self.statuses.iter().find(|status| status.name == name)
    }

    /// The two compared age groups, in configured order.
    pub fn age_pair(&self) -> Result<(&AgeGroup, &AgeGroup), ConfigError> {
        match self.age_groups.as_slice() {
            [first, second] => Ok((first, second)),
            groups => Err(ConfigError::AgeGroupCount {
                count: groups.len(),
            }),
        }
    }
}

fn check_unique<'a, I>(kind: &'static str, names: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateName {
                kind,
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = StudyConfig::default();
        config.validate().unwrap();
        assert_eq!(config.target_behavior, BehaviorCode(40));
        let (first, second) = config.age_pair().unwrap();
        assert_eq!((first.name.as_str(), second.name.as_str()), ("Adults", "Juveniles"));
        assert_eq!(config.statuses[1].label, "Fall Migration");
        assert_eq!(config.age_group("Juveniles"), Some(second));
        assert_eq!(config.age_group("Chicks"), None);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: StudyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StudyConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config: StudyConfig = serde_json::from_str(
            r#"{
                "target_behavior": 12,
                "levene_center": "mean",
                "layout": { "results_dir": "out" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.target_behavior, BehaviorCode(12));
        assert_eq!(Center::from(config.levene_center), Center::Mean);
        assert_eq!(config.layout.results_dir, PathBuf::from("out"));
        assert_eq!(config.layout.raw_data_dir, PathBuf::from("RawData"));
    }

    #[test]
    fn test_rejects_wrong_age_group_count() {
        let mut config = StudyConfig::default();
        config.age_groups.push(AgeGroup::new("Chicks", "Chicks"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::AgeGroupCount { count: 3 })
        );
    }

    #[test]
    fn test_rejects_empty_statuses() {
        let config = StudyConfig {
            statuses: vec![],
            ..StudyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoStatuses));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut config = StudyConfig::default();
        config.statuses.push(Status::new("wintering", "Again"));
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "duplicate status name: wintering");
    }

    #[test]
    fn test_rejects_significance_level_out_of_range() {
        for value in [0.0, 1.0, -0.1, f64::NAN] {
            let config = StudyConfig {
                significance_level: value,
                ..StudyConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::SignificanceLevel { .. })
            ));
        }
    }

    #[test]
    fn test_layout_paths() {
        let config = StudyConfig::default();
        let layout = config.layout.rooted(Path::new("/data"));
        let (adults, _) = config.age_pair().unwrap();
        let nesting = config.status("nesting").unwrap();
        assert_eq!(
            layout.observation_log(adults),
            PathBuf::from("/data/RawData/Adults.csv")
        );
        assert_eq!(
            layout.interval_table(adults, nesting),
            PathBuf::from("/data/TimeBoundaries/Adults/nesting.csv")
        );
        assert_eq!(
            layout.percentage_table(adults, nesting),
            PathBuf::from("/data/40Percentages/Adults/nesting.csv")
        );
        assert_eq!(
            layout.pvalues_table(),
            PathBuf::from("/data/StatisticResults/pvalues.csv")
        );
    }
}
