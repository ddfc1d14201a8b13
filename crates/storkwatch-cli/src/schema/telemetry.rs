use anyhow::Context;
use serde::Deserialize;
use storkwatch_analysis::{
    individual::IndividualId,
    interval::StatusInterval,
    observation::{BehaviorCode, Observation},
    timestamp::{DateOrder, parse_timestamp},
};

/// One row of an age group's raw observation log.
///
/// Columns other than these four are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationRow {
    #[serde(rename = "research_ID")]
    pub research_id: String,
    pub date: String,
    pub time: String,
    /// Behavior classification; blank when the record was not classified.
    #[serde(rename = "behaviour2")]
    pub behaviour: Option<String>,
}

impl ObservationRow {
    pub fn into_observation(self) -> anyhow::Result<Observation> {
        let timestamp = parse_timestamp(&self.date, &self.time, DateOrder::MonthFirst)
            .with_context(|| format!("Invalid timestamp for individual {}", self.research_id))?;
        let behavior = self
            .behaviour
            .as_deref()
            .map(parse_behavior_code)
            .transpose()?
            .flatten();
        Ok(Observation::new(
            IndividualId::new(&self.research_id),
            timestamp,
            behavior,
        ))
    }
}

/// One row of a status interval table. Dates are written day-first.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRow {
    #[serde(rename = "research_ID")]
    pub research_id: String,
    #[serde(rename = "date from")]
    pub date_from: String,
    #[serde(rename = "hour from")]
    pub hour_from: String,
    #[serde(rename = "date to")]
    pub date_to: String,
    #[serde(rename = "hour to")]
    pub hour_to: String,
}

impl IntervalRow {
    pub fn into_interval(self) -> anyhow::Result<StatusInterval> {
        let start = parse_timestamp(&self.date_from, &self.hour_from, DateOrder::DayFirst)
            .with_context(|| {
                format!("Invalid interval start for individual {}", self.research_id)
            })?;
        let end = parse_timestamp(&self.date_to, &self.hour_to, DateOrder::DayFirst)
            .with_context(|| format!("Invalid interval end for individual {}", self.research_id))?;
        Ok(StatusInterval::new(
            IndividualId::new(&self.research_id),
            start,
            end,
        ))
    }
}

/// Parses a behavior cell; integral floats such as `40.0` are accepted.
fn parse_behavior_code(text: &str) -> anyhow::Result<Option<BehaviorCode>> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(code) = text.parse::<i64>() {
        return Ok(Some(BehaviorCode(code)));
    }
    let value = text
        .parse::<f64>()
        .with_context(|| format!("Invalid behavior code: {text}"))?;
    anyhow::ensure!(
        value.is_finite() && value.fract() == 0.0,
        "Invalid behavior code: {text}"
    );
    #[expect(clippy::cast_possible_truncation)]
    let code = value as i64;
    Ok(Some(BehaviorCode(code)))
}
