use serde::Serialize;
use storkwatch_analysis::aggregate::PercentageRecord;

/// One row of a persisted percentage table.
///
/// An undefined percentage is written as an empty cell.
#[derive(Debug, Clone, Serialize)]
pub struct PercentageRow<'a> {
    #[serde(rename = "research_ID")]
    pub research_id: &'a str,
    pub percentage: Option<f64>,
}

impl<'a> From<&'a PercentageRecord> for PercentageRow<'a> {
    fn from(record: &'a PercentageRecord) -> Self {
        Self {
            research_id: record.individual.as_str(),
            percentage: record.percentage,
        }
    }
}
