//! CSV tables exchanged between the pipeline stages
//!
//! Readers and writers work on any `io::Read` / `io::Write`; the `load_*` and
//! `save_*` wrappers bind them to files and attach the file path to errors.

use std::{io, path::Path};

use anyhow::Context;
use storkwatch_analysis::{
    aggregate::PercentageRecord,
    interval::{IntervalTable, StatusInterval},
    observation::{Observation, ObservationLog},
};

use crate::{
    schema::{
        percentage::PercentageRow,
        telemetry::{IntervalRow, ObservationRow},
    },
    util::{self, Output},
};

fn csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: io::Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader)
}

pub fn read_observation_log<R>(reader: R) -> anyhow::Result<ObservationLog>
where
    R: io::Read,
{
    let observations = csv_reader(reader)
        .deserialize::<ObservationRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(anyhow::Error::from)
                .and_then(ObservationRow::into_observation)
                .with_context(|| format!("Invalid observation at data row {}", index + 1))
        })
        .collect::<anyhow::Result<Vec<Observation>>>()?;
    Ok(ObservationLog::from_observations(observations))
}

pub fn load_observation_log(path: &Path) -> anyhow::Result<ObservationLog> {
    let reader = util::open_file("observation log", path)?;
    read_observation_log(reader)
        .with_context(|| format!("Failed to parse observation log file: {}", path.display()))
}

pub fn read_interval_table<R>(reader: R) -> anyhow::Result<IntervalTable>
where
    R: io::Read,
{
    let intervals = csv_reader(reader)
        .deserialize::<IntervalRow>()
        .enumerate()
        .map(|(index, row)| {
            row.map_err(anyhow::Error::from)
                .and_then(IntervalRow::into_interval)
                .with_context(|| format!("Invalid interval at data row {}", index + 1))
        })
        .collect::<anyhow::Result<Vec<StatusInterval>>>()?;
    Ok(IntervalTable::from_intervals(intervals))
}

pub fn load_interval_table(path: &Path) -> anyhow::Result<IntervalTable> {
    let reader = util::open_file("interval table", path)?;
    read_interval_table(reader)
        .with_context(|| format!("Failed to parse interval table file: {}", path.display()))
}

pub fn write_percentage_table<W>(writer: W, records: &[PercentageRecord]) -> anyhow::Result<()>
where
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(PercentageRow::from(record))?;
    }
    if records.is_empty() {
        writer.write_record(["research_ID", "percentage"])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_percentage_table(path: &Path, records: &[PercentageRecord]) -> anyhow::Result<()> {
    let output = Output::create(path.to_path_buf())?;
    write_percentage_table(output, records)
        .with_context(|| format!("Failed to write percentage table: {}", path.display()))
}

/// Reads the percentage column of a percentage table.
///
/// The value is taken from the second column by position, so tables with
/// any header load. Empty cells and `nan` are undefined percentages.
pub fn read_percentage_table<R>(reader: R) -> anyhow::Result<Vec<Option<f64>>>
where
    R: io::Read,
{
    let mut reader = csv_reader(reader);
    let mut percentages = vec![];
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let cell = record
            .get(1)
            .with_context(|| format!("Missing percentage column at data row {}", index + 1))?;
        percentages.push(parse_percentage(cell).with_context(|| {
            format!("Invalid percentage at data row {}: {cell}", index + 1)
        })?);
    }
    Ok(percentages)
}

pub fn load_percentage_table(path: &Path) -> anyhow::Result<Vec<Option<f64>>> {
    let reader = util::open_file("percentage table", path)?;
    read_percentage_table(reader)
        .with_context(|| format!("Failed to parse percentage table file: {}", path.display()))
}

fn parse_percentage(cell: &str) -> anyhow::Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    Ok(Some(cell.parse::<f64>()?))
}

/// A statistic table with one column per status and labelled rows.
///
/// The header's first cell is empty; non-finite values are written as `NaN`.
#[derive(Debug, Clone)]
pub struct ResultTable {
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
}

impl ResultTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
        }
    }

    pub fn push_row<I, T>(&mut self, label: &str, values: I)
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let values = values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>();
        debug_assert_eq!(values.len(), self.columns.len());
        self.rows.push((label.to_owned(), values));
    }

    pub fn write<W>(&self, writer: W) -> anyhow::Result<()>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(std::iter::once("").chain(self.columns.iter().map(String::as_str)))?;
        for (label, values) in &self.rows {
            writer.write_record(
                std::iter::once(label.as_str()).chain(values.iter().map(String::as_str)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let output = Output::create(path.to_path_buf())?;
        self.write(output)
            .with_context(|| format!("Failed to write result table: {}", path.display()))
    }
}

/// Formats a statistic so that every non-finite value reads `NaN`.
pub fn format_statistic(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_sign_positive() {
        "inf".to_owned()
    } else {
        "-inf".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use storkwatch_analysis::{
        aggregate::{WindowCounts, aggregate},
        individual::IndividualId,
        observation::BehaviorCode,
    };

    use super::*;

    const OBSERVATIONS: &str = "\
research_ID,date,time,behaviour2,speed
1,06/01/2014,09:00:00,40,0.1
1,06/01/2014,09:05:00,1,0.0
1,06/01/2014,09:10:00,40.0,0.0
2,06/01/2014,10:00:00,1,2.5
3,06/01/2014,09:05:00,,1.0
";

    const INTERVALS: &str = "\
research_ID,date from,hour from,date to,hour to
1,01/06/2014,09:00,01/06/2014,09:10
2,01/06/2014,08:00,01/06/2014,09:00
3,01/06/2014,09:00,01/06/2014,09:10
9,01/06/2014,09:00,01/06/2014,09:10
";

    #[test]
    fn test_reads_observation_log() {
        let log = read_observation_log(OBSERVATIONS.as_bytes()).unwrap();
        assert_eq!(log.num_observations(), 5);
        assert_eq!(log.num_individuals(), 3);
    }

    #[test]
    fn test_observation_log_error_names_row() {
        let text = "research_ID,date,time,behaviour2\n1,06/01/2014,09:00,40\n1,june,09:00,40\n";
        let err = read_observation_log(text.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("data row 2"));
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let text = "research_ID,date,time\n1,06/01/2014,09:00\n";
        assert!(read_observation_log(text.as_bytes()).is_err());
    }

    #[test]
    fn test_aggregates_tables_end_to_end() {
        let log = read_observation_log(OBSERVATIONS.as_bytes()).unwrap();
        let intervals = read_interval_table(INTERVALS.as_bytes()).unwrap();
        assert_eq!(intervals.num_intervals(), 4);

        let records = aggregate(&log, &intervals, BehaviorCode(40));
        let ids = records
            .iter()
            .map(|r| r.individual.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["1", "2", "3"]);
        assert!((records[0].percentage.unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(records[1].percentage, None);
        assert_eq!(records[2].percentage, Some(0.0));
    }

    #[test]
    fn test_differently_written_ids_are_joined() {
        let observations = "research_ID,date,time,behaviour2\n\
                            007,06/01/14,09:00,40\n\
                            7.0,06/01/14,09:05,1\n";
        let intervals = "research_ID,date from,hour from,date to,hour to\n\
                         7,01/06/2014,09:00,01/06/2014,09:10\n";
        let log = read_observation_log(observations.as_bytes()).unwrap();
        let intervals = read_interval_table(intervals.as_bytes()).unwrap();
        assert_eq!(log.num_individuals(), 1);

        let records = aggregate(&log, &intervals, BehaviorCode(40));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].individual.as_str(), "7");
        assert_eq!(records[0].percentage, Some(50.0));
    }

    #[test]
    fn test_percentage_table_format() {
        let records = [
            PercentageRecord::new(IndividualId::new("1"), WindowCounts { matched: 1, total: 4 }),
            PercentageRecord::new(IndividualId::new("2"), WindowCounts::default()),
        ];
        let mut buf = vec![];
        write_percentage_table(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "research_ID,percentage\n1,25.0\n2,\n");

        let percentages = read_percentage_table(text.as_bytes()).unwrap();
        assert_eq!(percentages, [Some(25.0), None]);
    }

    #[test]
    fn test_empty_percentage_table_keeps_header() {
        let mut buf = vec![];
        write_percentage_table(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "research_ID,percentage\n");
    }

    #[test]
    fn test_reads_positional_percentage_column() {
        let text = ",0\n1043,12.5\n1044,\n1045,nan\n1046,NaN\n";
        let percentages = read_percentage_table(text.as_bytes()).unwrap();
        assert_eq!(percentages, [Some(12.5), None, None, None]);
    }

    #[test]
    fn test_result_table_format() {
        let mut table = ResultTable::new(["nesting", "wintering"]);
        table.push_row("Levene", [0.5, f64::NAN].map(format_statistic));
        table.push_row("0", [3_i64, -1]);
        let mut buf = vec![];
        table.write(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            ",nesting,wintering\nLevene,0.5,NaN\n0,3,-1\n"
        );
    }
}
