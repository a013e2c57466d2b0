//! Load historical trip outcomes from CSV or JSON.
//!
//! Both formats use the column names of the historical export:
//! `admit,per,dis,din,nativo_extranjero,preferencia_clima`. Every row is
//! validated into a [`TrainingRecord`]; failures name the 1-based data row.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use thiserror::Error;
use wayfare_core::{TrainingRecord, TrainingRecordError};
use wayfare_fs::open_utf8_file;

/// On-disk encoding of a training dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of row objects.
    Json,
}

impl DatasetFormat {
    /// Infer the format from the file extension, ignoring case.
    ///
    /// # Examples
    /// ```
    /// use camino::Utf8Path;
    /// use wayfare_model::DatasetFormat;
    ///
    /// assert_eq!(DatasetFormat::from_path(Utf8Path::new("trips.CSV")), Some(DatasetFormat::Csv));
    /// assert_eq!(DatasetFormat::from_path(Utf8Path::new("trips.xlsx")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let extension = path.extension()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Errors raised while loading a training dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open training data at {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file extension is neither `.csv` nor `.json`.
    #[error("unsupported training data format for {path} (expected .csv or .json)")]
    UnsupportedFormat {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The CSV payload could not be parsed.
    #[error("failed to parse CSV training data")]
    Csv {
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// The JSON payload could not be parsed.
    #[error("failed to parse JSON training data")]
    Json {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A 0/1 column held another value.
    #[error("row {row}: column {column} must be 0 or 1, found {value}")]
    InvalidFlag {
        /// 1-based data row.
        row: usize,
        /// Column name.
        column: &'static str,
        /// Value found.
        value: u8,
    },
    /// A row failed record validation.
    #[error("row {row}: invalid training record")]
    InvalidRecord {
        /// 1-based data row.
        row: usize,
        /// Validation failure.
        #[source]
        source: TrainingRecordError,
    },
}

#[derive(Debug, Deserialize)]
struct TrainingRow {
    admit: u8,
    per: u32,
    dis: f64,
    din: f64,
    nativo_extranjero: u8,
    preferencia_clima: u8,
}

impl TrainingRow {
    fn into_record(self, row: usize) -> Result<TrainingRecord, DatasetError> {
        let admitted = flag(row, "admit", self.admit)?;
        let is_foreign = flag(row, "nativo_extranjero", self.nativo_extranjero)?;
        TrainingRecord::new(
            admitted,
            self.per,
            self.dis,
            self.din,
            is_foreign,
            self.preferencia_clima,
        )
        .map_err(|source| DatasetError::InvalidRecord { row, source })
    }
}

const fn flag(row: usize, column: &'static str, value: u8) -> Result<bool, DatasetError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DatasetError::InvalidFlag { row, column, value }),
    }
}

/// Load training records from a `.csv` or `.json` file.
///
/// # Errors
/// Returns [`DatasetError`] when the format is unsupported, the file cannot
/// be opened or parsed, or a row fails validation.
pub fn load_training_records(path: &Utf8Path) -> Result<Vec<TrainingRecord>, DatasetError> {
    let format = DatasetFormat::from_path(path).ok_or_else(|| DatasetError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let file = open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let records = match format {
        DatasetFormat::Csv => read_csv_records(reader),
        DatasetFormat::Json => read_json_records(reader),
    }?;
    debug!("loaded {} training records from {path}", records.len());
    Ok(records)
}

/// Parse CSV training rows. Surrounding whitespace in fields is ignored.
///
/// # Errors
/// Returns [`DatasetError::Csv`] for malformed input and the row-level
/// variants for invalid values.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<TrainingRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize::<TrainingRow>()
        .zip(1_usize..)
        .map(|(parsed, row)| {
            parsed
                .map_err(|source| DatasetError::Csv { source })?
                .into_record(row)
        })
        .collect()
}

/// Parse a JSON array of training rows.
///
/// # Errors
/// Returns [`DatasetError::Json`] for malformed input and the row-level
/// variants for invalid values.
pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<TrainingRecord>, DatasetError> {
    let rows: Vec<TrainingRow> =
        serde_json::from_reader(reader).map_err(|source| DatasetError::Json { source })?;
    rows.into_iter()
        .zip(1_usize..)
        .map(|(parsed, row)| parsed.into_record(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "admit,per,dis,din,nativo_extranjero,preferencia_clima\n";

    #[rstest]
    fn csv_rows_become_records() {
        let data = format!("{HEADER}1, 2, 350, 120, 0, 10\n0,4,2700,370,1,2\n");
        let records = read_csv_records(data.as_bytes()).expect("valid csv");
        assert_eq!(records.len(), 2);
        let first = records.first().expect("first record");
        assert!(first.admitted());
        assert_eq!(first.party_size(), 2);
        assert_eq!(first.climate_preference_score(), 10);
        let second = records.get(1).expect("second record");
        assert!(second.is_foreign());
    }

    #[rstest]
    fn header_only_csv_is_empty() {
        let records = read_csv_records(HEADER.as_bytes()).expect("valid csv");
        assert!(records.is_empty());
    }

    #[rstest]
    #[case("2,1,100,100,0,5\n", "admit")]
    #[case("1,1,100,100,3,5\n", "nativo_extranjero")]
    fn csv_flags_must_be_binary(#[case] line: &str, #[case] expected: &str) {
        let data = format!("{HEADER}1,1,100,100,0,5\n{line}");
        let err = read_csv_records(data.as_bytes()).unwrap_err();
        match err {
            DatasetError::InvalidFlag { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, expected);
            }
            other => panic!("expected InvalidFlag, got {other:?}"),
        }
    }

    #[rstest]
    fn csv_record_validation_names_the_row() {
        let data = format!("{HEADER}1,0,100,100,0,5\n");
        let err = read_csv_records(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidRecord {
                row: 1,
                source: TrainingRecordError::InvalidPartySize
            }
        ));
    }

    #[rstest]
    fn csv_rejects_non_numeric_fields() {
        let data = format!("{HEADER}1,two,100,100,0,5\n");
        let err = read_csv_records(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[rstest]
    fn json_rows_become_records() {
        let data = r#"[
            {"admit": 1, "per": 1, "dis": 200, "din": 220, "nativo_extranjero": 0, "preferencia_clima": 10},
            {"admit": 0, "per": 2, "dis": 1300.5, "din": 410, "nativo_extranjero": 1, "preferencia_clima": 2}
        ]"#;
        let records = read_json_records(data.as_bytes()).expect("valid json");
        assert_eq!(records.len(), 2);
        let second = records.get(1).expect("second record");
        assert_eq!(second.distance_km(), 1_300.5);
    }

    #[rstest]
    fn json_negative_price_is_rejected() {
        let data = r#"[{"admit": 1, "per": 1, "dis": 200, "din": -1, "nativo_extranjero": 0, "preferencia_clima": 10}]"#;
        let err = read_json_records(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidRecord {
                row: 1,
                source: TrainingRecordError::Negative { .. }
            }
        ));
    }

    #[rstest]
    fn unsupported_extension_is_reported_before_opening() {
        let err = load_training_records(Utf8Path::new("missing/trips.parquet")).unwrap_err();
        assert!(matches!(err, DatasetError::UnsupportedFormat { .. }));
    }

    #[rstest]
    fn missing_file_reports_path() {
        let path = Utf8Path::new("definitely/not/here.csv");
        match load_training_records(path).unwrap_err() {
            DatasetError::Open { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Open, got {other:?}"),
        }
    }
}
