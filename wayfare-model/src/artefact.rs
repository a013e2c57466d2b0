//! Persist fitted coefficients as a versioned JSON document.

use std::io::{BufReader, BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfare_fs::{create_utf8_file, ensure_parent_dir, open_utf8_file};

use crate::{Coefficients, LogisticModel};

/// Version written into every model file.
pub const MODEL_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ModelDocument {
    version: u32,
    coefficients: Coefficients,
}

/// Errors raised while reading or writing a model file.
#[derive(Debug, Error)]
pub enum ModelFileError {
    /// Creating the parent directory for the output file failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Creating or flushing the output file failed.
    #[error("failed to write model file at {path}")]
    Write {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the coefficients failed.
    #[error("failed to serialise model into {path}")]
    Serialise {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The model file could not be opened.
    #[error("failed to open model file at {path}")]
    Open {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The model file is not valid JSON for a model document.
    #[error("failed to decode model file at {path}")]
    Decode {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The model file was written by an incompatible version.
    #[error("model file {path} has version {found}, expected {MODEL_FILE_VERSION}")]
    UnsupportedVersion {
        /// Requested path.
        path: Utf8PathBuf,
        /// Version found in the file.
        found: u32,
    },
}

/// Write `model` to `path` as pretty-printed JSON.
///
/// Missing parent directories are created.
///
/// # Errors
/// Returns [`ModelFileError`] when the directory or file cannot be created or
/// the document cannot be written.
pub fn write_model_file(path: &Utf8Path, model: &LogisticModel) -> Result<(), ModelFileError> {
    ensure_parent_dir(path).map_err(|source| ModelFileError::CreateParent {
        path: path
            .parent()
            .map_or_else(|| Utf8Path::new(".").to_path_buf(), Utf8Path::to_path_buf),
        source,
    })?;
    let file = create_utf8_file(path).map_err(|source| ModelFileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let document = ModelDocument {
        version: MODEL_FILE_VERSION,
        coefficients: *model.coefficients(),
    };
    serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| {
        ModelFileError::Serialise {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| ModelFileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("wrote model file {path}");
    Ok(())
}

/// Read a model previously written by [`write_model_file`].
///
/// # Errors
/// Returns [`ModelFileError`] when the file cannot be opened or decoded, or
/// carries an unsupported version.
pub fn read_model_file(path: &Utf8Path) -> Result<LogisticModel, ModelFileError> {
    let file = open_utf8_file(path).map_err(|source| ModelFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let document: ModelDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelFileError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    if document.version != MODEL_FILE_VERSION {
        return Err(ModelFileError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: document.version,
        });
    }
    Ok(LogisticModel::new(document.coefficients))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn utf8_path(dir: &TempDir, relative: &str) -> Utf8PathBuf {
        Utf8Path::from_path(dir.path())
            .expect("utf-8 temp dir")
            .join(relative)
    }

    #[rstest]
    fn model_survives_a_file_round_trip(temp_dir: TempDir) {
        let path = utf8_path(&temp_dir, "nested/dir/model.json");
        let model = LogisticModel::new(Coefficients::from_array([
            7.029, -1.043, -0.000_8, -0.014, 2.035, 0.386,
        ]));
        write_model_file(&path, &model).expect("write model");
        let restored = read_model_file(&path).expect("read model");
        let pairs = restored
            .coefficients()
            .to_array()
            .into_iter()
            .zip(model.coefficients().to_array());
        for (read, written) in pairs {
            assert!((read - written).abs() <= f64::EPSILON * written.abs());
        }
    }

    #[rstest]
    fn written_file_is_versioned_json(temp_dir: TempDir) {
        let path = utf8_path(&temp_dir, "model.json");
        write_model_file(&path, &LogisticModel::new(Coefficients::default()))
            .expect("write model");
        let text = std::fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["version"], 1);
        assert_eq!(value["coefficients"]["intercept"], 0.0);
    }

    #[rstest]
    fn unknown_version_is_rejected(temp_dir: TempDir) {
        let path = utf8_path(&temp_dir, "model.json");
        std::fs::write(
            &path,
            r#"{"version": 9, "coefficients": {"intercept": 0, "party_size": 0,
                "distance_km": 0, "price_eur": 0, "is_foreign": 0, "climate_match": 0}}"#,
        )
        .expect("write fixture");
        let err = read_model_file(&path).unwrap_err();
        assert!(matches!(
            err,
            ModelFileError::UnsupportedVersion { found: 9, .. }
        ));
    }

    #[rstest]
    fn malformed_file_is_a_decode_error(temp_dir: TempDir) {
        let path = utf8_path(&temp_dir, "model.json");
        std::fs::write(&path, "not json").expect("write fixture");
        assert!(matches!(
            read_model_file(&path),
            Err(ModelFileError::Decode { .. })
        ));
    }

    #[rstest]
    fn missing_file_is_an_open_error(temp_dir: TempDir) {
        let path = utf8_path(&temp_dir, "absent.json");
        assert!(matches!(
            read_model_file(&path),
            Err(ModelFileError::Open { .. })
        ));
    }
}
