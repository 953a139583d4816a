use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Required input file {0:?} not found")]
    MissingFile(PathBuf),

    #[error("Cannot read or write file")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse csv file {file_name:?}")]
    Csv {
        file_name: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Stop {stop_id:?} has an invalid {field} {value:?}")]
    InvalidCoordinate {
        stop_id: String,
        field: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ProcessingError>;
