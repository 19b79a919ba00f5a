// CSV loader for the passenger table
use crate::domain::passenger::{Dataset, Passenger};
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed dataset row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("dataset row {row}: name {name:?} has no title after a comma")]
    MalformedName { row: usize, name: String },
}

/// Columns the dashboard reads; any others are ignored.
#[derive(Debug, Deserialize)]
struct PassengerRecord {
    #[serde(rename = "Pclass", alias = "PassengerClass")]
    class: u8,
    #[serde(rename = "Survived")]
    survived: u8,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Age")]
    age: Option<f64>,
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let reader = csv::Reader::from_path(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_passengers(reader)
}

fn read_passengers<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset, DatasetError> {
    let mut passengers = Vec::new();

    for (index, record) in reader.deserialize::<PassengerRecord>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|source| DatasetError::Row { row, source })?;
        let passenger = Passenger::new(record.class, record.survived, record.name.clone(), record.age)
            .ok_or_else(|| DatasetError::MalformedName {
                row,
                name: record.name,
            })?;
        passengers.push(passenger);
    }

    tracing::debug!("Parsed {} passenger rows", passengers.len());
    Ok(Dataset::new(passengers))
}
