//! CSV file location store
//!
//! Expected columns (case-insensitive, any order): `id`, `name`, `state`
//! (or `region`), `cost_factor` (or `factor`), `latitude` (or `lat`),
//! `longitude` (or `lng`/`lon`). Only `name` and `cost_factor` are required.

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use hotelcost_core::error::{EstimatorError, Result};
use hotelcost_core::models::LocationRecord;
use hotelcost_core::normalize::parse_number;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::ports::LocationStore;

/// Location store backed by a CSV file, read on every `list_locations` call
#[derive(Debug, Clone)]
pub struct CsvLocationStore {
    path: PathBuf,
}

impl CsvLocationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Column positions resolved from the header row
struct Columns {
    id: Option<usize>,
    name: usize,
    region: Option<usize>,
    cost_factor: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let require = |names: &[&str]| {
            find(names).ok_or_else(|| EstimatorError::MissingColumn {
                column: names[0].to_string(),
                path: path.to_path_buf(),
            })
        };

        Ok(Self {
            id: find(&["id"]),
            name: require(&["name", "city", "location"])?,
            region: find(&["state", "region"]),
            cost_factor: require(&["cost_factor", "factor", "multiplier"])?,
            latitude: find(&["latitude", "lat"]),
            longitude: find(&["longitude", "lng", "lon"]),
        })
    }
}

fn cell(record: &StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
}

/// Parse location records from CSV bytes.
///
/// Each row is decoded on its own; a row with invalid UTF-8 is skipped like
/// any other unreadable row.
pub fn parse_locations(content: impl AsRef<[u8]>, path: &Path) -> Result<Vec<LocationRecord>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_ref());

    let headers = reader.headers().map_err(|e| EstimatorError::csv(path, e))?.clone();
    let columns = Columns::resolve(&headers, path)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!(line = line + 2, error = %e, "Skipping unreadable location row");
                continue;
            }
        };

        let name = cell(&row, Some(columns.name));
        let Some(cost_factor) = parse_number(cell(&row, Some(columns.cost_factor))) else {
            tracing::debug!(line = line + 2, name, "Skipping location without a cost factor");
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let id = match cell(&row, columns.id) {
            "" => Uuid::new_v4().to_string(),
            id => id.to_string(),
        };

        records.push(LocationRecord {
            id,
            name: name.to_string(),
            region: cell(&row, columns.region).to_string(),
            cost_factor,
            latitude: parse_number(cell(&row, columns.latitude)),
            longitude: parse_number(cell(&row, columns.longitude)),
        });
    }

    Ok(records)
}

#[async_trait]
impl LocationStore for CsvLocationStore {
    async fn list_locations(&self) -> Result<Vec<LocationRecord>> {
        let content = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EstimatorError::DataFileNotFound { path: self.path.clone() }
            } else {
                EstimatorError::Io(e)
            }
        })?;
        parse_locations(&content, &self.path)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
