//! Reference cost table: historical projects by brand and size

use csv::{ReaderBuilder, StringRecord};
use hotelcost_core::error::{EstimatorError, Result};
use hotelcost_core::models::{CostTableRow, DivisionCost, RoomTypeCount};
use hotelcost_core::normalize::{normalize_brand, parse_number};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const BRAND_HEADERS: &[&str] = &["brand"];
const ROOMS_HEADERS: &[&str] = &["rooms", "room count", "keys"];
const FLOORS_HEADERS: &[&str] = &["floors", "floor count", "stories"];
const GSF_HEADERS: &[&str] = &["gsf", "gross sf", "gross area"];

/// Headers recognized as room-type unit counts
const ROOM_TYPE_HEADERS: &[&str] = &[
    "king",
    "queen queen",
    "king studio",
    "one bedroom",
    "two bedroom",
    "accessible king",
    "accessible queen queen",
];

/// What a cost table column holds
#[derive(Debug, Clone, PartialEq)]
enum ColumnRole {
    Brand,
    Rooms,
    Floors,
    Gsf,
    RoomType(String),
    Division(String),
    Ignored,
}

impl ColumnRole {
    fn classify(header: &str) -> Self {
        let trimmed = header.trim();
        let lowered = trimmed.to_lowercase();
        let is = |names: &[&str]| names.contains(&lowered.as_str());

        if is(BRAND_HEADERS) {
            Self::Brand
        } else if is(ROOMS_HEADERS) {
            Self::Rooms
        } else if is(FLOORS_HEADERS) {
            Self::Floors
        } else if is(GSF_HEADERS) {
            Self::Gsf
        } else if is(ROOM_TYPE_HEADERS) {
            Self::RoomType(trimmed.to_string())
        } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            Self::Division(trimmed.to_string())
        } else {
            Self::Ignored
        }
    }
}

/// In-memory index over the reference cost table
#[derive(Debug, Clone, Default)]
pub struct CostTableIndex {
    rows: Vec<CostTableRow>,
    skipped_rows: usize,
    source: Option<PathBuf>,
}

impl CostTableIndex {
    /// Build an index from already-parsed rows
    pub fn from_rows(rows: Vec<CostTableRow>) -> Self {
        Self { rows, skipped_rows: 0, source: None }
    }

    /// Load the cost table from a CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EstimatorError::DataFileNotFound { path: path.to_path_buf() }
            } else {
                EstimatorError::Io(e)
            }
        })?;
        let mut index = Self::from_reader(file, path)?;
        index.source = Some(path.to_path_buf());
        Ok(index)
    }

    /// Parse a headered cost table.
    ///
    /// Rows whose room count, floor count or gross area does not parse are
    /// skipped and counted; blank or malformed division cells are left out
    /// of that row.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut csv = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv.headers().map_err(|e| EstimatorError::csv(source, e))?.clone();
        let roles: Vec<ColumnRole> = headers.iter().map(ColumnRole::classify).collect();

        for (role, name) in [
            (ColumnRole::Brand, "brand"),
            (ColumnRole::Rooms, "rooms"),
            (ColumnRole::Floors, "floors"),
            (ColumnRole::Gsf, "gsf"),
        ] {
            if !roles.contains(&role) {
                return Err(EstimatorError::MissingColumn {
                    column: name.to_string(),
                    path: source.to_path_buf(),
                });
            }
        }

        let mut rows = Vec::new();
        let mut skipped_rows = 0;
        for (line, record) in csv.records().enumerate() {
            let parsed = record.ok().and_then(|record| parse_row(&record, &roles));
            match parsed {
                Some(row) => rows.push(row),
                None => {
                    skipped_rows += 1;
                    tracing::debug!(line = line + 2, "Skipping malformed cost table row");
                }
            }
        }

        Ok(Self { rows, skipped_rows, source: None })
    }

    /// Find the reference row closest to the requested size.
    ///
    /// `brand` must already be canonical (see `normalize_brand`). Rows with
    /// the requested floor count are preferred; when none exist every row of
    /// the brand is considered. Among candidates the smallest room-count
    /// difference wins, then the smallest floor difference, then the larger
    /// room count, then file order.
    pub fn find_best_match(&self, brand: &str, floors: u32, rooms: u32) -> Option<&CostTableRow> {
        let brand_rows: Vec<(usize, &CostTableRow)> =
            self.rows.iter().enumerate().filter(|(_, row)| row.brand == brand).collect();

        if brand_rows.is_empty() {
            tracing::warn!(brand, "No cost data for brand");
            return None;
        }

        let same_floors: Vec<(usize, &CostTableRow)> =
            brand_rows.iter().copied().filter(|(_, row)| row.floors == floors).collect();
        let candidates = if same_floors.is_empty() { brand_rows } else { same_floors };

        candidates
            .into_iter()
            .min_by_key(|(position, row)| {
                (
                    row.rooms.abs_diff(rooms),
                    row.floors.abs_diff(floors),
                    std::cmp::Reverse(row.rooms),
                    *position,
                )
            })
            .map(|(_, row)| row)
    }

    /// Loaded brands with their row counts
    pub fn brands(&self) -> BTreeMap<String, usize> {
        let mut brands = BTreeMap::new();
        for row in &self.rows {
            *brands.entry(row.brand.clone()).or_insert(0) += 1;
        }
        brands
    }

    /// Distinct division labels in first-seen order
    pub fn divisions(&self) -> Vec<String> {
        let mut divisions: Vec<String> = Vec::new();
        for division in self.rows.iter().flat_map(|row| &row.divisions) {
            if !divisions.contains(&division.division) {
                divisions.push(division.division.clone());
            }
        }
        divisions
    }

    pub fn rows(&self) -> &[CostTableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Whole, non-negative count from a numeric cell
fn parse_count(cell: &str) -> Option<u32> {
    let value = parse_number(cell)?;
    (value >= 0.0 && value <= f64::from(u32::MAX)).then(|| value.round() as u32)
}

fn parse_row(record: &StringRecord, roles: &[ColumnRole]) -> Option<CostTableRow> {
    let mut brand = None;
    let mut rooms = None;
    let mut floors = None;
    let mut gsf = None;
    let mut room_types = Vec::new();
    let mut divisions = Vec::new();

    for (role, cell) in roles.iter().zip(record.iter()) {
        match role {
            ColumnRole::Brand => brand = Some(normalize_brand(cell)),
            ColumnRole::Rooms => rooms = parse_count(cell),
            ColumnRole::Floors => floors = parse_count(cell),
            ColumnRole::Gsf => gsf = parse_number(cell).filter(|v| *v >= 0.0),
            ColumnRole::RoomType(name) => {
                if let Some(count) = parse_count(cell) {
                    room_types.push(RoomTypeCount { room_type: name.clone(), count });
                }
            }
            ColumnRole::Division(name) => {
                if let Some(cost) = parse_number(cell) {
                    divisions.push(DivisionCost { division: name.clone(), cost });
                }
            }
            ColumnRole::Ignored => {}
        }
    }

    let brand = brand.filter(|b| !b.is_empty())?;
    Some(CostTableRow { brand, rooms: rooms?, floors: floors?, gsf: gsf?, room_types, divisions })
}
