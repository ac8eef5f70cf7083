//! Assembly definitions: line items within each construction division
//!
//! The source CSV interleaves division header rows with line-item rows and
//! has no explicit row-type column, so rows are classified by shape:
//!
//! ```text
//! name/division, description, input basis, input value, % of price
//! 03_Concrete,   03_Concrete,            ,            ,   100%      <- header
//! Slab on Grade, 5" SOG w/ vapor barrier, % of GSF,  25,  40%       <- data
//! ```
//!
//! The first five lines of the file are preamble and never parsed.

use csv::{ReaderBuilder, StringRecord};
use hotelcost_core::error::{EstimatorError, Result};
use hotelcost_core::models::{
    AssemblyDefinition, AssemblyLookup, AssemblyResult, InputBasis, ProjectStats,
};
use hotelcost_core::normalize::{normalize_division, parse_number, strip_percent};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Lines of preamble before the first header or data row
pub const PREAMBLE_LINES: usize = 5;

/// Fallbacks for division labels whose vocabulary differs between the cost
/// table and the assembly file. Extend by hand when a new mismatch shows up.
enum AliasRule {
    /// A label containing `needle` maps to the `target` division
    Contains { needle: &'static str, target: &'static str },
    /// A label starting with the prefix maps to the first key sharing it
    SharedPrefix(&'static str),
}

const ALIAS_RULES: &[AliasRule] = &[
    AliasRule::Contains { needle: "thermal", target: "protection" },
    AliasRule::Contains { needle: "moisture", target: "protection" },
    AliasRule::SharedPrefix("wood"),
    AliasRule::SharedPrefix("specialt"),
];

/// A parsed line-item row, before it is attached to a division
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyRow {
    pub name: String,
    pub description: String,
    pub basis_label: String,
    pub input_value: f64,

    /// Share of the division price as a 0-1 fraction
    pub percent_price: f64,
}

/// Shape-based classification of one assembly CSV row
#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    /// Division header; `None` when the name cell is blank
    Header(Option<String>),
    Data(AssemblyRow),
    Skip,
}

/// Classify a row as a division header, a line item, or noise.
///
/// A header has an empty basis column and either a price column of exactly
/// "100" (ignoring "%" and ",") or identical first and second columns. A
/// line item has non-empty basis, value and price columns that parse as
/// numbers; anything else is skipped.
pub fn classify_row(record: &StringRecord) -> RowKind {
    let column = |i: usize| record.get(i).map(str::trim).unwrap_or("");
    let (first, second, basis, value, price) =
        (column(0), column(1), column(2), column(3), column(4));

    if basis.is_empty() && (strip_percent(price) == "100" || first == second) {
        return RowKind::Header((!first.is_empty()).then(|| first.to_string()));
    }

    if basis.is_empty() || value.is_empty() || price.is_empty() {
        return RowKind::Skip;
    }

    let (Some(input_value), Some(percent)) = (parse_number(value), parse_number(price)) else {
        return RowKind::Skip;
    };

    RowKind::Data(AssemblyRow {
        name: if first.is_empty() { second } else { first }.to_string(),
        description: second.to_string(),
        basis_label: basis.to_string(),
        input_value,
        percent_price: percent / 100.0,
    })
}

/// Line items resolved for one division
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyMatch {
    pub lookup: AssemblyLookup,
    pub items: Vec<AssemblyResult>,
}

/// Division-keyed index of assembly definitions
#[derive(Debug, Clone, Default)]
pub struct AssemblyIndex {
    divisions: BTreeMap<String, Vec<AssemblyDefinition>>,
    loaded: bool,
    skipped_rows: usize,
    source: Option<PathBuf>,
}

impl AssemblyIndex {
    /// Load and index an assembly CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EstimatorError::DataFileNotFound { path: path.to_path_buf() }
            } else {
                EstimatorError::Io(e)
            }
        })?;
        let mut index = Self::from_reader(file)?;
        index.source = Some(path.to_path_buf());
        Ok(index)
    }

    /// Index assembly CSV from any byte source, preamble included.
    ///
    /// Text is decoded per record, so a row with invalid UTF-8 is skipped
    /// and counted without affecting the rest of the file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let mut line = Vec::new();
        for _ in 0..PREAMBLE_LINES {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
        }
        Ok(Self::index_records(reader))
    }

    /// Parse assembly CSV text, preamble included
    pub fn parse(content: &str) -> Self {
        let mut body = content.as_bytes();
        for _ in 0..PREAMBLE_LINES {
            body = match body.iter().position(|&b| b == b'\n') {
                Some(end) => &body[end + 1..],
                None => &[],
            };
        }
        Self::index_records(body)
    }

    fn index_records<R: Read>(body: R) -> Self {
        let mut reader = ReaderBuilder::new().has_headers(false).flexible(true).from_reader(body);

        let mut divisions: BTreeMap<String, Vec<AssemblyDefinition>> = BTreeMap::new();
        let mut current_division: Option<String> = None;
        let mut skipped_rows = 0;

        for record in reader.records() {
            let Ok(record) = record else {
                skipped_rows += 1;
                continue;
            };

            match classify_row(&record) {
                RowKind::Header(Some(name)) => current_division = Some(name),
                RowKind::Header(None) => {}
                RowKind::Data(row) => match &current_division {
                    Some(division) => {
                        let definition = AssemblyDefinition {
                            division: division.clone(),
                            name: row.name,
                            description: row.description,
                            basis: InputBasis::from_label(&row.basis_label),
                            basis_label: row.basis_label,
                            input_value: row.input_value,
                            percent_price: row.percent_price,
                        };
                        divisions.entry(normalize_division(division)).or_default().push(definition);
                    }
                    None => skipped_rows += 1,
                },
                RowKind::Skip => {
                    if record.iter().any(|cell| !cell.trim().is_empty()) {
                        skipped_rows += 1;
                    }
                }
            }
        }

        Self { divisions, loaded: true, skipped_rows, source: None }
    }

    /// Resolve a division label to an index key
    fn resolve(&self, label: &str) -> (Option<&str>, AssemblyLookup) {
        if !self.loaded {
            return (None, AssemblyLookup::NotLoaded);
        }

        let key = normalize_division(label);
        if let Some((found, _)) = self.divisions.get_key_value(&key) {
            return (Some(found.as_str()), AssemblyLookup::Direct);
        }

        for rule in ALIAS_RULES {
            let target = match rule {
                AliasRule::Contains { needle, target } if key.contains(needle) => self
                    .divisions
                    .get_key_value(*target)
                    .or_else(|| self.divisions.iter().find(|(k, _)| k.contains(target))),
                AliasRule::SharedPrefix(prefix) if key.starts_with(prefix) => {
                    self.divisions.iter().find(|(k, _)| k.starts_with(prefix))
                }
                _ => None,
            };
            if let Some((found, _)) = target {
                return (Some(found.as_str()), AssemblyLookup::Alias { key: found.clone() });
            }
        }

        (None, AssemblyLookup::Unmapped)
    }

    /// Definitions for a division label, with how the label was resolved
    pub fn definitions(&self, label: &str) -> (AssemblyLookup, &[AssemblyDefinition]) {
        let (key, lookup) = self.resolve(label);
        let definitions = key.and_then(|k| self.divisions.get(k)).map(Vec::as_slice).unwrap_or(&[]);
        (lookup, definitions)
    }

    /// Price every line item of a division.
    ///
    /// Quantities come from `stats`; each item's total is its share of
    /// `division_total`. An unloaded index or an unmatched label yields no
    /// items, logged as distinct warnings.
    pub fn get_assemblies(
        &self,
        division_label: &str,
        division_total: f64,
        stats: &ProjectStats,
    ) -> AssemblyMatch {
        let (lookup, definitions) = self.definitions(division_label);

        match &lookup {
            AssemblyLookup::NotLoaded => {
                tracing::warn!(division = division_label, "Assembly index not loaded");
            }
            AssemblyLookup::Unmapped => {
                tracing::warn!(
                    division = division_label,
                    key = %normalize_division(division_label),
                    "Division label does not map to any assembly division"
                );
            }
            AssemblyLookup::Alias { key } => {
                tracing::debug!(
                    division = division_label,
                    key = %key,
                    "Division resolved by alias"
                );
            }
            AssemblyLookup::Direct => {}
        }

        let items = definitions.iter().map(|d| d.derive(division_total, stats)).collect();
        AssemblyMatch { lookup, items }
    }

    /// Indexed division keys with their item counts
    pub fn divisions(&self) -> BTreeMap<String, usize> {
        self.divisions.iter().map(|(k, v)| (k.clone(), v.len())).collect()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Total number of indexed line items
    pub fn len(&self) -> usize {
        self.divisions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
