use serde::{Deserialize, Serialize};

/// What an assembly's quantity is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBasis {
    /// Input value is a percentage of gross square footage
    PercentOfGsf,
    /// Input value is a percentage of the unit (room) count
    PercentOfUnits,
    /// Input value is a percentage of the floor count
    PercentOfFloors,
    /// Input value is a fixed count
    Constant,
    /// Anything else: priced as a lump sum
    LumpSum,
}

impl InputBasis {
    /// Classify a free-text basis label.
    ///
    /// Matching is by case-insensitive substring, checked in order. The
    /// misspelling "constrant" appears in the source data and counts as
    /// constant.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_lowercase();
        if lowered.contains("gsf") {
            Self::PercentOfGsf
        } else if lowered.contains("units") {
            Self::PercentOfUnits
        } else if lowered.contains("floors") {
            Self::PercentOfFloors
        } else if lowered.contains("constant") || lowered.contains("constrant") {
            Self::Constant
        } else {
            Self::LumpSum
        }
    }

    /// Unit of measure reported for derived quantities
    pub fn unit(&self) -> &'static str {
        match self {
            Self::PercentOfGsf => "SF",
            Self::PercentOfUnits | Self::PercentOfFloors | Self::Constant => "EA",
            Self::LumpSum => "LS",
        }
    }

    /// Raw (unrounded) quantity for an input value against project statistics
    pub fn raw_quantity(&self, input_value: f64, stats: &ProjectStats) -> f64 {
        match self {
            Self::PercentOfGsf => stats.gsf * (input_value / 100.0),
            Self::PercentOfUnits => f64::from(stats.total_units) * (input_value / 100.0),
            Self::PercentOfFloors => f64::from(stats.floors) * (input_value / 100.0),
            Self::Constant | Self::LumpSum => input_value,
        }
    }
}

/// Physical size of the project used to turn input bases into quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectStats {
    pub gsf: f64,
    pub floors: u32,
    pub total_units: u32,
}

/// One priceable line item within a construction division
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDefinition {
    /// Owning division as written in the source header
    pub division: String,

    pub name: String,
    pub description: String,

    pub basis: InputBasis,

    /// Basis text as written in the source file
    pub basis_label: String,

    /// Meaning depends on `basis`
    pub input_value: f64,

    /// Share of the division's dollar cost, as a 0-1 fraction
    pub percent_price: f64,
}

impl AssemblyDefinition {
    /// Whole-number quantity, never below one
    pub fn quantity(&self, stats: &ProjectStats) -> u64 {
        let raw = self.basis.raw_quantity(self.input_value, stats);
        if raw.is_finite() {
            raw.round().max(1.0) as u64
        } else {
            1
        }
    }

    /// Price this assembly against a division's local dollar total
    pub fn derive(&self, division_total: f64, stats: &ProjectStats) -> AssemblyResult {
        let quantity = self.quantity(stats);
        let total_cost = division_total * self.percent_price;
        let unit_cost = if quantity == 0 { 0.0 } else { total_cost / quantity as f64 };

        AssemblyResult {
            name: self.name.clone(),
            description: self.description.clone(),
            quantity,
            unit: self.basis.unit().to_string(),
            unit_cost,
            total_cost,
        }
    }
}

/// A priced line item in an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyResult {
    pub name: String,
    pub description: String,
    pub quantity: u64,
    pub unit: String,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// How a division label was resolved against the assembly index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssemblyLookup {
    /// Normalized label matched an indexed division
    Direct,
    /// Matched through the alias table
    Alias { key: String },
    /// Index is loaded but nothing matched this label
    Unmapped,
    /// Index was never loaded, or loading failed
    NotLoaded,
}

impl AssemblyLookup {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Direct | Self::Alias { .. })
    }
}
