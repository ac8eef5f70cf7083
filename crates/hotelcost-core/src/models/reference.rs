use serde::{Deserialize, Serialize};

/// Dollar cost of one construction division in a reference project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisionCost {
    /// Division label as it appears in the cost table header (e.g. "03 Concrete")
    pub division: String,

    /// Cost in national-average dollars
    pub cost: f64,
}

/// Count of one room type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeCount {
    pub room_type: String,
    pub count: u32,
}

/// One historical cost record for a brand and size combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostTableRow {
    /// Canonical brand name
    pub brand: String,

    /// Guest room (key) count
    pub rooms: u32,

    /// Above-grade floor count
    pub floors: u32,

    /// Gross building area in square feet
    pub gsf: f64,

    /// Room-type mix in column order
    pub room_types: Vec<RoomTypeCount>,

    /// Per-division costs in column order
    pub divisions: Vec<DivisionCost>,
}

impl CostTableRow {
    /// Total rooms across all classified room types
    pub fn classified_rooms(&self) -> u32 {
        self.room_types.iter().map(|r| r.count).sum()
    }
}
