pub mod assembly;
pub mod estimate;
pub mod location;
pub mod reference;

pub use assembly::{AssemblyDefinition, AssemblyLookup, AssemblyResult, InputBasis, ProjectStats};
pub use estimate::{
    CostBreakdown, DivisionBreakdown, EstimateRequest, Footprint, ReferenceMatch, ResolvedLocation,
    NATIONAL_AVERAGE,
};
pub use location::{LocationFactor, LocationQuery, LocationRecord};
pub use reference::{CostTableRow, DivisionCost, RoomTypeCount};
