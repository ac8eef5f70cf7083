use serde::Deserialize;

/// Estimate request body.
///
/// Fields are optional so that missing values are reported as a 400 with a
/// readable message instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct EstimateBody {
    pub brand: Option<String>,
    pub rooms: Option<u32>,
    pub floors: Option<u32>,
    #[serde(alias = "locationName")]
    pub location_name: Option<String>,
    pub region: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Query parameters for division line items
#[derive(Debug, Default, Deserialize)]
pub struct AssemblyParams {
    /// Division dollar total to distribute across line items
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub gsf: f64,
    #[serde(default = "default_one")]
    pub floors: u32,
    #[serde(default = "default_one")]
    pub units: u32,
}

fn default_one() -> u32 {
    1
}
