mod request;
mod response;

pub use request::{AssemblyParams, EstimateBody};
pub use response::{
    AssemblyResponse, BrandInfo, BrandsResponse, HealthResponse, LocationInfo, LocationsResponse,
};
