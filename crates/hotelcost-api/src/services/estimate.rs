use hotelcost_core::models::{CostBreakdown, EstimateRequest, LocationQuery};

use crate::dto::EstimateBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Validates estimate requests and runs them against the estimator
pub struct EstimateService;

impl EstimateService {
    /// Turn a request body into an estimate request.
    ///
    /// Brand, rooms and floors are required and counts must be positive.
    /// Coordinates must come as a pair.
    pub fn validate(body: EstimateBody) -> Result<EstimateRequest, ApiError> {
        let brand = body
            .brand
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing required field: brand"))?;

        let rooms = Self::positive("rooms", body.rooms)?;
        let floors = Self::positive("floors", body.floors)?;

        if body.lat.is_some() != body.lng.is_some() {
            return Err(ApiError::bad_request("Incomplete coordinates")
                .with_details("lat and lng must be supplied together"));
        }

        let location = LocationQuery {
            name: body.location_name,
            region: body.region,
            lat: body.lat,
            lng: body.lng,
        };

        Ok(EstimateRequest::new(brand, rooms, floors).with_location(location))
    }

    fn positive(field: &str, value: Option<u32>) -> Result<u32, ApiError> {
        match value {
            None => Err(ApiError::bad_request(format!("Missing required field: {}", field))),
            Some(0) => Err(ApiError::bad_request(format!("Invalid value for {}", field))
                .with_details(format!("{} must be greater than 0", field))),
            Some(n) => Ok(n),
        }
    }

    /// Validate and estimate. No-match conditions produce a zeroed breakdown.
    pub fn execute(state: &AppState, body: EstimateBody) -> Result<CostBreakdown, ApiError> {
        let request = Self::validate(body)?;
        let breakdown = state.estimator.estimate(&request);

        if !breakdown.has_data() {
            tracing::warn!(brand = %breakdown.brand, "Estimate returned no reference data");
        }

        Ok(breakdown)
    }
}
