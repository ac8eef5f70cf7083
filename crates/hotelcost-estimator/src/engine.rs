//! Cost derivation over the three reference indices

use hotelcost_core::models::{
    CostBreakdown, CostTableRow, DivisionBreakdown, EstimateRequest, Footprint, ProjectStats,
    ReferenceMatch, ResolvedLocation, RoomTypeCount,
};
use hotelcost_core::normalize::normalize_brand;

use crate::assembly::AssemblyIndex;
use crate::cost_table::CostTableIndex;
use crate::location::LocationFactorIndex;

/// Assumed building width in feet, a double-loaded corridor bar
pub const BUILDING_WIDTH_FT: f64 = 60.0;

/// Read-only view over loaded indices that answers estimate requests
#[derive(Debug, Clone, Copy)]
pub struct CostEngine<'a> {
    cost_table: &'a CostTableIndex,
    locations: &'a LocationFactorIndex,
    assemblies: &'a AssemblyIndex,
}

impl<'a> CostEngine<'a> {
    pub fn new(
        cost_table: &'a CostTableIndex,
        locations: &'a LocationFactorIndex,
        assemblies: &'a AssemblyIndex,
    ) -> Self {
        Self { cost_table, locations, assemblies }
    }

    /// Resolve the location factor, falling back to the national average
    pub fn resolve_location(&self, request: &EstimateRequest) -> ResolvedLocation {
        if request.location.is_empty() {
            return ResolvedLocation::national_average();
        }
        match self.locations.find_best_match(&request.location) {
            Some(found) => found.resolved(),
            None => {
                tracing::debug!(location = ?request.location, "Using national average");
                ResolvedLocation::national_average()
            }
        }
    }

    /// Estimate one project.
    ///
    /// Division dollars come from the matched reference row scaled by the
    /// location factor. Line-item quantities, room mix and footprint use the
    /// requested size. A brand with no reference rows gives a zeroed
    /// breakdown.
    pub fn estimate(&self, request: &EstimateRequest) -> CostBreakdown {
        let brand = normalize_brand(&request.brand);
        let location = self.resolve_location(request);

        let Some(row) = self.cost_table.find_best_match(&brand, request.floors, request.rooms)
        else {
            return CostBreakdown::empty(brand, request.rooms, request.floors, location);
        };

        let factor = location.cost_factor;
        let local: Vec<(&str, f64, f64)> = row
            .divisions
            .iter()
            .filter(|d| d.cost.is_finite() && d.cost > 0.0)
            .map(|d| (d.division.as_str(), d.cost, d.cost * factor))
            .collect();
        let total_local: f64 = local.iter().map(|(_, _, cost)| cost).sum();

        let stats =
            ProjectStats { gsf: row.gsf, floors: request.floors, total_units: request.rooms };

        let divisions = local
            .into_iter()
            .map(|(division, base_cost, local_cost)| {
                let assemblies = self.assemblies.get_assemblies(division, local_cost, &stats);
                DivisionBreakdown {
                    division: division.to_string(),
                    base_cost,
                    local_cost,
                    percent_of_total: ratio(local_cost, total_local) * 100.0,
                    lookup: assemblies.lookup,
                    assemblies: assemblies.items,
                }
            })
            .collect();

        tracing::debug!(
            brand = %brand,
            reference_rooms = row.rooms,
            reference_floors = row.floors,
            factor,
            total_local,
            "Derived estimate"
        );

        CostBreakdown {
            brand,
            requested_rooms: request.rooms,
            requested_floors: request.floors,
            location,
            reference: Some(ReferenceMatch { rooms: row.rooms, floors: row.floors, gsf: row.gsf }),
            total_local,
            cost_per_sf: ratio(total_local, row.gsf),
            cost_per_room: ratio(total_local, f64::from(request.rooms)),
            gross_area: row.gsf,
            footprint: footprint(row.gsf, request.floors),
            room_mix: room_mix(row, request.rooms),
            divisions,
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 && denominator.is_finite() {
        numerator / denominator
    } else {
        0.0
    }
}

/// Scale the reference row's room-type shares to the requested room count.
/// Each type is rounded on its own, so the sum may drift from `rooms`.
fn room_mix(row: &CostTableRow, rooms: u32) -> Vec<RoomTypeCount> {
    let classified = row.classified_rooms();
    if classified == 0 {
        return Vec::new();
    }
    row.room_types
        .iter()
        .map(|rt| RoomTypeCount {
            room_type: rt.room_type.clone(),
            count: (f64::from(rt.count) / f64::from(classified) * f64::from(rooms)).round() as u32,
        })
        .collect()
}

fn footprint(gross_area: f64, floors: u32) -> Footprint {
    let area_sf = ratio(gross_area, f64::from(floors));
    Footprint { width_ft: BUILDING_WIDTH_FT, length_ft: area_sf / BUILDING_WIDTH_FT, area_sf }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelcost_core::models::{
        AssemblyLookup, DivisionCost, LocationQuery, LocationRecord, NATIONAL_AVERAGE,
    };

    const ASSEMBLIES: &str = "\
preamble,,,,
,,,,
,,,,
,,,,
Name,Description,Input Basis,Input Value,% of Price
03_Concrete,03_Concrete,,,100%
Slab on Grade,SOG,% of GSF,25,40%
Elevated Slabs,PT deck,% of GSF,75,45%
Footings,Spread,Constant,120,15%
";

    fn row(rooms: u32, floors: u32, gsf: f64, concrete: f64) -> CostTableRow {
        CostTableRow {
            brand: "Home2".to_string(),
            rooms,
            floors,
            gsf,
            room_types: vec![
                RoomTypeCount { room_type: "King".to_string(), count: 60 },
                RoomTypeCount { room_type: "Queen Queen".to_string(), count: 30 },
                RoomTypeCount { room_type: "Accessible King".to_string(), count: 10 },
            ],
            divisions: vec![
                DivisionCost { division: "03 Concrete".to_string(), cost: concrete },
                DivisionCost { division: "26 Electrical".to_string(), cost: 600_000.0 },
                DivisionCost { division: "33 Utilities".to_string(), cost: 0.0 },
            ],
        }
    }

    struct Fixture {
        cost_table: CostTableIndex,
        locations: LocationFactorIndex,
        assemblies: AssemblyIndex,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                cost_table: CostTableIndex::from_rows(vec![
                    row(80, 4, 38_000.0, 350_000.0),
                    row(100, 4, 45_000.0, 400_000.0),
                    row(150, 5, 70_000.0, 650_000.0),
                ]),
                locations: LocationFactorIndex::from_records(vec![LocationRecord {
                    id: "aus".to_string(),
                    name: "Austin".to_string(),
                    region: "TX".to_string(),
                    cost_factor: 1.10,
                    latitude: Some(30.2672),
                    longitude: Some(-97.7431),
                }]),
                assemblies: AssemblyIndex::parse(ASSEMBLIES),
            }
        }

        fn engine(&self) -> CostEngine<'_> {
            CostEngine::new(&self.cost_table, &self.locations, &self.assemblies)
        }
    }

    fn austin_request() -> EstimateRequest {
        EstimateRequest::new("Home2 Suites", 100, 4)
            .with_location(LocationQuery::by_name("Austin", "TX"))
    }

    #[test]
    fn test_end_to_end_home2_in_austin() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&austin_request());

        assert_eq!(breakdown.brand, "Home2");
        assert_eq!(breakdown.location.label, "Austin, TX");
        assert_eq!(breakdown.reference.as_ref().map(|r| r.rooms), Some(100));

        let concrete = &breakdown.divisions[0];
        assert_eq!(concrete.division, "03 Concrete");
        assert!((concrete.local_cost - 440_000.0).abs() < 1e-6);
        assert_eq!(concrete.lookup, AssemblyLookup::Direct);
        assert_eq!(concrete.assemblies.len(), 3);
        for (item, pct) in concrete.assemblies.iter().zip([0.40, 0.45, 0.15]) {
            assert!((item.total_cost - 440_000.0 * pct).abs() < 1e-6);
        }
        assert_eq!(concrete.assemblies[0].quantity, 11_250);
    }

    #[test]
    fn test_zero_divisions_are_dropped_and_totals_add_up() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&austin_request());

        assert_eq!(breakdown.divisions.len(), 2);
        assert!((breakdown.total_local - 1_100_000.0).abs() < 1e-6);

        let shares: f64 = breakdown.divisions.iter().map(|d| d.percent_of_total).sum();
        assert!((shares - 100.0).abs() < 1e-9);
        assert!((breakdown.divisions[0].percent_of_total - 40.0).abs() < 1e-9);

        assert!((breakdown.cost_per_sf - 1_100_000.0 / 45_000.0).abs() < 1e-9);
        assert!((breakdown.cost_per_room - 11_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmapped_division_has_no_items() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&austin_request());
        let electrical = &breakdown.divisions[1];
        assert_eq!(electrical.lookup, AssemblyLookup::Unmapped);
        assert!(electrical.assemblies.is_empty());
    }

    #[test]
    fn test_nearest_room_count_selected() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&EstimateRequest::new("home2", 95, 4));
        let reference = breakdown.reference.unwrap();
        assert_eq!(reference.rooms, 100);
        assert_eq!(reference.gsf, 45_000.0);
    }

    #[test]
    fn test_unresolved_location_uses_national_average() {
        let fixture = Fixture::new();
        let request = EstimateRequest::new("Home2", 100, 4)
            .with_location(LocationQuery::by_name("Boise", "ID"));
        let breakdown = fixture.engine().estimate(&request);

        assert_eq!(breakdown.location.label, NATIONAL_AVERAGE);
        assert!(!breakdown.location.matched);
        assert!((breakdown.divisions[0].local_cost - 400_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_brand_returns_zeroed_breakdown() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&EstimateRequest::new("Motel 9", 100, 4));

        assert!(!breakdown.has_data());
        assert_eq!(breakdown.total_local, 0.0);
        assert_eq!(breakdown.cost_per_sf, 0.0);
        assert!(breakdown.divisions.is_empty());
        assert!(breakdown.room_mix.is_empty());
    }

    #[test]
    fn test_room_mix_scales_to_requested_rooms() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&EstimateRequest::new("Home2", 125, 4));

        let counts: Vec<u32> = breakdown.room_mix.iter().map(|r| r.count).collect();
        // 60% / 30% / 10% of 125 rounded independently
        assert_eq!(counts, vec![75, 38, 13]);
        assert_eq!(counts.iter().sum::<u32>(), 126);
    }

    #[test]
    fn test_footprint_uses_requested_floors() {
        let fixture = Fixture::new();
        let breakdown = fixture.engine().estimate(&austin_request());

        assert_eq!(breakdown.gross_area, 45_000.0);
        assert_eq!(breakdown.footprint.width_ft, BUILDING_WIDTH_FT);
        assert!((breakdown.footprint.area_sf - 11_250.0).abs() < 1e-9);
        assert!((breakdown.footprint.length_ft - 187.5).abs() < 1e-9);
    }

    #[test]
    fn test_line_item_quantities_follow_requested_size() {
        let fixture = Fixture::new();
        let assemblies = AssemblyIndex::parse(
            "a\nb\nc\nd\ne\n03_Concrete,03_Concrete,,,100\nPads,Unit pads,% of Units,50,100\n",
        );
        let engine = CostEngine::new(&fixture.cost_table, &fixture.locations, &assemblies);

        let breakdown = engine.estimate(&EstimateRequest::new("Home2", 110, 4));
        // Reference row has 100 rooms; quantity follows the 110 requested
        assert_eq!(breakdown.reference.as_ref().map(|r| r.rooms), Some(100));
        assert_eq!(breakdown.divisions[0].assemblies[0].quantity, 55);
    }

    #[test]
    fn test_empty_indices_never_panic() {
        let (cost_table, locations, assemblies) = Default::default();
        let engine = CostEngine::new(&cost_table, &locations, &assemblies);
        let breakdown = engine.estimate(&EstimateRequest::new("", 0, 0));
        assert_eq!(breakdown.total_local, 0.0);
        assert_eq!(breakdown.location.cost_factor, 1.0);
    }
}
