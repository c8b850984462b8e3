use serde::{Deserialize, Serialize};

/// Environmental impact figures derived from a user's point total.
/// A pure function of `points`: no state, recomputed on demand, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactStats {
    pub points: u32,
    pub items_captured: u32,
    pub co2_diverted_kg: f64,
    pub trees_equivalent: f64,
    pub energy_saved_kwh: f64,
    pub water_saved_l: f64,
    pub waste_reduced_kg: f64,
}

impl ImpactStats {
    pub fn from_points(points: u32) -> Self {
        // Each capture awards 5 points, so points/5 recovers the count.
        let items_captured = points / 5;
        Self {
            points,
            items_captured,
            // Estimate 0.5 kg CO2 diverted per captured item.
            co2_diverted_kg: f64::from(items_captured) * 0.5,
            trees_equivalent: f64::from(points) * 0.00025,
            energy_saved_kwh: f64::from(points) * 0.1,
            water_saved_l: f64::from(points) * 2.0,
            waste_reduced_kg: f64::from(points) * 0.008,
        }
    }
}
