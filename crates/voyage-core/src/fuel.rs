//! Fuel estimate for a planned distance.

use crate::strategy::RouteStrategy;

/// `round(distance_nm * strategy.fuel_rate_per_nm())`, never negative.
pub fn fuel_consumption_tons(distance_nm: f64, strategy: RouteStrategy) -> u32 {
    let tons = distance_nm * strategy.fuel_rate_per_nm();
    if !tons.is_finite() || tons <= 0.0 {
        return 0;
    }
    tons.round() as u32
}
