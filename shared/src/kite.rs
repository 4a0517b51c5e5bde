//! Kite size recommendation from rider weight and wind speed.

use crate::models::KiteSizeRecommendation;

/// Available kite sizes in square meters, smallest first.
pub const KITE_SIZE_CATALOG: [u8; 6] = [5, 7, 9, 12, 14, 17];

/// Number of recommendations returned.
pub const RECOMMENDATION_COUNT: usize = 3;

const REFERENCE_WEIGHT_KG: f64 = 75.0;
const REFERENCE_WIND_KNOTS: f64 = 15.0;
const REFERENCE_SIZE: f64 = 12.0;

/// Probability decay per square meter of distance from the ideal size.
const DISTANCE_DECAY: f64 = 0.3;

/// Top suggestions for a rider of `weight_kg` in `wind_speed_knots` of
/// wind, best first.
///
/// The ideal size scales linearly with weight and inversely with wind;
/// per-size suitability decays exponentially with distance from it. Unsafe
/// combinations (big kite in strong wind, small kite in light wind) are
/// halved. Ties keep catalog order.
pub fn recommend_sizes(weight_kg: f64, wind_speed_knots: f64) -> Vec<KiteSizeRecommendation> {
    if weight_kg <= 0.0 || wind_speed_knots <= 0.0 {
        return Vec::new();
    }

    let weight_factor = weight_kg / REFERENCE_WEIGHT_KG;
    let wind_factor = REFERENCE_WIND_KNOTS / wind_speed_knots;
    let ideal_size = REFERENCE_SIZE * weight_factor * wind_factor;

    let mut ranked: Vec<KiteSizeRecommendation> = KITE_SIZE_CATALOG
        .iter()
        .map(|&size| {
            let distance = (size as f64 - ideal_size).abs();
            let mut probability = 100.0 * (-DISTANCE_DECAY * distance).exp();
            let overpowered = wind_speed_knots > 25.0 && size > 12;
            let underpowered = wind_speed_knots < 10.0 && size < 9;
            if overpowered || underpowered {
                probability *= 0.5;
            }
            KiteSizeRecommendation {
                size,
                probability: probability.clamp(0.0, 100.0).round() as u8,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.probability.cmp(&a.probability));
    ranked.truncate(RECOMMENDATION_COUNT);
    ranked
}
