//! Synthetic demo data.
//!
//! The only module allowed to use randomness. Everything here produces the
//! exact shapes the real providers return, so downstream aggregation and
//! scoring never special-case estimated data.

use chrono::Utc;
use rand::Rng;
use shared::models::{Difficulty, GeoPoint, WaterType, WeatherSample};

const DEMO_CATALOG: [(&str, &str, &str, f64, f64, Difficulty, WaterType); 10] = [
    ("tarifa", "Tarifa", "Spain", 36.0143, -5.6044, Difficulty::Intermediate, WaterType::Choppy),
    ("dakhla", "Dakhla Lagoon", "Morocco", 23.7221, -15.9366, Difficulty::Beginner, WaterType::Flat),
    ("cabarete", "Cabarete", "Dominican Republic", 19.7500, -70.4083, Difficulty::Intermediate, WaterType::Waves),
    ("le-morne", "Le Morne", "Mauritius", -20.4568, 57.3120, Difficulty::Advanced, WaterType::Waves),
    ("cumbuco", "Cumbuco", "Brazil", -3.6258, -38.7269, Difficulty::Beginner, WaterType::Flat),
    ("essaouira", "Essaouira", "Morocco", 31.5125, -9.7700, Difficulty::Intermediate, WaterType::Waves),
    ("cape-town", "Blouberg", "South Africa", -33.8074, 18.4622, Difficulty::Advanced, WaterType::Waves),
    ("zanzibar", "Paje", "Tanzania", -6.2653, 39.5350, Difficulty::Beginner, WaterType::Flat),
    ("hood-river", "Hood River", "United States", 45.7101, -121.5098, Difficulty::Advanced, WaterType::Choppy),
    ("sylt", "Sylt", "Germany", 54.9079, 8.3273, Difficulty::Intermediate, WaterType::Choppy),
];

/// Demo kitespots, cycling the catalog when `count` exceeds it.
pub fn demo_spots(count: usize) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| {
            let (id, name, country, lat, lon, difficulty, water) =
                DEMO_CATALOG[i % DEMO_CATALOG.len()];
            let cycle = i / DEMO_CATALOG.len();
            GeoPoint {
                id: if cycle == 0 { id.to_string() } else { format!("{id}-{cycle}") },
                name: name.to_string(),
                country: country.to_string(),
                // Later cycles get a small offset so markers don't stack.
                latitude: lat + cycle as f64 * 0.05,
                longitude: lon + cycle as f64 * 0.05,
                difficulty: Some(difficulty),
                water_type: Some(water),
            }
        })
        .collect()
}

/// A plausible hourly forecast series starting at the current hour.
///
/// Wind follows a diurnal cycle peaking in the local afternoon (solar time
/// approximated from longitude), temperature tracks latitude, and weather
/// codes lean fair with occasional rain.
pub fn forecast_series(lat: f64, lon: f64, hours: u32) -> Vec<WeatherSample> {
    let mut rng = rand::rng();

    let now = Utc::now().timestamp();
    let start = now - now.rem_euclid(3600);

    let base_wind: f64 = rng.random_range(9.0..19.0);
    let base_temp = 29.0 - lat.abs() * 0.25;
    let solar_offset = lon / 15.0;

    (0..hours)
        .map(|h| {
            let timestamp = start + h as i64 * 3600;
            let local_hour = (h as f64 + solar_offset).rem_euclid(24.0);
            // Thermal wind peaks around 15:00 local.
            let diurnal = ((local_hour - 9.0) / 24.0 * std::f64::consts::TAU).sin();

            let wind = (base_wind + diurnal * 4.0 + rng.random_range(-1.5..1.5)).max(2.0);
            let gust = wind + rng.random_range(2.0..7.0);
            let temp = base_temp + diurnal * 3.0 + rng.random_range(-1.0..1.0);

            let icon = match rng.random_range(0..10) {
                0 => "500", // light rain
                1..=2 => "802",
                3..=5 => "801",
                _ => "800",
            };

            WeatherSample {
                timestamp,
                wind_speed_knots: round1(wind),
                wind_gust_knots: round1(gust),
                temperature_c: round1(temp),
                icon: icon.to_string(),
                wind_direction_deg: Some(rng.random_range(0.0..360.0)),
            }
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_spots_cycle_with_unique_ids() {
        let spots = demo_spots(25);
        assert_eq!(spots.len(), 25);
        let mut ids: Vec<&str> = spots.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 25);
        assert!(spots.iter().all(|s| (-90.0..=90.0).contains(&s.latitude)));
    }

    #[test]
    fn test_forecast_series_shape_and_ranges() {
        let samples = forecast_series(36.0, -5.6, 72);
        assert_eq!(samples.len(), 72);
        for pair in samples.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, 3600);
        }
        for s in &samples {
            assert!(s.wind_speed_knots >= 2.0 && s.wind_speed_knots < 40.0);
            assert!(s.wind_gust_knots > s.wind_speed_knots);
            assert!(s.temperature_c > -10.0 && s.temperature_c < 45.0);
            let dir = s.wind_direction_deg.unwrap();
            assert!((0.0..360.0).contains(&dir));
        }
    }
}
