//! Kitesurfing condition scoring.
//!
//! Two independent scorers share this module. [`score_conditions`] is the
//! full multi-factor heuristic used on the spot detail view; [`quick_score`]
//! is the looser wind-plus-weather-code variant behind the quick-glance
//! widget. They use different thresholds on purpose and are not expected to
//! agree numerically.

use serde::{Deserialize, Serialize};

use crate::models::{ConditionLabel, ConditionScore, TideState};

/// Weather snapshot consumed by [`score_conditions`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionInput {
    pub wind_speed_knots: f64,
    pub wind_gust_knots: f64,
    pub wind_direction_deg: f64,
    pub temperature_c: f64,
    pub cloud_cover_pct: f64,
    pub precipitation_mm: f64,
    pub tide: TideState,
    pub water_temperature_c: f64,
}

fn label_for(probability: u8) -> ConditionLabel {
    match probability {
        80..=100 => ConditionLabel::Excellent,
        60..=79 => ConditionLabel::Good,
        40..=59 => ConditionLabel::Fair,
        20..=39 => ConditionLabel::Poor,
        _ => ConditionLabel::Unfavorable,
    }
}

fn clamp_score(points: i32) -> ConditionScore {
    let probability = points.clamp(0, 100) as u8;
    ConditionScore { probability, label: label_for(probability) }
}

/// Side-shore or side-onshore wind, the workable sectors for a launch.
fn is_side_shore(direction_deg: f64) -> bool {
    (45.0..=135.0).contains(&direction_deg) || (225.0..=315.0).contains(&direction_deg)
}

/// Full additive condition score. Starts at 50 points, each factor adds or
/// removes its share, final result clamped to 0..=100.
pub fn score_conditions(input: &ConditionInput) -> ConditionScore {
    let mut points: i32 = 50;

    points += match input.wind_speed_knots {
        v if (12.0..=25.0).contains(&v) => 20,
        v if v < 12.0 => -10,
        _ => -15,
    };

    let gust_delta = (input.wind_gust_knots - input.wind_speed_knots).abs();
    if gust_delta <= 5.0 {
        points += 10;
    } else if gust_delta > 10.0 {
        points -= 10;
    }

    points += if is_side_shore(input.wind_direction_deg) { 10 } else { -10 };

    points += if (15.0..=30.0).contains(&input.temperature_c) { 5 } else { -5 };

    points += if input.cloud_cover_pct < 50.0 { 5 } else { -5 };

    points += if input.precipitation_mm == 0.0 { 5 } else { -10 };

    points += match input.tide {
        TideState::Rising | TideState::Falling => 5,
        TideState::High | TideState::Low => -5,
    };

    points += if (18.0..=28.0).contains(&input.water_temperature_c) { 5 } else { -5 };

    clamp_score(points)
}

/// Quick-glance score from wind speed and the provider weather code alone.
/// An unparsable code contributes nothing.
pub fn quick_score(wind_speed_knots: f64, icon: &str) -> ConditionScore {
    let mut points: i32 = 50;

    points += match wind_speed_knots {
        v if v < 10.0 => -30,
        v if v < 22.0 => -10,
        v if v <= 46.0 => 30,
        v if v <= 55.0 => 10,
        _ => -20,
    };

    points += match icon.parse::<u16>() {
        Ok(code) if code < 300 => -25,          // thunderstorm
        Ok(code) if code < 600 => -15,          // drizzle, rain
        Ok(code) if code < 700 => -20,          // snow
        Ok(code) if code < 800 => -5,           // mist, haze
        Ok(800) => 15,                          // clear sky
        Ok(code) if code <= 802 => 5,           // light clouds
        Ok(_) => -5,                            // overcast
        Err(_) => 0,
    };

    clamp_score(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal() -> ConditionInput {
        ConditionInput {
            wind_speed_knots: 18.0,
            wind_gust_knots: 21.0,
            wind_direction_deg: 90.0,
            temperature_c: 22.0,
            cloud_cover_pct: 20.0,
            precipitation_mm: 0.0,
            tide: TideState::Rising,
            water_temperature_c: 22.0,
        }
    }

    #[test]
    fn test_ideal_conditions_clamp_to_excellent() {
        // Every factor favorable; the raw sum exceeds 100 and clamps.
        let score = score_conditions(&ideal());
        assert_eq!(score.probability, 100);
        assert_eq!(score.label, ConditionLabel::Excellent);
    }

    #[test]
    fn test_worst_conditions_clamp_to_zero() {
        let score = score_conditions(&ConditionInput {
            wind_speed_knots: 40.0,
            wind_gust_knots: 60.0,
            wind_direction_deg: 0.0,
            temperature_c: 40.0,
            cloud_cover_pct: 90.0,
            precipitation_mm: 5.0,
            tide: TideState::High,
            water_temperature_c: 5.0,
        });
        assert_eq!(score.probability, 0);
        assert_eq!(score.label, ConditionLabel::Unfavorable);
    }

    #[test]
    fn test_light_wind_is_penalized() {
        let calm = ConditionInput { wind_speed_knots: 8.0, wind_gust_knots: 11.0, ..ideal() };
        let score = score_conditions(&calm);
        let reference = score_conditions(&ideal());
        assert!(score.probability < reference.probability);
    }

    #[test]
    fn test_gusty_wind_is_penalized_more_than_steady() {
        let gusty = ConditionInput { wind_gust_knots: 33.0, ..ideal() };
        // Favorable everywhere else: 50+20-10+10+5+5+5+5+5 = 95.
        assert_eq!(score_conditions(&gusty).probability, 95);
    }

    #[test]
    fn test_onshore_direction_is_penalized() {
        let onshore = ConditionInput { wind_direction_deg: 180.0, ..ideal() };
        // 50+20+10-10+5+5+5+5+5 = 95.
        assert_eq!(score_conditions(&onshore).probability, 95);
    }

    #[test]
    fn test_direction_sector_bounds_are_inclusive() {
        assert!(is_side_shore(45.0));
        assert!(is_side_shore(135.0));
        assert!(is_side_shore(225.0));
        assert!(is_side_shore(315.0));
        assert!(!is_side_shore(44.9));
        assert!(!is_side_shore(180.0));
        assert!(!is_side_shore(316.0));
    }

    #[test]
    fn test_label_bands_first_match_wins() {
        assert_eq!(label_for(100), ConditionLabel::Excellent);
        assert_eq!(label_for(80), ConditionLabel::Excellent);
        assert_eq!(label_for(79), ConditionLabel::Good);
        assert_eq!(label_for(60), ConditionLabel::Good);
        assert_eq!(label_for(59), ConditionLabel::Fair);
        assert_eq!(label_for(40), ConditionLabel::Fair);
        assert_eq!(label_for(39), ConditionLabel::Poor);
        assert_eq!(label_for(20), ConditionLabel::Poor);
        assert_eq!(label_for(19), ConditionLabel::Unfavorable);
        assert_eq!(label_for(0), ConditionLabel::Unfavorable);
    }

    #[test]
    fn test_quick_score_wind_bands() {
        // 50 - 30, clear-sky bonus +15.
        assert_eq!(quick_score(5.0, "800").probability, 35);
        // 50 - 10 + 15.
        assert_eq!(quick_score(15.0, "800").probability, 55);
        // 50 + 30 + 15.
        assert_eq!(quick_score(30.0, "800").probability, 95);
        // 50 + 10 + 15.
        assert_eq!(quick_score(50.0, "800").probability, 75);
        // 50 - 20 + 15.
        assert_eq!(quick_score(60.0, "800").probability, 45);
    }

    #[test]
    fn test_quick_score_weather_code_bands() {
        let base = quick_score(30.0, "not-a-code").probability; // 80
        assert_eq!(base, 80);
        assert_eq!(quick_score(30.0, "211").probability, base - 25);
        assert_eq!(quick_score(30.0, "501").probability, base - 15);
        assert_eq!(quick_score(30.0, "601").probability, base - 20);
        assert_eq!(quick_score(30.0, "741").probability, base - 5);
        assert_eq!(quick_score(30.0, "801").probability, base + 5);
        assert_eq!(quick_score(30.0, "804").probability, base - 5);
    }

    #[test]
    fn test_quick_score_is_clamped() {
        assert_eq!(quick_score(5.0, "211").probability, 0);
    }
}
