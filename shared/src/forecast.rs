//! Hourly forecast aggregation.
//!
//! Raw provider samples arrive as a flat hourly series. For display and
//! scoring they are grouped into calendar days (local time, first three
//! days only) and per-hour buckets, averaging duplicate-hour samples.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike};

use crate::models::{DayLabel, HourBucket, WeatherSample};

/// How many calendar days of forecast are kept.
pub const MAX_FORECAST_DAYS: usize = 3;

/// Center of the ideal wind band, in knots.
pub const IDEAL_WIND_KNOTS: f64 = 17.5;

/// Wind speeds inside this band all count as ideal when ranking hours.
pub const IDEAL_WIND_BAND: (f64, f64) = (15.0, 20.0);

/// Output of one aggregation pass, ready for rendering.
#[derive(Clone, Debug)]
pub struct Forecast {
    pub day_labels: Vec<DayLabel>,
    pub hour_buckets: Vec<HourBucket>,
}

/// Group `samples` into day labels and hourly buckets, relative to the
/// current local date.
pub fn aggregate(samples: &[WeatherSample]) -> Forecast {
    aggregate_on(samples, Local::now().date_naive())
}

/// Like [`aggregate`] with an explicit "today", so label logic is
/// reproducible in tests.
pub fn aggregate_on(samples: &[WeatherSample], today: NaiveDate) -> Forecast {
    // Distinct days in order of first appearance, capped.
    let mut days: Vec<NaiveDate> = Vec::new();
    // Buckets keyed by (day_index, hour), insertion-ordered.
    let mut buckets: Vec<BucketAccumulator> = Vec::new();

    for sample in samples {
        let local: DateTime<Local> = match Local.timestamp_opt(sample.timestamp, 0).single() {
            Some(dt) => dt,
            None => continue,
        };
        let date = local.date_naive();
        let hour = local.hour();

        let day_index = match days.iter().position(|&d| d == date) {
            Some(i) => i,
            None if days.len() < MAX_FORECAST_DAYS => {
                days.push(date);
                days.len() - 1
            }
            None => continue,
        };

        match buckets
            .iter_mut()
            .find(|b| b.day_index == day_index && b.hour == hour)
        {
            Some(bucket) => bucket.add(sample),
            None => buckets.push(BucketAccumulator::new(day_index, date, hour, sample)),
        }
    }

    buckets.sort_by_key(|b| (b.day_index, b.hour));

    Forecast {
        day_labels: days
            .iter()
            .map(|&date| DayLabel {
                id: date.to_string(),
                label: format_day(date, today),
            })
            .collect(),
        hour_buckets: buckets.into_iter().map(BucketAccumulator::finish).collect(),
    }
}

/// "Today", "Tomorrow", or "<Weekday>, <Month> <Day>".
pub fn format_day(date: NaiveDate, today: NaiveDate) -> String {
    match date.signed_duration_since(today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => format!("{}, {} {}", date.format("%A"), date.format("%B"), date.day()),
    }
}

/// The best hour among `buckets`: minimal distance to the ideal wind, any
/// speed inside the ideal band tying at zero. Ties keep the earliest
/// bucket.
pub fn best_bucket(buckets: &[HourBucket]) -> Option<&HourBucket> {
    buckets
        .iter()
        .min_by(|a, b| wind_distance(a.wind_speed_avg).total_cmp(&wind_distance(b.wind_speed_avg)))
}

fn wind_distance(wind_speed: f64) -> f64 {
    let (low, high) = IDEAL_WIND_BAND;
    if (low..=high).contains(&wind_speed) {
        0.0
    } else {
        (wind_speed - IDEAL_WIND_KNOTS).abs()
    }
}

struct BucketAccumulator {
    day_index: usize,
    day: NaiveDate,
    hour: u32,
    wind_sum: f64,
    gust_sum: f64,
    temp_sum: f64,
    icon: String,
    timestamp: i64,
    count: usize,
}

impl BucketAccumulator {
    fn new(day_index: usize, day: NaiveDate, hour: u32, sample: &WeatherSample) -> Self {
        Self {
            day_index,
            day,
            hour,
            wind_sum: sample.wind_speed_knots,
            gust_sum: sample.wind_gust_knots,
            temp_sum: sample.temperature_c,
            icon: sample.icon.clone(),
            timestamp: sample.timestamp,
            count: 1,
        }
    }

    fn add(&mut self, sample: &WeatherSample) {
        self.wind_sum += sample.wind_speed_knots;
        self.gust_sum += sample.wind_gust_knots;
        self.temp_sum += sample.temperature_c;
        self.count += 1;
    }

    fn finish(self) -> HourBucket {
        let n = self.count as f64;
        HourBucket {
            hour: self.hour,
            day: self.day,
            day_index: self.day_index,
            wind_speed_avg: self.wind_sum / n,
            wind_gust_avg: self.gust_sum / n,
            temp_avg: self.temp_sum / n,
            icon: self.icon,
            timestamp: self.timestamp,
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(date: NaiveDate, hour: u32, wind: f64) -> WeatherSample {
        let ts = Local
            .from_local_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
            .single()
            .unwrap()
            .timestamp();
        WeatherSample {
            timestamp: ts,
            wind_speed_knots: wind,
            wind_gust_knots: wind + 4.0,
            temperature_c: 20.0,
            icon: "800".to_string(),
            wind_direction_deg: Some(90.0),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duplicate_hours_are_averaged() {
        let day = date(2026, 8, 25);
        let samples: Vec<WeatherSample> = [10.0, 12.0, 14.0, 16.0]
            .iter()
            .map(|&w| sample_at(day, 14, w))
            .collect();
        let forecast = aggregate_on(&samples, day);
        assert_eq!(forecast.hour_buckets.len(), 1);
        let bucket = &forecast.hour_buckets[0];
        assert_eq!(bucket.hour, 14);
        assert_eq!(bucket.count, 4);
        assert!((bucket.wind_speed_avg - 13.0).abs() < 1e-9);
        assert!((bucket.wind_gust_avg - 17.0).abs() < 1e-9);
        assert_eq!(bucket.icon, "800");
    }

    #[test]
    fn test_today_and_tomorrow_labels_in_order() {
        let today = date(2026, 8, 25);
        let tomorrow = date(2026, 8, 26);
        let samples = vec![sample_at(today, 9, 15.0), sample_at(tomorrow, 9, 15.0)];
        let forecast = aggregate_on(&samples, today);
        let labels: Vec<&str> = forecast.day_labels.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Today", "Tomorrow"]);
    }

    #[test]
    fn test_later_days_use_weekday_labels() {
        let today = date(2026, 8, 25);
        // Aug 27 2026 is a Thursday.
        let label = format_day(date(2026, 8, 27), today);
        assert_eq!(label, "Thursday, August 27");
    }

    #[test]
    fn test_at_most_three_days_are_kept() {
        let today = date(2026, 8, 25);
        let samples: Vec<WeatherSample> = (0..5)
            .map(|offset| sample_at(date(2026, 8, 25 + offset), 12, 15.0))
            .collect();
        let forecast = aggregate_on(&samples, today);
        assert_eq!(forecast.day_labels.len(), 3);
        assert_eq!(forecast.hour_buckets.len(), 3);
        assert!(forecast.hour_buckets.iter().all(|b| b.day_index < 3));
    }

    #[test]
    fn test_buckets_sorted_by_day_then_hour() {
        let today = date(2026, 8, 25);
        let tomorrow = date(2026, 8, 26);
        let samples = vec![
            sample_at(tomorrow, 8, 15.0),
            sample_at(today, 18, 15.0),
            sample_at(today, 6, 15.0),
        ];
        let forecast = aggregate_on(&samples, today);
        let order: Vec<(usize, u32)> = forecast
            .hour_buckets
            .iter()
            .map(|b| (b.day_index, b.hour))
            .collect();
        // "Tomorrow" was encountered first so it gets day_index 0.
        assert_eq!(order, vec![(0, 8), (1, 6), (1, 18)]);
    }

    #[test]
    fn test_best_bucket_prefers_ideal_band() {
        let today = date(2026, 8, 25);
        let samples = vec![
            sample_at(today, 8, 10.0),
            sample_at(today, 11, 16.0),
            sample_at(today, 14, 19.5),
            sample_at(today, 17, 25.0),
        ];
        let forecast = aggregate_on(&samples, today);
        // 16 and 19.5 knots both sit in the ideal band; the earlier hour
        // wins the tie.
        let best = best_bucket(&forecast.hour_buckets).unwrap();
        assert_eq!(best.hour, 11);
    }

    #[test]
    fn test_best_bucket_outside_band_minimizes_distance() {
        let today = date(2026, 8, 25);
        let samples = vec![sample_at(today, 8, 10.0), sample_at(today, 14, 22.0)];
        let forecast = aggregate_on(&samples, today);
        assert_eq!(best_bucket(&forecast.hour_buckets).unwrap().hour, 14);
    }

    #[test]
    fn test_empty_input_yields_empty_forecast() {
        let forecast = aggregate_on(&[], date(2026, 8, 25));
        assert!(forecast.day_labels.is_empty());
        assert!(forecast.hour_buckets.is_empty());
        assert!(best_bucket(&forecast.hour_buckets).is_none());
    }
}
