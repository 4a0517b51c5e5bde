use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterType {
    Flat,
    Choppy,
    Waves,
}

/// A kitespot as delivered by the spot datastore. Identity is `id`;
/// immutable once fetched.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub id: String,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_type: Option<WaterType>,
}

/// Screen position of a spot for the current viewport. Recomputed on every
/// viewport or zoom change, never persisted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProjectedPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Two or more spots that landed in the same grid cell. `(x, y)` is the
/// geometric center of the cell, not the centroid of the members.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub is_cluster: bool,
    pub count: usize,
    pub spots: Vec<GeoPoint>,
    pub x: f64,
    pub y: f64,
}

/// One item of a marker set: either a plain spot marker or a cluster.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum MarkerItem {
    Cluster(Cluster),
    Spot(GeoPoint),
}

impl MarkerItem {
    /// Number of underlying spots this item stands for.
    pub fn spot_count(&self) -> usize {
        match self {
            MarkerItem::Cluster(c) => c.count,
            MarkerItem::Spot(_) => 1,
        }
    }
}

/// One hourly forecast sample as delivered by the weather provider.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    /// Unix timestamp in seconds.
    pub timestamp: i64,
    pub wind_speed_knots: f64,
    pub wind_gust_knots: f64,
    pub temperature_c: f64,
    /// Provider weather/icon code, categorical.
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction_deg: Option<f64>,
}

/// All samples sharing one `(day, hour)` slot, averaged.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourBucket {
    pub hour: u32,
    pub day: NaiveDate,
    pub day_index: usize,
    pub wind_speed_avg: f64,
    pub wind_gust_avg: f64,
    pub temp_avg: f64,
    pub icon: String,
    pub timestamp: i64,
    /// How many samples contributed; at least 1 by construction.
    pub count: usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLabel {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ConditionLabel {
    Excellent,
    Good,
    Fair,
    Poor,
    Unfavorable,
}

/// Kitesurfing probability for one weather snapshot. Pure derivation,
/// recomputed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionScore {
    pub probability: u8,
    pub label: ConditionLabel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TideState {
    Rising,
    Falling,
    High,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KiteSizeRecommendation {
    /// Square meters, one of the fixed catalog sizes.
    pub size: u8,
    pub probability: u8,
}
