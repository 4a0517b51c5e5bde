//! Grid clustering of kitespot markers for the world map.
//!
//! Spots are projected into viewport pixels, culled against the padded
//! viewport, then bucketed into fixed-size grid cells. A cell holding two
//! or more spots collapses into a single cluster marker; a lone spot passes
//! through unchanged. The pass is pure and idempotent so callers can re-run
//! it on every viewport, zoom, or data change.

use std::collections::HashMap;

use crate::geo;
use crate::models::{Cluster, GeoPoint, MarkerItem, ProjectedPoint};

/// Edge length of one clustering grid cell, in pixels.
pub const CLUSTER_CELL_SIZE_PX: f64 = 50.0;

/// Below this zoom level spots are clustered; at or above it the caller
/// renders every spot individually.
pub const CLUSTER_ZOOM_THRESHOLD: u8 = 2;

/// Activating a cluster of at most this many spots selects its first
/// member directly instead of zooming in.
pub const CLUSTER_AUTO_SELECT_MAX: usize = 3;

/// Upper bound for the zoom level reached by cluster zoom-in.
pub const MAX_ZOOM: u8 = 4;

/// Whether the map should run the clustering pass at this zoom level.
/// The decision is deliberately outside [`cluster`], which stays
/// zoom-agnostic.
pub fn should_cluster(zoom: u8) -> bool {
    zoom < CLUSTER_ZOOM_THRESHOLD
}

/// Project every valid spot and keep those inside the padded viewport.
/// Gives the caller the screen positions for plain (non-clustered) markers.
pub fn project_visible(
    points: &[GeoPoint],
    viewport_w: f64,
    viewport_h: f64,
    padding: f64,
) -> Vec<ProjectedPoint> {
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return Vec::new();
    }
    points
        .iter()
        .filter(|p| geo::is_valid_coordinate(p.latitude, p.longitude))
        .filter_map(|p| {
            let (x, y) = geo::project(p.latitude, p.longitude, viewport_w, viewport_h);
            geo::is_in_viewport(x, y, viewport_w, viewport_h, padding).then(|| ProjectedPoint {
                id: p.id.clone(),
                x,
                y,
            })
        })
        .collect()
}

/// One clustering pass over `points` for a `viewport_w` x `viewport_h`
/// viewport.
///
/// Every in-viewport input spot lands in exactly one output item; spots
/// outside the padded viewport are dropped for this pass. Cells are keyed
/// by `floor(x / cell)` so cluster ids are stable across passes with
/// identical input, which keeps UI diffing and animation keys stable.
pub fn cluster(
    points: &[GeoPoint],
    viewport_w: f64,
    viewport_h: f64,
    cell_size_px: f64,
) -> Vec<MarkerItem> {
    if viewport_w <= 0.0 || viewport_h <= 0.0 || cell_size_px <= 0.0 {
        return Vec::new();
    }

    // Cells in first-encounter order, so output order is a pure function
    // of input order.
    let mut order: Vec<(i64, i64)> = Vec::new();
    let mut cells: HashMap<(i64, i64), Vec<GeoPoint>> = HashMap::new();

    for point in points {
        if !geo::is_valid_coordinate(point.latitude, point.longitude) {
            continue;
        }
        let (x, y) = geo::project(point.latitude, point.longitude, viewport_w, viewport_h);
        if !geo::is_in_viewport(x, y, viewport_w, viewport_h, geo::VIEWPORT_PADDING) {
            continue;
        }
        let key = ((x / cell_size_px).floor() as i64, (y / cell_size_px).floor() as i64);
        let members = cells.entry(key).or_default();
        if members.is_empty() {
            order.push(key);
        }
        members.push(point.clone());
    }

    order
        .into_iter()
        .filter_map(|key| {
            let mut members = cells.remove(&key)?;
            let (cell_x, cell_y) = key;
            let item = if members.len() == 1 {
                MarkerItem::Spot(members.remove(0))
            } else {
                MarkerItem::Cluster(Cluster {
                    id: format!("cluster-{cell_x}-{cell_y}"),
                    is_cluster: true,
                    count: members.len(),
                    x: (cell_x as f64 + 0.5) * cell_size_px,
                    y: (cell_y as f64 + 0.5) * cell_size_px,
                    spots: members,
                })
            };
            Some(item)
        })
        .collect()
}

/// What the map should do in response to a cluster being activated.
#[derive(Clone, Debug, PartialEq)]
pub enum ClusterAction {
    /// Small cluster: select its first member directly.
    SelectSpot(GeoPoint),
    /// Large cluster: zoom one level in (capped at [`MAX_ZOOM`]) and
    /// recenter on the cluster, center given as viewport fractions in
    /// `[0, 1]`.
    ZoomTo { zoom: u8, center_x: f64, center_y: f64 },
}

/// Resolve a cluster activation against the current zoom level.
pub fn activate_cluster(
    cluster: &Cluster,
    zoom: u8,
    viewport_w: f64,
    viewport_h: f64,
) -> Option<ClusterAction> {
    if cluster.count <= CLUSTER_AUTO_SELECT_MAX {
        return cluster.spots.first().cloned().map(ClusterAction::SelectSpot);
    }
    if viewport_w <= 0.0 || viewport_h <= 0.0 {
        return None;
    }
    Some(ClusterAction::ZoomTo {
        zoom: zoom.saturating_add(1).min(MAX_ZOOM),
        center_x: (cluster.x / viewport_w).clamp(0.0, 1.0),
        center_y: (cluster.y / viewport_h).clamp(0.0, 1.0),
    })
}
