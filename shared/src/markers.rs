//! Contract between the clustering engine and a presentation layer.
//!
//! The map itself knows nothing about widgets. A renderer implements
//! [`MarkerSurface`] and a [`MapView`] drives it, applying the cluster
//! activation policy from [`crate::cluster`]. Hover carries no business
//! logic; it exists for visual emphasis only.

use crate::cluster::{self, ClusterAction};
use crate::models::{Cluster, Difficulty, GeoPoint, MarkerItem};

/// Callbacks a presentation layer exposes to the map.
pub trait MarkerSurface {
    /// A plain spot marker was activated.
    fn on_select(&mut self, spot: &GeoPoint);
    /// A cluster marker was activated; fired per the activation policy.
    fn on_cluster_select(&mut self, cluster: &Cluster);
    /// Pointer entered a spot marker, or left all markers (`None`).
    fn on_hover(&mut self, spot: Option<&GeoPoint>);
}

/// Marker fill color, keyed by spot difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerColor {
    Emerald,
    Amber,
    Rose,
    Blue,
}

pub fn marker_color(difficulty: Option<Difficulty>) -> MarkerColor {
    match difficulty {
        Some(Difficulty::Beginner) => MarkerColor::Emerald,
        Some(Difficulty::Intermediate) => MarkerColor::Amber,
        Some(Difficulty::Advanced) => MarkerColor::Rose,
        None => MarkerColor::Blue,
    }
}

/// Marker size tri-state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerEmphasis {
    Selected,
    Hovered,
    Normal,
}

pub fn marker_emphasis(selected: bool, hovered: bool) -> MarkerEmphasis {
    if selected {
        MarkerEmphasis::Selected
    } else if hovered {
        MarkerEmphasis::Hovered
    } else {
        MarkerEmphasis::Normal
    }
}

/// Component-local map view state: current zoom plus selection and hover.
/// Explicit state, owned by the view that renders it.
#[derive(Clone, Debug, Default)]
pub struct MapView {
    pub zoom: u8,
    pub center_x: f64,
    pub center_y: f64,
    pub selected_id: Option<String>,
    pub hovered_id: Option<String>,
}

impl MapView {
    pub fn new() -> Self {
        Self { center_x: 0.5, center_y: 0.5, ..Self::default() }
    }

    /// Whether this view should present a clustered marker set.
    pub fn clustered(&self) -> bool {
        cluster::should_cluster(self.zoom)
    }

    /// Activate one marker-set item, notifying the surface and updating
    /// local state per the cluster activation policy.
    pub fn activate<S: MarkerSurface>(
        &mut self,
        item: &MarkerItem,
        viewport_w: f64,
        viewport_h: f64,
        surface: &mut S,
    ) {
        match item {
            MarkerItem::Spot(spot) => self.select(spot, surface),
            MarkerItem::Cluster(c) => {
                surface.on_cluster_select(c);
                match cluster::activate_cluster(c, self.zoom, viewport_w, viewport_h) {
                    Some(ClusterAction::SelectSpot(spot)) => self.select(&spot, surface),
                    Some(ClusterAction::ZoomTo { zoom, center_x, center_y }) => {
                        self.zoom = zoom;
                        self.center_x = center_x;
                        self.center_y = center_y;
                    }
                    None => {}
                }
            }
        }
    }

    pub fn hover<S: MarkerSurface>(&mut self, spot: Option<&GeoPoint>, surface: &mut S) {
        self.hovered_id = spot.map(|s| s.id.clone());
        surface.on_hover(spot);
    }

    fn select<S: MarkerSurface>(&mut self, spot: &GeoPoint, surface: &mut S) {
        self.selected_id = Some(spot.id.clone());
        surface.on_select(spot);
    }
}
