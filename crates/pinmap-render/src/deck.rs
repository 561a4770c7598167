//! Map widget payload types.
//!
//! The generated page embeds one JSON document the boot script feeds
//! to the scatterplot layer. Field names follow the widget's camelCase
//! convention.

use serde::Serialize;

use pinmap_model::{MapConfig, Viewport};

use crate::error::Result;
use crate::filter::PlottedPoint;

/// Initial camera for the map widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl From<Viewport> for ViewState {
    fn from(view: Viewport) -> Self {
        Self {
            latitude: view.latitude,
            longitude: view.longitude,
            zoom: view.zoom,
            pitch: view.pitch,
        }
    }
}

/// The scatterplot layer: point data plus marker sizing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterLayer {
    pub data: Vec<PlottedPoint>,
    /// Marker radius in meters.
    pub radius_meters: f64,
    /// Pixel clamp bounds applied when zooming.
    pub radius_min_pixels: u32,
    pub radius_max_pixels: u32,
    pub pickable: bool,
}

/// Full payload consumed by the page's boot script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSpec {
    pub map_style: String,
    pub initial_view_state: ViewState,
    pub layer: ScatterLayer,
    /// Tooltip template with `{name}`, `{address}`, and `{tag}`
    /// placeholders. The tag line is labeled with the configured tag
    /// column name.
    pub tooltip: String,
}

impl DeckSpec {
    /// Assembles the payload from the visible points and the viewport
    /// configuration.
    pub fn new(points: Vec<PlottedPoint>, config: &MapConfig) -> Self {
        Self {
            map_style: config.map_style.clone(),
            initial_view_state: ViewState::from(config.view),
            layer: ScatterLayer {
                data: points,
                radius_meters: config.radius_meters,
                radius_min_pixels: config.radius_min_pixels,
                radius_max_pixels: config.radius_max_pixels,
                pickable: true,
            },
            tooltip: format!("{{name}}\n{{address}}\n{}: {{tag}}", config.tag_column),
        }
    }

    /// Serializes the payload to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
