use serde::{Deserialize, Serialize};

const TRANSIT_FONT: &str = "P22 Johnston Underground";
/// Hues are drawn from `0..=ROUTE_HUE_MAX`, red through blue.
const ROUTE_HUE_MAX: u64 = 240;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub title_color: String,
    pub place_radius: f32,
    pub place_fill: String,
    pub place_stroke: String,
    pub place_stroke_width: f32,
    pub route_stroke_width: f32,
    /// Draw route names at elbow bends.
    pub route_labels: bool,
    /// Route label size relative to `font_size`.
    pub route_label_scale: f32,
    /// Fixed stroke for every route; `None` picks a per-route hue.
    pub route_color: Option<String>,
}

impl Theme {
    /// Coloured routes with labels at their bends.
    pub fn transit() -> Self {
        Self {
            font_family: TRANSIT_FONT.to_string(),
            font_size: 16.0,
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            title_color: "gray".to_string(),
            place_radius: 9.0,
            place_fill: "white".to_string(),
            place_stroke: "grey".to_string(),
            place_stroke_width: 6.0,
            route_stroke_width: 12.0,
            route_labels: true,
            route_label_scale: 2.0 / 3.0,
            route_color: None,
        }
    }

    /// Thin single-colour unlabelled routes, as drawn for grid layouts.
    pub fn schematic() -> Self {
        Self {
            font_size: 18.0,
            route_stroke_width: 6.0,
            route_labels: false,
            route_color: Some("red".to_string()),
            ..Self::transit()
        }
    }

    pub fn route_label_size(&self) -> f32 {
        self.font_size * self.route_label_scale
    }

    pub fn route_stroke(&self, route: &str) -> String {
        match &self.route_color {
            Some(color) => color.clone(),
            None => route_color(route),
        }
    }
}

/// Stable colour for a route, identical across runs and platforms.
pub fn route_color(route: &str) -> String {
    let hue = fnv1a(route.as_bytes()) % (ROUTE_HUE_MAX + 1);
    format!("hsla({hue}, 100%, 25%, 0.5)")
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}
