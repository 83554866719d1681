use std::collections::BTreeMap;

use crate::ir::{Canvas, Point, Titles};
use crate::theme::Theme;

use super::{RoutePath, Transform};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLayout {
    pub name: String,
    /// Pixel position.
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteLayout {
    pub name: String,
    pub color: String,
    pub path: RoutePath,
}

impl RouteLayout {
    /// Anchor points for the route's label, one per elbow.
    pub fn label_anchors(&self) -> Vec<Point> {
        self.path.bends().collect()
    }
}

/// Stroke colour per route, computed once per layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteColors {
    colors: BTreeMap<String, String>,
}

impl RouteColors {
    pub fn get_or_assign(&mut self, route: &str, theme: &Theme) -> String {
        self.colors
            .entry(route.to_string())
            .or_insert_with(|| theme.route_stroke(route))
            .clone()
    }

    pub fn get(&self, route: &str) -> Option<&str> {
        self.colors.get(route).map(String::as_str)
    }
}

/// Everything needed to draw a diagram, in pixel space.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Full image size, including the padding frame and title band.
    pub width: f64,
    pub height: f64,
    pub canvas: Canvas,
    pub padding: f64,
    /// `None` for a diagram without places.
    pub transform: Option<Transform>,
    pub places: Vec<PlaceLayout>,
    pub routes: Vec<RouteLayout>,
    pub route_colors: RouteColors,
    pub titles: Titles,
}
