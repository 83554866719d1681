use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::config::LayoutConfig;
use crate::layout::{BoundingBox, LayoutReport, apply_strategy};

/// Decimal places kept on every serialization boundary.
pub const COORDINATE_PRECISION: i32 = 4;

/// A position in diagram space. `x` is axis-1 (easting), `y` is axis-2
/// (northing) until the transform flips it into screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn rounded(self) -> Self {
        Self {
            x: round_coordinate(self.x),
            y: round_coordinate(self.y),
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// Coordinates are finite once a diagram is validated, so value equality is total.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 into 0.0 so equal values hash alike.
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    (value * scale).round() / scale
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Titles {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub footer: Option<String>,
}

impl Titles {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none() && self.footer.is_none()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    #[error("place '{place}' has a non-finite coordinate")]
    NonFiniteCoordinate { place: String },
    #[error("route '{route}' references undeclared place '{place}'")]
    DanglingReference { route: String, place: String },
    #[error("place '{place}' is not visited by any route")]
    OrphanPlace { place: String },
    #[error("canvas must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
    #[error("padding must be non-negative and finite, got {0}")]
    InvalidPadding(f64),
    #[error("padding {padding} leaves no room on a {width}x{height} canvas")]
    PaddingExceedsCanvas { padding: f64, width: f64, height: f64 },
}

/// Places, routes and the drawing surface they are laid out on.
///
/// Routes refer to places by name only, so the layout pass can move places
/// without touching routes. The bounding box of the places is cached and
/// refreshed by every method that moves a place.
#[derive(Debug, Clone)]
pub struct Diagram {
    places: BTreeMap<String, Point>,
    routes: BTreeMap<String, Vec<String>>,
    pub canvas: Canvas,
    pub padding: f64,
    pub titles: Titles,
    bounds: Option<BoundingBox>,
}

impl Diagram {
    pub fn new(
        places: BTreeMap<String, Point>,
        routes: BTreeMap<String, Vec<String>>,
        canvas: Canvas,
        padding: f64,
    ) -> Self {
        let bounds = BoundingBox::from_points(places.values().copied());
        Self {
            places,
            routes,
            canvas,
            padding,
            titles: Titles::default(),
            bounds,
        }
    }

    pub fn with_titles(mut self, titles: Titles) -> Self {
        self.titles = titles;
        self
    }

    pub fn places(&self) -> &BTreeMap<String, Point> {
        &self.places
    }

    pub fn routes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.routes
    }

    pub fn place(&self, name: &str) -> Option<Point> {
        self.places.get(name).copied()
    }

    /// Cached bounds of all places; `None` for a diagram without places.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn set_place(&mut self, name: impl Into<String>, point: Point) {
        self.places.insert(name.into(), point);
        self.refresh_bounds();
    }

    pub fn add_route(&mut self, name: impl Into<String>, places: Vec<String>) {
        self.routes.insert(name.into(), places);
    }

    /// Runs the configured layout strategy over the places in place.
    pub fn apply_layout(&mut self, config: &LayoutConfig) -> LayoutReport {
        let report = apply_strategy(&mut self.places, config);
        self.refresh_bounds();
        report
    }

    fn refresh_bounds(&mut self) {
        self.bounds = BoundingBox::from_points(self.places.values().copied());
    }

    /// Checks that routes and places agree exactly and that the numbers are usable.
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(DiagramError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(DiagramError::InvalidPadding(self.padding));
        }
        if 2.0 * self.padding > self.canvas.width.min(self.canvas.height) {
            return Err(DiagramError::PaddingExceedsCanvas {
                padding: self.padding,
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        for (name, point) in &self.places {
            if !point.is_finite() {
                return Err(DiagramError::NonFiniteCoordinate {
                    place: name.clone(),
                });
            }
        }

        let mut visited = BTreeSet::new();
        for (route, places) in &self.routes {
            for place in places {
                if !self.places.contains_key(place) {
                    return Err(DiagramError::DanglingReference {
                        route: route.clone(),
                        place: place.clone(),
                    });
                }
                visited.insert(place.as_str());
            }
        }
        if let Some(orphan) = self.places.keys().find(|name| !visited.contains(name.as_str())) {
            return Err(DiagramError::OrphanPlace {
                place: orphan.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample() -> Diagram {
        let mut places = BTreeMap::new();
        places.insert("A".to_string(), Point::new(0.0, 0.0));
        places.insert("B".to_string(), Point::new(2.0, 1.0));
        let mut routes = BTreeMap::new();
        routes.insert("R1".to_string(), vec!["A".to_string(), "B".to_string()]);
        Diagram::new(places, routes, Canvas::default(), 50.0)
    }

    #[test]
    fn rounding_keeps_four_places() {
        let p = Point::new(1.234_56, -7.000_049).rounded();
        assert_eq!(p, Point::new(1.2346, -7.0));
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        let mut set = HashSet::new();
        set.insert(Point::new(0.0, 1.0));
        assert!(set.contains(&Point::new(-0.0, 1.0)));
    }

    #[test]
    fn valid_diagram_passes() {
        assert_eq!(sample().validate(), Ok(()));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let mut diagram = sample();
        diagram.add_route("R2", vec!["A".to_string(), "Z".to_string()]);
        assert_eq!(
            diagram.validate(),
            Err(DiagramError::DanglingReference {
                route: "R2".to_string(),
                place: "Z".to_string()
            })
        );
    }

    #[test]
    fn orphan_place_is_rejected() {
        let mut diagram = sample();
        diagram.set_place("C", Point::new(5.0, 5.0));
        assert_eq!(
            diagram.validate(),
            Err(DiagramError::OrphanPlace {
                place: "C".to_string()
            })
        );
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let mut diagram = sample();
        diagram.set_place("A", Point::new(f64::NAN, 0.0));
        assert!(matches!(
            diagram.validate(),
            Err(DiagramError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn padding_wider_than_canvas_is_rejected() {
        let mut diagram = sample();
        diagram.canvas = Canvas {
            width: 400.0,
            height: 90.0,
        };
        assert_eq!(
            diagram.validate(),
            Err(DiagramError::PaddingExceedsCanvas {
                padding: 50.0,
                width: 400.0,
                height: 90.0
            })
        );
        diagram.canvas.height = 100.0;
        assert_eq!(diagram.validate(), Ok(()));
    }

    #[test]
    fn bounds_follow_place_updates() {
        let mut diagram = sample();
        assert_eq!(diagram.bounds().map(|b| b.max), Some(Point::new(2.0, 1.0)));
        diagram.set_place("B", Point::new(10.0, -3.0));
        let bounds = diagram.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(0.0, -3.0));
        assert_eq!(bounds.max, Point::new(10.0, 0.0));
    }
}
