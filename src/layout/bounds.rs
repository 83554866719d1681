use crate::ir::{Canvas, Point};

/// Componentwise min/max over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Returns `None` when `points` is empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }

    pub fn span_x(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn span_y(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn transform(&self, canvas: Canvas, padding: f64) -> Transform {
        Transform::new(*self, canvas, padding)
    }
}

/// Linear map from diagram space into pixel space.
///
/// Axis-1 spans `[padding, width - padding]` left to right. Axis-2 spans
/// `[padding, height - padding]` inverted, so the largest axis-2 value lands
/// on the top edge. An axis whose span is zero maps every point to the
/// middle of its pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    bounds: BoundingBox,
    canvas: Canvas,
    padding: f64,
}

impl Transform {
    pub fn new(bounds: BoundingBox, canvas: Canvas, padding: f64) -> Self {
        if bounds.span_x() == 0.0 || bounds.span_y() == 0.0 {
            log::warn!(
                span_x = bounds.span_x(),
                span_y = bounds.span_y();
                "Degenerate bounding box, collapsed axis maps to the canvas midpoint"
            );
        }
        Self {
            bounds,
            canvas,
            padding,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn apply(&self, p: Point) -> Point {
        let fx = unit_position(p.x, self.bounds.min.x, self.bounds.span_x());
        let fy = unit_position(p.y, self.bounds.min.y, self.bounds.span_y());
        let inner_w = self.canvas.width - 2.0 * self.padding;
        let inner_h = self.canvas.height - 2.0 * self.padding;
        Point::new(
            self.padding + fx * inner_w,
            self.padding + (1.0 - fy) * inner_h,
        )
    }
}

fn unit_position(value: f64, min: f64, span: f64) -> f64 {
    if span == 0.0 {
        return 0.5;
    }
    (value - min) / span
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn canvas() -> Canvas {
        Canvas {
            width: 200.0,
            height: 100.0,
        }
    }

    #[test]
    fn bounding_box_of_empty_set_is_none() {
        assert_eq!(BoundingBox::from_points(Vec::new()), None);
    }

    #[test]
    fn bounding_box_is_componentwise() {
        let bbox = BoundingBox::from_points([
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, Point::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point::new(4.0, 5.0));
    }

    #[test]
    fn corners_map_to_padded_edges_with_inverted_y() {
        let bbox = BoundingBox::from_points([Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap();
        let t = bbox.transform(canvas(), 10.0);
        let low = t.apply(Point::new(0.0, 0.0));
        let high = t.apply(Point::new(10.0, 10.0));
        assert_approx_eq!(f64, low.x, 10.0);
        assert_approx_eq!(f64, low.y, 90.0);
        assert_approx_eq!(f64, high.x, 190.0);
        assert_approx_eq!(f64, high.y, 10.0);
    }

    #[test]
    fn zero_span_axis_maps_to_midpoint() {
        let bbox = BoundingBox::from_points([Point::new(0.0, 3.0), Point::new(8.0, 3.0)]).unwrap();
        let t = bbox.transform(canvas(), 10.0);
        let p = t.apply(Point::new(4.0, 3.0));
        assert_approx_eq!(f64, p.x, 100.0);
        assert_approx_eq!(f64, p.y, 50.0);
    }

    #[test]
    fn single_point_maps_to_center() {
        let bbox = BoundingBox::from_points([Point::new(7.0, 7.0)]).unwrap();
        let p = bbox.transform(canvas(), 0.0).apply(Point::new(7.0, 7.0));
        assert_eq!(p, Point::new(100.0, 50.0));
    }
}
