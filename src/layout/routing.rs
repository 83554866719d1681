use crate::ir::Point;

/// Pixel deltas closer than this are treated as equal when classifying a hop.
const ALIGN_EPSILON: f64 = 1e-9;

/// One hop between consecutive places of a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    /// Elbow corner; `None` when the hop is already straight.
    pub bend: Option<Point>,
    pub end: Point,
}

impl Segment {
    pub fn points(&self) -> Vec<Point> {
        match self.bend {
            Some(bend) => vec![self.start, bend, self.end],
            None => vec![self.start, self.end],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePath {
    pub segments: Vec<Segment>,
}

impl RoutePath {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Elbow corners in route order; route labels are placed here.
    pub fn bends(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().filter_map(|segment| segment.bend)
    }
}

/// Routes an ordered list of pixel positions as octolinear polylines.
///
/// A route with fewer than two positions yields an empty path, and hops
/// between identical positions are dropped.
pub fn route_path(points: &[Point]) -> RoutePath {
    RoutePath {
        segments: points
            .windows(2)
            .filter_map(|pair| route_segment(pair[0], pair[1]))
            .collect(),
    }
}

/// Straight when the hop is horizontal, vertical or at 45 degrees; otherwise
/// an elbow whose diagonal run ends at `end` and whose orthogonal run
/// absorbs the remaining distance from `start`.
pub fn route_segment(start: Point, end: Point) -> Option<Segment> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let (adx, ady) = (dx.abs(), dy.abs());

    if adx <= ALIGN_EPSILON && ady <= ALIGN_EPSILON {
        return None;
    }
    if adx <= ALIGN_EPSILON || ady <= ALIGN_EPSILON || (adx - ady).abs() <= ALIGN_EPSILON {
        return Some(Segment {
            start,
            bend: None,
            end,
        });
    }

    let sign = dx.signum() * dy.signum();
    let bend = if adx < ady {
        Point::new(end.x - dx, end.y - dx * sign)
    } else {
        Point::new(end.x - dy * sign, end.y - dy)
    };
    Some(Segment {
        start,
        bend: Some(bend),
        end,
    })
}
