mod bounds;
mod declutter;
mod error;
mod grid;
mod routing;
mod types;

pub use bounds::*;
pub use declutter::*;
pub use error::*;
pub use grid::*;
pub use routing::*;
pub use types::*;

use std::collections::BTreeMap;

use crate::config::{LayoutConfig, LayoutStrategy};
use crate::ir::{Diagram, Point};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutReport {
    pub strategy: LayoutStrategy,
    /// Present only for [`LayoutStrategy::Declutter`].
    pub declutter: Option<DeclutterReport>,
}

/// Moves places according to the configured strategy. Grid normalization and
/// declutter relaxation are alternatives, never chained.
pub fn apply_strategy(places: &mut BTreeMap<String, Point>, config: &LayoutConfig) -> LayoutReport {
    match config.strategy {
        LayoutStrategy::Grid => {
            *places = normalize_grid(places);
            LayoutReport {
                strategy: LayoutStrategy::Grid,
                declutter: None,
            }
        }
        LayoutStrategy::Declutter => LayoutReport {
            strategy: LayoutStrategy::Declutter,
            declutter: Some(declutter(places, &config.declutter)),
        },
    }
}

/// Derives pixel geometry for a laid-out diagram.
///
/// The bounding box and transform are taken once from the diagram's current
/// places; routes are routed in name order. Fails if a route names a place
/// the diagram does not have.
pub fn compute_layout(diagram: &Diagram, theme: &Theme) -> Result<Layout, LayoutError> {
    let canvas = diagram.canvas;
    let padding = diagram.padding;
    let transform = diagram
        .bounds()
        .map(|bounds| bounds.transform(canvas, padding));

    let to_pixels = |p: Point| transform.map_or(p, |t| t.apply(p));

    let places = diagram
        .places()
        .iter()
        .map(|(name, point)| PlaceLayout {
            name: name.clone(),
            position: to_pixels(*point),
        })
        .collect();

    let mut route_colors = RouteColors::default();
    let mut routes = Vec::with_capacity(diagram.routes().len());
    for (name, stops) in diagram.routes() {
        let mut pixels = Vec::with_capacity(stops.len());
        for stop in stops {
            let point = diagram.place(stop).ok_or_else(|| LayoutError::UnknownPlace {
                route: name.clone(),
                place: stop.clone(),
            })?;
            pixels.push(to_pixels(point));
        }
        routes.push(RouteLayout {
            name: name.clone(),
            color: route_colors.get_or_assign(name, theme),
            path: route_path(&pixels),
        });
    }

    let title_band = if diagram.titles.is_empty() {
        0.0
    } else {
        2.0 * padding
    };

    Ok(Layout {
        width: canvas.width + 2.0 * padding,
        height: canvas.height + 2.0 * padding + title_band,
        canvas,
        padding,
        transform,
        places,
        routes,
        route_colors,
        titles: diagram.titles.clone(),
    })
}
