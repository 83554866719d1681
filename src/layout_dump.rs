use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub places: Vec<PlaceDump>,
    pub routes: Vec<RouteDump>,
}

#[derive(Debug, Serialize)]
pub struct PlaceDump {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Serialize)]
pub struct RouteDump {
    pub name: String,
    pub color: String,
    /// One polyline per hop between consecutive places.
    pub segments: Vec<Vec<[f64; 2]>>,
    pub label_anchors: Vec<[f64; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let places = layout
            .places
            .iter()
            .map(|place| PlaceDump {
                name: place.name.clone(),
                x: place.position.x,
                y: place.position.y,
            })
            .collect();

        let routes = layout
            .routes
            .iter()
            .map(|route| RouteDump {
                name: route.name.clone(),
                color: route.color.clone(),
                segments: route
                    .path
                    .segments
                    .iter()
                    .map(|segment| segment.points().iter().map(|p| [p.x, p.y]).collect())
                    .collect(),
                label_anchors: route.label_anchors().iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            padding: layout.padding,
            places,
            routes,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    log::info!(path = path.display().to_string(); "Wrote layout dump");
    Ok(())
}
