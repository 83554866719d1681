use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ir::{Canvas, Diagram, Point, Titles};

/// On-disk shape of a diagram. Places are stored `[latitude, longitude]`,
/// the order the source data sets use.
#[derive(Debug, Serialize, Deserialize)]
struct DiagramFile {
    places: BTreeMap<String, [f64; 2]>,
    #[serde(alias = "roads")]
    routes: BTreeMap<String, Vec<String>>,
    width_height: [f64; 2],
    padding: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    footer: Option<String>,
}

impl DiagramFile {
    fn into_diagram(self) -> Diagram {
        let places = self
            .places
            .into_iter()
            .map(|(name, [lat, lng])| (name, Point::new(lng, lat)))
            .collect();
        let [width, height] = self.width_height;
        Diagram::new(places, self.routes, Canvas { width, height }, self.padding).with_titles(
            Titles {
                title: self.title,
                subtitle: self.sub_title,
                footer: self.footer,
            },
        )
    }

    fn from_diagram(diagram: &Diagram) -> Self {
        let places = diagram
            .places()
            .iter()
            .map(|(name, point)| {
                let p = point.rounded();
                (name.clone(), [p.y, p.x])
            })
            .collect();
        Self {
            places,
            routes: diagram.routes().clone(),
            width_height: [diagram.canvas.width, diagram.canvas.height],
            padding: diagram.padding,
            title: diagram.titles.title.clone(),
            sub_title: diagram.titles.subtitle.clone(),
            footer: diagram.titles.footer.clone(),
        }
    }
}

/// Parses a diagram document, accepting JSON5 when strict JSON fails.
pub fn parse_diagram(input: &str) -> Result<Diagram> {
    let file = match serde_json::from_str::<DiagramFile>(input) {
        Ok(file) => file,
        Err(json_err) => json5::from_str::<DiagramFile>(input)
            .with_context(|| format!("invalid diagram document ({json_err})"))?,
    };
    Ok(file.into_diagram())
}

/// Pretty JSON with places and routes sorted by name and coordinates rounded.
pub fn to_json_string(diagram: &Diagram) -> Result<String> {
    let mut out = serde_json::to_string_pretty(&DiagramFile::from_diagram(diagram))?;
    out.push('\n');
    Ok(out)
}

pub fn load_diagram(path: &Path) -> Result<Diagram> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_diagram(&contents).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn save_diagram(path: &Path, diagram: &Diagram) -> Result<()> {
    std::fs::write(path, to_json_string(diagram)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!(path = path.display().to_string(); "Wrote diagram document");
    Ok(())
}
