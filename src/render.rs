use crate::config::RenderConfig;
use crate::ir::Point;
use crate::layout::{Layout, PlaceLayout, RouteLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub fill: String,
    pub anchor: TextAnchor,
    pub middle_baseline: bool,
}

/// Receives drawing primitives and owns their serialization.
pub trait DrawingSink {
    fn begin(&mut self, width: f64, height: f64, background: &str);
    fn group_start(&mut self, class: &str);
    fn group_end(&mut self);
    fn circle(&mut self, center: Point, radius: f32, style: &ShapeStyle);
    /// Each inner slice is one disconnected polyline of the same path.
    fn path(&mut self, polylines: &[Vec<Point>], style: &ShapeStyle);
    fn text(&mut self, at: Point, content: &str, style: &TextStyle);
}

#[derive(Debug, Default)]
pub struct SvgSink {
    svg: String,
}

impl SvgSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> String {
        self.svg.push_str("</svg>");
        self.svg
    }
}

impl DrawingSink for SvgSink {
    fn begin(&mut self, width: f64, height: f64, background: &str) {
        self.svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
        ));
        self.svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }

    fn group_start(&mut self, class: &str) {
        self.svg
            .push_str(&format!("<g class=\"{}\">", escape_xml(class)));
    }

    fn group_end(&mut self) {
        self.svg.push_str("</g>");
    }

    fn circle(&mut self, center: Point, radius: f32, style: &ShapeStyle) {
        self.svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            center.x,
            center.y,
            radius,
            escape_xml(&style.fill),
            escape_xml(&style.stroke),
            style.stroke_width
        ));
    }

    fn path(&mut self, polylines: &[Vec<Point>], style: &ShapeStyle) {
        let d = polylines
            .iter()
            .map(|points| points_to_path(points))
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if d.is_empty() {
            return;
        }
        self.svg.push_str(&format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>",
            d,
            escape_xml(&style.fill),
            escape_xml(&style.stroke),
            style.stroke_width
        ));
    }

    fn text(&mut self, at: Point, content: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let baseline = if style.middle_baseline {
            " dominant-baseline=\"middle\""
        } else {
            ""
        };
        self.svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{anchor}\"{baseline} font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            at.x,
            at.y,
            escape_xml(&style.font_family),
            style.font_size,
            escape_xml(&style.fill),
            escape_xml(content)
        ));
    }
}

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut sink = SvgSink::new();
    emit_layout(layout, theme, &mut sink);
    sink.finish()
}

/// Draws routes, then places on top of them, then the title band.
pub fn emit_layout(layout: &Layout, theme: &Theme, sink: &mut impl DrawingSink) {
    sink.begin(layout.width, layout.height, &theme.background);

    sink.group_start("routes");
    for route in &layout.routes {
        emit_route(route, theme, sink);
    }
    sink.group_end();

    sink.group_start("places");
    for place in &layout.places {
        emit_place(place, theme, sink);
    }
    sink.group_end();

    emit_titles(layout, theme, sink);
}

fn emit_route(route: &RouteLayout, theme: &Theme, sink: &mut impl DrawingSink) {
    sink.group_start("route");
    let polylines: Vec<Vec<Point>> = route.path.segments.iter().map(|s| s.points()).collect();
    sink.path(
        &polylines,
        &ShapeStyle {
            fill: "none".to_string(),
            stroke: route.color.clone(),
            stroke_width: theme.route_stroke_width,
        },
    );
    if theme.route_labels {
        let label = TextStyle {
            font_family: theme.font_family.clone(),
            font_size: theme.route_label_size(),
            fill: theme.text_color.clone(),
            anchor: TextAnchor::Start,
            middle_baseline: false,
        };
        for anchor in route.label_anchors() {
            sink.text(anchor, &route.name, &label);
        }
    }
    sink.group_end();
}

fn emit_place(place: &PlaceLayout, theme: &Theme, sink: &mut impl DrawingSink) {
    sink.group_start("place");
    sink.circle(
        place.position,
        theme.place_radius,
        &ShapeStyle {
            fill: theme.place_fill.clone(),
            stroke: theme.place_stroke.clone(),
            stroke_width: theme.place_stroke_width,
        },
    );
    let at = Point::new(
        place.position.x + f64::from(theme.font_size),
        place.position.y,
    );
    sink.text(
        at,
        &place.name,
        &TextStyle {
            font_family: theme.font_family.clone(),
            font_size: theme.font_size,
            fill: theme.text_color.clone(),
            anchor: TextAnchor::Start,
            middle_baseline: true,
        },
    );
    sink.group_end();
}

fn emit_titles(layout: &Layout, theme: &Theme, sink: &mut impl DrawingSink) {
    if layout.titles.is_empty() {
        return;
    }
    let padding = layout.padding;
    let center_x = layout.canvas.width / 2.0 + padding;
    let lines = [
        (&layout.titles.title, padding * 1.5, 8.0),
        (&layout.titles.subtitle, padding * 2.5, 4.0),
        (&layout.titles.footer, layout.canvas.height + padding * 3.0, 4.5),
    ];

    sink.group_start("titles");
    for (text, y, scale) in lines {
        let Some(text) = text else {
            continue;
        };
        sink.text(
            Point::new(center_x, y),
            text,
            &TextStyle {
                font_family: theme.font_family.clone(),
                font_size: theme.font_size * scale,
                fill: theme.title_color.clone(),
                anchor: TextAnchor::Middle,
                middle_baseline: false,
            },
        );
    }
    sink.group_end();
}

fn points_to_path(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    let mut d = format!("M {:.2} {:.2}", first.x, first.y);
    for point in rest {
        d.push_str(&format!(" L {:.2} {:.2}", point.x, point.y));
    }
    d
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            log::info!(path = path.display().to_string(); "Wrote SVG");
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme.font_family.clone();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render_cfg.scale.max(0.01);
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| anyhow::anyhow!("Invalid PNG scale {scale}"))?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    log::info!(path = output.display().to_string(); "Wrote PNG");
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
