#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, LayoutStrategy, load_config};
pub use document::{load_diagram, parse_diagram, save_diagram, to_json_string};
pub use ir::{Canvas, Diagram, DiagramError, Point, Titles};
pub use layout::{Layout, compute_layout};
pub use render::render_svg;
pub use theme::Theme;

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
}

impl RenderOptions {
    pub fn transit() -> Self {
        Self::default()
    }

    pub fn schematic() -> Self {
        let mut config = Config::default();
        config.theme = Theme::schematic();
        config.layout.strategy = LayoutStrategy::Grid;
        Self { config }
    }
}

/// Parses, validates, lays out and renders a diagram document to SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let mut diagram = parse_diagram(input)?;
    diagram.validate()?;
    diagram.apply_layout(&options.config.layout);
    let layout = compute_layout(&diagram, &options.config.theme)?;
    Ok(render_svg(&layout, &options.config.theme))
}
