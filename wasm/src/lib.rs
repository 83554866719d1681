use angle_diagram::{LayoutStrategy, RenderOptions, Theme, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AngleDiagramRenderOptions {
    theme: Option<String>,
    strategy: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    min_distance: Option<f64>,
    max_iterations: Option<usize>,
}

fn build_render_options(options: AngleDiagramRenderOptions) -> RenderOptions {
    let mut render_options = RenderOptions::transit();
    if options.theme.as_deref() == Some("schematic") {
        render_options.config.theme = Theme::schematic();
    }

    if let Some(strategy) = options.strategy.as_deref().and_then(LayoutStrategy::from_token) {
        render_options.config.layout.strategy = strategy;
    }
    if let Some(font_family) = options.font_family {
        render_options.config.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.config.theme.font_size = font_size;
    }
    if let Some(min_distance) = options.min_distance {
        render_options.config.layout.declutter.min_distance = min_distance;
    }
    if let Some(max_iterations) = options.max_iterations {
        render_options.config.layout.declutter.max_iterations = max_iterations;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_angle_diagram_svg(json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<AngleDiagramRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        AngleDiagramRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(json, render_options).map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
