use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Rank-normalize both axes onto an evenly spaced grid.
    Grid,
    /// Keep real positions and push crowded places apart.
    #[default]
    Declutter,
}

impl LayoutStrategy {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "grid" => Some(Self::Grid),
            "declutter" => Some(Self::Declutter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclutterConfig {
    /// Pairs closer than this (in diagram units) repel each other.
    pub min_distance: f64,
    pub alpha: f64,
    pub max_iterations: usize,
    /// Nudges no larger than this on both axes count as no movement.
    pub tolerance: f64,
}

impl Default for DeclutterConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            alpha: 0.01,
            max_iterations: 1_000,
            tolerance: 1e-12,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub strategy: LayoutStrategy,
    pub declutter: DeclutterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster scale factor for PNG output.
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::transit(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeclutterFile {
    min_distance: Option<f64>,
    alpha: Option<f64>,
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    scale: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    strategy: Option<LayoutStrategy>,
    declutter: Option<DeclutterFile>,
    render: Option<RenderFile>,
    font_family: Option<String>,
    font_size: Option<f32>,
    route_color: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    log::info!(path = path.display().to_string(); "Loading configuration");
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "schematic" => config.theme = Theme::schematic(),
            "transit" | "default" => config.theme = Theme::transit(),
            other => log::warn!(theme = other; "Unknown theme, keeping default"),
        }
    }
    if let Some(v) = parsed.font_family {
        config.theme.font_family = v;
    }
    if let Some(v) = parsed.font_size {
        config.theme.font_size = v;
    }
    if let Some(v) = parsed.route_color {
        config.theme.route_color = Some(v);
    }

    if let Some(strategy) = parsed.strategy {
        config.layout.strategy = strategy;
    }
    if let Some(d) = parsed.declutter {
        let target = &mut config.layout.declutter;
        if let Some(v) = d.min_distance {
            target.min_distance = v;
        }
        if let Some(v) = d.alpha {
            target.alpha = v;
        }
        if let Some(v) = d.max_iterations {
            target.max_iterations = v;
        }
        if let Some(v) = d.tolerance {
            target.tolerance = v;
        }
    }

    if let Some(r) = parsed.render {
        if let Some(v) = r.scale {
            config.render.scale = v;
        }
        if let Some(v) = r.background {
            config.theme.background = v;
        }
    }

    Ok(config)
}
