use core::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

pub const MIN_NODE_COUNT: usize = 2;
pub const MAX_NODE_COUNT: usize = 25;
pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 9;
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

/// Graph generation parameters controlled by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsGraph {
    /// Clamped to `MIN_NODE_COUNT..=MAX_NODE_COUNT` on use
    pub node_count: usize,

    /// Draw weights from `MIN_WEIGHT..=MAX_WEIGHT`; algorithms that need weights
    /// force this on
    pub weighted: bool,

    /// Overrides the selected algorithm's default edge density
    pub edge_chance: Option<f64>,
}

impl Default for SettingsGraph {
    fn default() -> Self {
        Self {
            node_count: 8,
            weighted: false,
            edge_chance: None,
        }
    }
}

impl SettingsGraph {
    pub fn clamped_node_count(&self) -> usize {
        self.node_count.clamp(MIN_NODE_COUNT, MAX_NODE_COUNT)
    }
}

/// Auto-run parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPlayback {
    pub interval: Duration,
}

impl Default for SettingsPlayback {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Palette and sizes used by [`crate::render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsStyle {
    pub node_radius: f32,
    pub edge_width: f32,
    pub highlight_width: f32,
    pub show_weights: bool,

    pub node_idle: Color32,
    pub node_pending: Color32,
    pub node_visited: Color32,
    pub node_current: Color32,
    pub label: Color32,

    pub edge_idle: Color32,
    pub edge_traversed: Color32,
    pub edge_tree: Color32,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            node_radius: 14.,
            edge_width: 1.5,
            highlight_width: 3.5,
            show_weights: true,

            node_idle: Color32::from_rgb(90, 90, 100),
            node_pending: Color32::from_rgb(230, 170, 60),
            node_visited: Color32::from_rgb(70, 150, 230),
            node_current: Color32::from_rgb(230, 80, 80),
            label: Color32::WHITE,

            edge_idle: Color32::from_rgb(128, 128, 128),
            edge_traversed: Color32::from_rgb(70, 150, 230),
            edge_tree: Color32::from_rgb(90, 200, 120),
        }
    }
}

/// Top level configuration of a [`crate::Session`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub graph: SettingsGraph,
    pub playback: SettingsPlayback,
    pub style: SettingsStyle,
}
