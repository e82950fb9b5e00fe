use serde::{Deserialize, Serialize};

pub mod canvas;
pub mod diagram;
pub mod utils;

pub use canvas::*;
pub use diagram::*;
pub use utils::*;

pub const CANVAS_WIDTH: u32 = 256;
pub const CANVAS_HEIGHT: u32 = 256;
pub const RADIUS: f32 = 0.45;
pub const NODE_RADIUS: f32 = 0.02;
pub const SKELETON_WIDTH: f32 = 0.015;
pub const CHORD_WIDTH: f32 = 0.01;
pub const RIGIDITY: f32 = 6.0;

/// Drawing options for one rendering pass. All lengths except the canvas size
/// are expressed in the normalized `[-0.5, 0.5]` coordinate space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output canvas size in pixels.
    pub width: u32,
    pub height: u32,
    /// Radius of the skeleton circle the chord endpoints sit on.
    pub radius: f32,
    /// Radius of the filled marker drawn at each chord endpoint.
    pub node_radius: f32,
    pub skeleton_width: f32,
    pub chord_width: f32,
    /// Maximum bowing strength, reached by chords whose angular span is a
    /// multiple of pi. Quarter-turn chords stay straight regardless.
    pub rigidity: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            radius: RADIUS,
            node_radius: NODE_RADIUS,
            skeleton_width: SKELETON_WIDTH,
            chord_width: CHORD_WIDTH,
            rigidity: RIGIDITY,
        }
    }
}
