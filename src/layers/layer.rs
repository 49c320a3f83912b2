//! Audio Layer
//!
//! One independently editable code fragment of a composition, carrying its
//! own mute/solo/volume state. Layers are display-ordered; the order is the
//! order they appear in the combined program.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed layer colour palette, assigned by creation index.
pub const LAYER_COLORS: [&str; 10] = [
    "#f97316", // orange
    "#22c55e", // green
    "#3b82f6", // blue
    "#a855f7", // purple
    "#ec4899", // pink
    "#eab308", // yellow
    "#14b8a6", // teal
    "#ef4444", // red
    "#6366f1", // indigo
    "#84cc16", // lime
];

/// Name given to the layer every composition starts with.
pub const DEFAULT_LAYER_NAME: &str = "main";

/// Unity gain, in percent.
pub const UNITY_VOLUME: i32 = 100;

/// Palette colour for the layer created at `index`
pub fn layer_color(index: usize) -> &'static str {
    LAYER_COLORS[index % LAYER_COLORS.len()]
}

fn generate_layer_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_layer_color() -> String {
    layer_color(0).to_string()
}

fn default_volume() -> i32 {
    UNITY_VOLUME
}

/// A single composition track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioLayer {
    /// Opaque identifier, fixed for the layer's lifetime
    #[serde(default = "generate_layer_id")]
    pub id: String,
    /// Display label; not required to be unique
    pub name: String,
    /// The layer's own code fragment
    #[serde(default)]
    pub code: String,
    /// Excluded from playback, kept textually
    #[serde(default)]
    pub muted: bool,
    /// Silences every non-soloed layer while set
    #[serde(default)]
    pub soloed: bool,
    /// Percent of unity gain (100 = unity)
    #[serde(default = "default_volume")]
    pub volume: i32,
    /// Display colour from [`LAYER_COLORS`]
    #[serde(default = "default_layer_color")]
    pub color: String,
}

impl AudioLayer {
    /// Create an audible unity-gain layer coloured by its creation index
    pub fn new(name: impl Into<String>, code: impl Into<String>, index: usize) -> Self {
        Self {
            id: generate_layer_id(),
            name: name.into(),
            code: code.into(),
            muted: false,
            soloed: false,
            volume: UNITY_VOLUME,
            color: layer_color(index).to_string(),
        }
    }

    /// The default "main" layer a composition starts with
    pub fn main(code: impl Into<String>) -> Self {
        Self::new(DEFAULT_LAYER_NAME, code, 0)
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn with_soloed(mut self, soloed: bool) -> Self {
        self.soloed = soloed;
        self
    }

    pub fn with_volume(mut self, volume: i32) -> Self {
        self.volume = volume;
        self
    }

    /// True when the layer has no code worth emitting
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}
