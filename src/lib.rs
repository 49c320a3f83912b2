//! LoField - Track Code Composition Engine
//!
//! LoField turns editor state into the Tone.js program the browser plays:
//! 1. Layers - named code fragments with mute/solo/volume, combined into one script
//! 2. Tweaks - tempo/swing/filter/reverb/delay values kept in sync between a
//!    JSON header comment and the literals in the code
//!
//! Around that core sit the editor helpers: an undo/redo history, share
//! token generation, and an optional engine configuration file.

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod layers;
pub mod share;
pub mod tweaks;

pub use config::EngineConfig;
pub use error::{LoFieldError, Result};
pub use layers::{combine_layers, AudioLayer, LayerStack};
pub use tweaks::{extract_tweaks, inject_tweaks, tweaks_need_update, TweaksConfig};
