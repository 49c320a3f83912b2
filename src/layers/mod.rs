//! Layer Model Module
//!
//! A composition is an ordered set of code layers, each with its own
//! mute/solo/volume state. The combiner merges them into one program:
//! - Audible layers are emitted under a header, with a volume note
//! - Muted (or soloed-out) layers are kept as inert block comments

mod combiner;
mod layer;
mod stack;

pub use combiner::{
    apply_mute_wrapper, apply_solo_logic, combine_layers, extract_layer_names,
    generate_layer_header, inject_layer_volume, resolve_contributions, volume_to_db,
    LayerContribution, SuppressionReason, LAYER_SEPARATOR, SILENCE_FLOOR_DB,
};
pub use layer::{layer_color, AudioLayer, DEFAULT_LAYER_NAME, LAYER_COLORS, UNITY_VOLUME};
pub use stack::LayerStack;
