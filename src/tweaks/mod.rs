//! Tweaks Module
//!
//! Five performance parameters (tempo, swing, filter cutoff, reverb and
//! delay mix) live in a single-line JSON comment at the top of generated
//! code, and are projected onto matching literals in the code body.

mod config;
mod injector;
mod slots;

pub use config::{TweakKind, TweaksConfig, DEFAULT_TWEAKS};
pub use injector::{
    extract_tweaks, extract_tweaks_with_defaults, inject_tweaks, parse_tweaks, tweaks_need_update,
    tweaks_need_update_with_defaults, tweaks_to_comment, TWEAKS_MARKER,
};
pub use slots::{apply_slots, recognized_slots};
