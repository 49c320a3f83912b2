//! Layer Combiner
//!
//! Turns an ordered set of layers into one executable program. Audible
//! layers are emitted with a banner header and an optional volume note;
//! muted layers are kept in the output but wrapped in a block comment so
//! the runtime never executes them.
//!
//! Combining happens in two steps: [`resolve_contributions`] decides what
//! each layer contributes, and [`LayerContribution::render`] turns that
//! decision into text.

use std::borrow::Cow;
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use super::layer::{AudioLayer, UNITY_VOLUME};

// ============================================================================
// Constants
// ============================================================================

/// Attenuation reported for zero (or negative) volume
pub const SILENCE_FLOOR_DB: f64 = -60.0;

/// Separator placed between rendered layers
pub const LAYER_SEPARATOR: &str = "\n\n";

const HEADER_RULE: &str = "// ========================================";

const LAYER_HEADER_PATTERN: &str = r"(?m)^[ \t]*//[ \t]*LAYER:[ \t]*(?P<name>.+?)(?:[ \t]+\[(?:MUTED|SOLO)\])?(?:[ \t]+\(-?\d+%\))?[ \t]*\r?$";

static LAYER_HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

fn layer_header_regex() -> &'static Regex {
    LAYER_HEADER_REGEX
        .get_or_init(|| Regex::new(LAYER_HEADER_PATTERN).expect("invalid regex pattern"))
}

// ============================================================================
// Solo / Volume
// ============================================================================

/// Resolve solo state into effective mute flags.
///
/// With nothing soloed the input is borrowed back untouched. Otherwise every
/// non-soloed layer comes back muted, and soloed layers keep their own flag.
pub fn apply_solo_logic(layers: &[AudioLayer]) -> Cow<'_, [AudioLayer]> {
    if !layers.iter().any(|layer| layer.soloed) {
        return Cow::Borrowed(layers);
    }

    Cow::Owned(
        layers
            .iter()
            .map(|layer| AudioLayer {
                muted: layer.muted || !layer.soloed,
                ..layer.clone()
            })
            .collect(),
    )
}

/// Convert a volume percentage to decibels relative to unity.
///
/// `<= 0` clamps to [`SILENCE_FLOOR_DB`], `>= 100` clamps to 0 dB.
pub fn volume_to_db(percent: i32) -> f64 {
    if percent <= 0 {
        return SILENCE_FLOOR_DB;
    }
    if percent >= UNITY_VOLUME {
        return 0.0;
    }
    20.0 * (f64::from(percent) / 100.0).log10()
}

// ============================================================================
// Text Builders
// ============================================================================

/// Layer name as it may appear inside a generated comment: line breaks
/// become spaces and `*/` is defused.
fn comment_safe_name(name: &str) -> String {
    name.replace(['\r', '\n'], " ").replace("*/", "* /")
}

/// Wrap code in a block comment naming the layer, making it inert.
///
/// Nested `*/` sequences are defused so they cannot end the comment early.
pub fn apply_mute_wrapper(code: &str, layer_name: &str) -> String {
    let inert = code.replace("*/", "* /");
    let name = comment_safe_name(layer_name);
    format!("/* [MUTED: {name}]\n{inert}\n[/MUTED: {name}] */")
}

/// Prefix code with a volume annotation. Unity volume returns the code as-is.
pub fn inject_layer_volume(code: &str, percent: i32, layer_name: &str) -> String {
    if percent == UNITY_VOLUME {
        return code.to_string();
    }

    let db = volume_to_db(percent);
    let name = comment_safe_name(layer_name);
    format!("// LAYER_VOLUME: {db:.1}dB ({percent}%) for \"{name}\"\n{code}")
}

/// Banner comment for a layer. Mute is shown in preference to solo.
pub fn generate_layer_header(layer: &AudioLayer) -> String {
    let status = if layer.muted {
        " [MUTED]"
    } else if layer.soloed {
        " [SOLO]"
    } else {
        ""
    };
    let volume = if layer.volume != UNITY_VOLUME {
        format!(" ({}%)", layer.volume)
    } else {
        String::new()
    };

    let name = comment_safe_name(&layer.name);
    format!("{HEADER_RULE}\n// LAYER: {name}{status}{volume}\n{HEADER_RULE}")
}

// ============================================================================
// Contributions
// ============================================================================

/// Why a layer is left out of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionReason {
    /// The layer's own mute flag is set
    Muted,
    /// Another layer is soloed
    SoloedOut,
}

/// What a single layer adds to the combined program
#[derive(Debug, Clone, PartialEq)]
pub enum LayerContribution {
    Active {
        name: String,
        header: String,
        code: String,
        volume: i32,
    },
    Suppressed {
        name: String,
        header: String,
        code: String,
        reason: SuppressionReason,
    },
}

impl LayerContribution {
    pub fn name(&self) -> &str {
        match self {
            LayerContribution::Active { name, .. } | LayerContribution::Suppressed { name, .. } => {
                name
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LayerContribution::Active { .. })
    }

    /// Serialize to program text
    pub fn render(&self) -> String {
        match self {
            LayerContribution::Active {
                name,
                header,
                code,
                volume,
            } => format!("{header}\n{}", inject_layer_volume(code, *volume, name)),
            LayerContribution::Suppressed {
                name, header, code, ..
            } => apply_mute_wrapper(&format!("{header}\n{code}"), name),
        }
    }
}

/// Decide each non-blank layer's contribution, in input order.
pub fn resolve_contributions(layers: &[AudioLayer]) -> Vec<LayerContribution> {
    let effective = apply_solo_logic(layers);

    layers
        .iter()
        .zip(effective.iter())
        .filter_map(|(original, layer)| {
            if layer.is_blank() {
                return None;
            }

            let name = layer.name.clone();
            let header = generate_layer_header(layer);
            let code = layer.code.clone();

            let contribution = if layer.muted {
                let reason = if original.muted {
                    SuppressionReason::Muted
                } else {
                    SuppressionReason::SoloedOut
                };
                LayerContribution::Suppressed {
                    name,
                    header,
                    code,
                    reason,
                }
            } else {
                LayerContribution::Active {
                    name,
                    header,
                    code,
                    volume: layer.volume,
                }
            };
            Some(contribution)
        })
        .collect()
}

/// Combine layers into a single executable program.
pub fn combine_layers(layers: &[AudioLayer]) -> String {
    if layers.is_empty() {
        return String::new();
    }

    let contributions = resolve_contributions(layers);
    debug!(
        "[COMBINE] {} layers -> {} contributions ({} active)",
        layers.len(),
        contributions.len(),
        contributions.iter().filter(|c| c.is_active()).count()
    );

    contributions
        .iter()
        .map(LayerContribution::render)
        .collect::<Vec<_>>()
        .join(LAYER_SEPARATOR)
}

/// Recover layer names from combined output, in order of appearance.
///
/// Best effort: only headers in the exact generated format are found.
pub fn extract_layer_names(combined_code: &str) -> Vec<String> {
    layer_header_regex()
        .captures_iter(combined_code)
        .map(|caps| caps["name"].trim().to_string())
        .collect()
}
