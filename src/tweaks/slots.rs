//! Tweak Slots
//!
//! Each slot names one recognised position in generated Tone.js code and
//! knows how to render a tweak value into it. Slots are applied uniformly;
//! a slot whose pattern does not occur is skipped.

use std::sync::OnceLock;

use log::debug;
use regex::{Captures, Regex};

use super::config::{TweakKind, TweaksConfig};

/// A recognised parameter position
///
/// `pattern` must define a `prefix` group (kept verbatim) followed by a
/// `value` group (replaced by `render`).
struct TweakSlot {
    kind: TweakKind,
    pattern: &'static str,
    render: fn(&TweaksConfig) -> String,
}

static SLOTS: [TweakSlot; 5] = [
    TweakSlot {
        kind: TweakKind::Tempo,
        pattern: r"(?P<prefix>Tone\.(?:Transport|getTransport\(\))\.bpm\.value\s*=\s*)(?P<value>\d+(?:\.\d+)?)",
        render: |t| t.bpm.to_string(),
    },
    TweakSlot {
        kind: TweakKind::Swing,
        pattern: r"(?P<prefix>Tone\.(?:Transport|getTransport\(\))\.swing\s*=\s*)(?P<value>\d*\.?\d+)",
        render: |t| TweaksConfig::fraction(t.swing),
    },
    TweakSlot {
        kind: TweakKind::Filter,
        pattern: r"(?P<prefix>new\s+Tone\.Filter\(\s*)(?P<value>\d+(?:\.\d+)?)",
        render: |t| t.filter.to_string(),
    },
    TweakSlot {
        kind: TweakKind::ReverbWet,
        pattern: r"(?P<prefix>new\s+Tone\.Reverb\(\s*\{[^}]*?\bwet\s*:\s*)(?P<value>\d*\.?\d+)",
        render: |t| TweaksConfig::fraction(t.reverb),
    },
    TweakSlot {
        kind: TweakKind::DelayWet,
        pattern: r"(?P<prefix>\b\w*[dD]elay\w*\.wet\.value\s*=\s*)(?P<value>\d*\.?\d+)",
        render: |t| TweaksConfig::fraction(t.delay),
    },
];

struct CompiledSlot {
    slot: &'static TweakSlot,
    regex: Regex,
}

static COMPILED_SLOTS: OnceLock<Vec<CompiledSlot>> = OnceLock::new();

fn compiled_slots() -> &'static [CompiledSlot] {
    COMPILED_SLOTS.get_or_init(|| {
        SLOTS
            .iter()
            .map(|slot| CompiledSlot {
                slot,
                regex: Regex::new(slot.pattern).expect("invalid regex pattern"),
            })
            .collect()
    })
}

impl CompiledSlot {
    fn apply(&self, code: &str, tweaks: &TweaksConfig) -> String {
        if !self.regex.is_match(code) {
            debug!("[TWEAKS] {} slot not present, skipping", self.slot.kind);
            return code.to_string();
        }

        let value = (self.slot.render)(tweaks);
        self.regex
            .replace_all(code, |caps: &Captures| format!("{}{}", &caps["prefix"], value))
            .into_owned()
    }
}

/// Write every tweak value into the positions present in `code`
pub fn apply_slots(code: &str, tweaks: &TweaksConfig) -> String {
    compiled_slots()
        .iter()
        .fold(code.to_string(), |acc, slot| slot.apply(&acc, tweaks))
}

/// Which tweak positions `code` exposes
pub fn recognized_slots(code: &str) -> Vec<TweakKind> {
    compiled_slots()
        .iter()
        .filter(|compiled| compiled.regex.is_match(code))
        .map(|compiled| compiled.slot.kind)
        .collect()
}
