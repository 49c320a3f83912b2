//! Tweaks Injector
//!
//! Keeps the TWEAKS comment at the top of generated code and the numeric
//! literals it controls in sync. The comment is the source of truth:
//! reading only ever looks at the comment, writing updates both.

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use serde_json::{json, Value};

use super::config::{TweaksConfig, DEFAULT_TWEAKS};
use super::slots::apply_slots;
use crate::error::{LoFieldError, Result};

/// Prefix of the metadata comment line
pub const TWEAKS_MARKER: &str = "// TWEAKS: ";

const MARKER_LINE_PATTERN: &str = r"(?m)^[ \t]*//[ \t]*TWEAKS:(?P<payload>[^\n]*)$";
const STRIP_LINE_PATTERN: &str = r"(?m)^[ \t]*//[ \t]*TWEAKS:[^\n]*(?:\n|$)";

static MARKER_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
static STRIP_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn marker_line_regex() -> &'static Regex {
    MARKER_LINE_REGEX
        .get_or_init(|| Regex::new(MARKER_LINE_PATTERN).expect("invalid regex pattern"))
}

fn strip_line_regex() -> &'static Regex {
    STRIP_LINE_REGEX.get_or_init(|| Regex::new(STRIP_LINE_PATTERN).expect("invalid regex pattern"))
}

/// Serialize tweaks as a single-line JSON comment
pub fn tweaks_to_comment(tweaks: &TweaksConfig) -> String {
    let payload = json!({
        "bpm": tweaks.bpm,
        "swing": tweaks.swing,
        "filter": tweaks.filter,
        "reverb": tweaks.reverb,
        "delay": tweaks.delay,
    });
    format!("{TWEAKS_MARKER}{payload}")
}

/// Read the TWEAKS comment, telling absent and corrupt metadata apart.
///
/// # Returns
/// * `Ok(None)` - no TWEAKS line in the code
/// * `Ok(Some(..))` - parsed, missing fields filled from `defaults`
/// * `Err(CorruptTweaks)` - a TWEAKS line whose payload is not a JSON object
pub fn parse_tweaks(code: &str, defaults: &TweaksConfig) -> Result<Option<TweaksConfig>> {
    let Some(caps) = marker_line_regex().captures(code) else {
        return Ok(None);
    };

    let payload = caps["payload"].trim();
    if !(payload.starts_with('{') && payload.ends_with('}')) {
        return Err(LoFieldError::CorruptTweaks {
            reason: "payload is not a JSON object".to_string(),
        });
    }

    let value: Value = serde_json::from_str(payload).map_err(|e| LoFieldError::CorruptTweaks {
        reason: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(Some(TweaksConfig::healed(&map, defaults))),
        _ => Err(LoFieldError::CorruptTweaks {
            reason: "payload is not a JSON object".to_string(),
        }),
    }
}

/// Read the TWEAKS comment, healing missing fields from `defaults`.
///
/// Absent and corrupt metadata both yield `None`.
pub fn extract_tweaks_with_defaults(code: &str, defaults: &TweaksConfig) -> Option<TweaksConfig> {
    match parse_tweaks(code, defaults) {
        Ok(tweaks) => tweaks,
        Err(e) => {
            warn!("[TWEAKS] Ignoring embedded metadata: {}", e);
            None
        }
    }
}

/// Read the TWEAKS comment using [`DEFAULT_TWEAKS`] for missing fields
pub fn extract_tweaks(code: &str) -> Option<TweaksConfig> {
    extract_tweaks_with_defaults(code, &DEFAULT_TWEAKS)
}

/// Rewrite code so its TWEAKS comment and recognised literals match `tweaks`.
///
/// Positions that do not occur in the code are left alone.
pub fn inject_tweaks(code: &str, tweaks: &TweaksConfig) -> String {
    let stripped = strip_line_regex().replace_all(code, "");
    let body = stripped.trim_start();

    let tagged = format!("{}\n{}", tweaks_to_comment(tweaks), body);
    let injected = apply_slots(&tagged, tweaks);
    debug!("[TWEAKS] Injected {:?} into {} bytes of code", tweaks, code.len());
    injected
}

/// True when the embedded tweaks are missing or differ from `tweaks`
pub fn tweaks_need_update(code: &str, tweaks: &TweaksConfig) -> bool {
    tweaks_need_update_with_defaults(code, tweaks, &DEFAULT_TWEAKS)
}

/// Like [`tweaks_need_update`], healing missing fields from `defaults`
pub fn tweaks_need_update_with_defaults(
    code: &str,
    tweaks: &TweaksConfig,
    defaults: &TweaksConfig,
) -> bool {
    match extract_tweaks_with_defaults(code, defaults) {
        Some(current) => current != *tweaks,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "Tone.Transport.bpm.value = 100;\n\
        Tone.Transport.swing = 0.2;\n\
        const filter = new Tone.Filter(3000, 'lowpass');\n\
        const reverb = new Tone.Reverb({ decay: 2, wet: 0.4 });\n\
        const delay = new Tone.FeedbackDelay('8n', 0.3);\n\
        delay.wet.value = 0.25;";

    fn tweaks() -> TweaksConfig {
        TweaksConfig {
            bpm: 88,
            swing: 15,
            filter: 900,
            reverb: 70,
            delay: 33,
        }
    }

    #[test]
    fn test_comment_format() {
        let comment = tweaks_to_comment(&DEFAULT_TWEAKS);
        assert!(comment.starts_with(TWEAKS_MARKER));
        assert!(!comment.contains('\n'));
        let json: Value = serde_json::from_str(&comment[TWEAKS_MARKER.len()..]).unwrap();
        assert_eq!(json["bpm"], 120);
        assert_eq!(json["filter"], 20000);
    }

    #[test]
    fn test_extract_from_comment() {
        let code = format!("{}\nsynth.play()", tweaks_to_comment(&tweaks()));
        assert_eq!(extract_tweaks(&code), Some(tweaks()));
    }

    #[test]
    fn test_extract_tolerates_indentation() {
        let code = "  \t//TWEAKS: {\"bpm\": 140}  \nrest()";
        let extracted = extract_tweaks(code).unwrap();
        assert_eq!(extracted.bpm, 140);
        assert_eq!(extracted.filter, DEFAULT_TWEAKS.filter);
    }

    #[test]
    fn test_extract_absent() {
        assert_eq!(extract_tweaks("synth.play()"), None);
        assert!(matches!(parse_tweaks("synth.play()", &DEFAULT_TWEAKS), Ok(None)));
    }

    #[test]
    fn test_extract_corrupt() {
        assert_eq!(extract_tweaks("// TWEAKS: {not valid json"), None);
        assert_eq!(extract_tweaks("// TWEAKS: {not: valid}"), None);

        let err = parse_tweaks("// TWEAKS: {not valid json", &DEFAULT_TWEAKS).unwrap_err();
        assert_eq!(err.error_code(), "CORRUPT_TWEAKS");
        assert!(parse_tweaks("// TWEAKS: {bpm: 1}", &DEFAULT_TWEAKS).is_err());
    }

    #[test]
    fn test_marker_must_start_line() {
        assert_eq!(extract_tweaks("foo(); // TWEAKS: {\"bpm\": 99}"), None);
    }

    #[test]
    fn test_extract_with_custom_defaults() {
        let defaults = TweaksConfig {
            bpm: 70,
            ..DEFAULT_TWEAKS
        };
        let extracted = extract_tweaks_with_defaults("// TWEAKS: {}", &defaults).unwrap();
        assert_eq!(extracted, defaults);
    }

    #[test]
    fn test_inject_updates_all_slots() {
        let out = inject_tweaks(SAMPLE, &tweaks());
        let expected = format!(
            "{}\n\
            Tone.Transport.bpm.value = 88;\n\
            Tone.Transport.swing = 0.15;\n\
            const filter = new Tone.Filter(900, 'lowpass');\n\
            const reverb = new Tone.Reverb({{ decay: 2, wet: 0.70 }});\n\
            const delay = new Tone.FeedbackDelay('8n', 0.3);\n\
            delay.wet.value = 0.33;",
            tweaks_to_comment(&tweaks())
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_inject_replaces_existing_comment() {
        let once = inject_tweaks(SAMPLE, &DEFAULT_TWEAKS);
        let twice = inject_tweaks(&once, &tweaks());
        assert_eq!(twice.matches("// TWEAKS:").count(), 1);
        assert_eq!(extract_tweaks(&twice), Some(tweaks()));
    }

    #[test]
    fn test_inject_is_stable() {
        let once = inject_tweaks(SAMPLE, &tweaks());
        assert_eq!(inject_tweaks(&once, &tweaks()), once);
    }

    #[test]
    fn test_inject_without_slots_only_adds_comment() {
        let code = "const synth = new Tone.Synth().toDestination();";
        let out = inject_tweaks(code, &tweaks());
        assert_eq!(out, format!("{}\n{}", tweaks_to_comment(&tweaks()), code));
    }

    #[test]
    fn test_need_update() {
        assert!(tweaks_need_update("synth.play()", &DEFAULT_TWEAKS));

        let code = inject_tweaks(SAMPLE, &tweaks());
        assert!(!tweaks_need_update(&code, &tweaks()));

        let mut changed = tweaks();
        changed.delay = 34;
        assert!(tweaks_need_update(&code, &changed));
    }

    #[test]
    fn test_need_update_heals_with_given_defaults() {
        let defaults = TweaksConfig {
            bpm: 90,
            ..DEFAULT_TWEAKS
        };
        let code = "// TWEAKS: {\"swing\": 10}\nsynth.play()";
        let healed = extract_tweaks_with_defaults(code, &defaults).unwrap();
        assert_eq!(healed.bpm, 90);
        assert_eq!(healed.swing, 10);

        assert!(!tweaks_need_update_with_defaults(code, &healed, &defaults));
        assert!(tweaks_need_update(code, &healed));
    }
}
