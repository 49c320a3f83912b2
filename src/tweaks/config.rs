//! Tweak values
//!
//! The five performance parameters exposed as sliders and mirrored into
//! generated code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical fallback values used to heal partial metadata
pub const DEFAULT_TWEAKS: TweaksConfig = TweaksConfig {
    bpm: 120,
    swing: 0,
    filter: 20000,
    reverb: 0,
    delay: 0,
};

/// Names one tweak parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweakKind {
    /// Tempo in BPM
    Tempo,
    /// Swing amount, percent
    Swing,
    /// Lowpass cutoff, Hz
    Filter,
    /// Reverb wet mix, percent
    ReverbWet,
    /// Delay wet mix, percent
    DelayWet,
}

impl TweakKind {
    pub const ALL: [TweakKind; 5] = [
        TweakKind::Tempo,
        TweakKind::Swing,
        TweakKind::Filter,
        TweakKind::ReverbWet,
        TweakKind::DelayWet,
    ];

    /// JSON key used in the TWEAKS comment
    pub fn key(self) -> &'static str {
        match self {
            TweakKind::Tempo => "bpm",
            TweakKind::Swing => "swing",
            TweakKind::Filter => "filter",
            TweakKind::ReverbWet => "reverb",
            TweakKind::DelayWet => "delay",
        }
    }
}

impl std::fmt::Display for TweakKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TweakKind::Tempo => write!(f, "Tempo"),
            TweakKind::Swing => write!(f, "Swing"),
            TweakKind::Filter => write!(f, "Filter"),
            TweakKind::ReverbWet => write!(f, "Reverb"),
            TweakKind::DelayWet => write!(f, "Delay"),
        }
    }
}

/// Full set of tweak values for one composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweaksConfig {
    /// Tempo, beats per minute
    pub bpm: u32,
    /// Swing, percent 0-100
    pub swing: u32,
    /// Lowpass cutoff, Hz
    pub filter: u32,
    /// Reverb wet mix, percent 0-100
    pub reverb: u32,
    /// Delay wet mix, percent 0-100
    pub delay: u32,
}

impl Default for TweaksConfig {
    fn default() -> Self {
        DEFAULT_TWEAKS
    }
}

impl TweaksConfig {
    pub fn get(&self, kind: TweakKind) -> u32 {
        match kind {
            TweakKind::Tempo => self.bpm,
            TweakKind::Swing => self.swing,
            TweakKind::Filter => self.filter,
            TweakKind::ReverbWet => self.reverb,
            TweakKind::DelayWet => self.delay,
        }
    }

    pub fn set(&mut self, kind: TweakKind, value: u32) {
        match kind {
            TweakKind::Tempo => self.bpm = value,
            TweakKind::Swing => self.swing = value,
            TweakKind::Filter => self.filter = value,
            TweakKind::ReverbWet => self.reverb = value,
            TweakKind::DelayWet => self.delay = value,
        }
    }

    /// Build from a parsed JSON object, filling each missing or
    /// non-numeric field from `defaults`.
    pub fn healed(map: &Map<String, Value>, defaults: &TweaksConfig) -> Self {
        let mut config = *defaults;
        for kind in TweakKind::ALL {
            if let Some(value) = map.get(kind.key()).and_then(numeric_value) {
                config.set(kind, value);
            }
        }
        config
    }

    /// Parameters whose values differ from `other`
    pub fn diff(&self, other: &TweaksConfig) -> Vec<TweakKind> {
        TweakKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind) != other.get(*kind))
            .collect()
    }

    /// Percent value scaled to a 0-1 fraction, two decimals
    pub fn fraction(percent: u32) -> String {
        format!("{:.2}", f64::from(percent) / 100.0)
    }
}

/// Non-negative finite JSON numbers, rounded to the nearest integer
fn numeric_value(value: &Value) -> Option<u32> {
    let n = value.as_f64()?;
    if !n.is_finite() || n < 0.0 {
        return None;
    }
    Some(n.round().min(f64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_heal_missing_fields() {
        let map = object(json!({ "bpm": 90 }));
        let config = TweaksConfig::healed(&map, &DEFAULT_TWEAKS);
        assert_eq!(config.bpm, 90);
        assert_eq!(config.filter, DEFAULT_TWEAKS.filter);
        assert_eq!(config.swing, DEFAULT_TWEAKS.swing);
    }

    #[test]
    fn test_heal_non_numeric_fields() {
        let map = object(json!({ "bpm": "fast", "swing": null, "reverb": 40, "delay": -3 }));
        let config = TweaksConfig::healed(&map, &DEFAULT_TWEAKS);
        assert_eq!(config.bpm, 120);
        assert_eq!(config.swing, 0);
        assert_eq!(config.reverb, 40);
        assert_eq!(config.delay, 0);
    }

    #[test]
    fn test_heal_with_custom_defaults() {
        let defaults = TweaksConfig {
            bpm: 85,
            swing: 30,
            filter: 1800,
            reverb: 25,
            delay: 10,
        };
        let config = TweaksConfig::healed(&Map::new(), &defaults);
        assert_eq!(config, defaults);
    }

    #[test]
    fn test_heal_rounds_fractional_numbers() {
        let map = object(json!({ "bpm": 92.6 }));
        assert_eq!(TweaksConfig::healed(&map, &DEFAULT_TWEAKS).bpm, 93);
    }

    #[test]
    fn test_diff() {
        let mut other = DEFAULT_TWEAKS;
        other.filter = 800;
        other.delay = 20;
        assert_eq!(
            DEFAULT_TWEAKS.diff(&other),
            vec![TweakKind::Filter, TweakKind::DelayWet]
        );
        assert!(DEFAULT_TWEAKS.diff(&DEFAULT_TWEAKS).is_empty());
    }

    #[test]
    fn test_fraction() {
        assert_eq!(TweaksConfig::fraction(0), "0.00");
        assert_eq!(TweaksConfig::fraction(35), "0.35");
        assert_eq!(TweaksConfig::fraction(100), "1.00");
    }
}
