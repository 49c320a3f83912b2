//! CLI Module
//!
//! Command-line interface for the LoField composition engine.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::tweaks::TweaksConfig;

/// LoField - combine layers and sync tweaks in generated Tone.js code
#[derive(Parser, Debug)]
#[command(name = "lofield")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-parameter overrides; unset fields keep their current value
#[derive(Args, Debug, Clone, Default)]
pub struct TweakOverrides {
    /// Tempo in BPM
    #[arg(long)]
    pub bpm: Option<u32>,

    /// Swing percent (0-100)
    #[arg(long)]
    pub swing: Option<u32>,

    /// Lowpass cutoff in Hz
    #[arg(long)]
    pub filter: Option<u32>,

    /// Reverb wet percent (0-100)
    #[arg(long)]
    pub reverb: Option<u32>,

    /// Delay wet percent (0-100)
    #[arg(long)]
    pub delay: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Combine a JSON array of layers into one program
    #[command(name = "combine")]
    Combine {
        /// Layers file (JSON array)
        layers: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List layer names found in combined code
    #[command(name = "layer-names")]
    LayerNames {
        /// Combined code file
        code: PathBuf,
    },

    /// Print the tweaks embedded in a code file
    #[command(name = "extract-tweaks")]
    ExtractTweaks {
        /// Code file
        code: PathBuf,
    },

    /// Write tweaks into a code file
    #[command(name = "inject-tweaks")]
    InjectTweaks {
        /// Code file
        code: PathBuf,

        #[command(flatten)]
        overrides: TweakOverrides,

        /// Write output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report whether a code file's tweaks differ from the given values
    #[command(name = "check-tweaks")]
    CheckTweaks {
        /// Code file
        code: PathBuf,

        #[command(flatten)]
        overrides: TweakOverrides,
    },

    /// Convert a layer volume percentage to dB
    #[command(name = "volume-db")]
    VolumeDb {
        /// Volume percent
        #[arg(allow_hyphen_values = true)]
        percent: i32,
    },

    /// Generate a share token
    #[command(name = "share-token")]
    ShareToken {
        /// Token length (defaults to the configured length)
        #[arg(short, long)]
        length: Option<usize>,
    },
}

impl TweakOverrides {
    /// Apply the set overrides on top of `base`
    pub fn apply(&self, base: TweaksConfig) -> TweaksConfig {
        TweaksConfig {
            bpm: self.bpm.unwrap_or(base.bpm),
            swing: self.swing.unwrap_or(base.swing),
            filter: self.filter.unwrap_or(base.filter),
            reverb: self.reverb.unwrap_or(base.reverb),
            delay: self.delay.unwrap_or(base.delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweaks::DEFAULT_TWEAKS;

    #[test]
    fn test_overrides_apply() {
        let overrides = TweakOverrides {
            bpm: Some(140),
            reverb: Some(30),
            ..Default::default()
        };
        let result = overrides.apply(DEFAULT_TWEAKS);
        assert_eq!(result.bpm, 140);
        assert_eq!(result.reverb, 30);
        assert_eq!(result.filter, DEFAULT_TWEAKS.filter);
    }

    #[test]
    fn test_parse_inject_command() {
        let cli = Cli::parse_from([
            "lofield",
            "inject-tweaks",
            "track.js",
            "--bpm",
            "100",
            "--delay",
            "25",
        ]);
        match cli.command {
            Some(Commands::InjectTweaks { overrides, .. }) => {
                assert_eq!(overrides.bpm, Some(100));
                assert_eq!(overrides.delay, Some(25));
                assert_eq!(overrides.swing, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_volume() {
        let cli = Cli::parse_from(["lofield", "volume-db", "-5"]);
        assert!(matches!(cli.command, Some(Commands::VolumeDb { percent: -5 })));
    }
}
