//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use log::{info, warn};

use super::TweakOverrides;
use crate::config::EngineConfig;
use crate::error::{LoFieldError, Result};
use crate::layers::{combine_layers, extract_layer_names, volume_to_db, AudioLayer};
use crate::share::{generate_share_token_with, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};
use crate::tweaks::{
    extract_tweaks_with_defaults, inject_tweaks, parse_tweaks, recognized_slots,
    tweaks_need_update_with_defaults, TweaksConfig,
};

/// Read a text file, mapping a missing path to `FileNotFound`
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(LoFieldError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| LoFieldError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write to `output` if given, else print to stdout
fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|e| LoFieldError::FileWriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Current tweaks of `code`, or the configured defaults, with overrides applied
fn target_tweaks(config: &EngineConfig, code: &str, overrides: &TweakOverrides) -> TweaksConfig {
    let defaults = config.default_tweaks;
    let current = extract_tweaks_with_defaults(code, &defaults).unwrap_or(defaults);
    overrides.apply(current)
}

/// Combine a layers file into one program.
pub fn combine(layers_path: &Path, output: Option<&Path>) -> Result<()> {
    info!("Combining layers from: {}", layers_path.display());

    let layers: Vec<AudioLayer> = serde_json::from_str(&read_text(layers_path)?)?;
    let combined = combine_layers(&layers);
    if combined.is_empty() {
        warn!("No layer contributed any code");
    }

    emit(output, &combined)
}

/// List layer names found in combined code.
pub fn layer_names(code_path: &Path) -> Result<()> {
    let names = extract_layer_names(&read_text(code_path)?);

    if names.is_empty() {
        println!("No layer headers found.");
        return Ok(());
    }
    for (i, name) in names.iter().enumerate() {
        println!("{:>3}: {}", i + 1, name);
    }
    Ok(())
}

/// Print embedded tweaks, reporting corrupt metadata separately.
pub fn extract_tweaks(config: &EngineConfig, code_path: &Path) -> Result<()> {
    let code = read_text(code_path)?;

    match parse_tweaks(&code, &config.default_tweaks) {
        Ok(Some(tweaks)) => println!("{}", serde_json::to_string_pretty(&tweaks)?),
        Ok(None) => println!("No tweaks embedded."),
        Err(e) => {
            warn!("{}", e);
            println!("{}", e);
            for suggestion in e.recovery_suggestions() {
                println!("  - {}", suggestion);
            }
        }
    }

    let slots = recognized_slots(&code);
    if !slots.is_empty() {
        let names: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        println!("Recognized parameters: {}", names.join(", "));
    }
    Ok(())
}

/// Write tweaks into a code file.
pub fn inject(
    config: &EngineConfig,
    code_path: &Path,
    overrides: &TweakOverrides,
    output: Option<&Path>,
) -> Result<()> {
    info!("Injecting tweaks into: {}", code_path.display());

    let code = read_text(code_path)?;
    let tweaks = target_tweaks(config, &code, overrides);

    emit(output, &inject_tweaks(&code, &tweaks))
}

/// Report whether a code file needs its tweaks rewritten.
pub fn check(config: &EngineConfig, code_path: &Path, overrides: &TweakOverrides) -> Result<()> {
    let code = read_text(code_path)?;
    let tweaks = target_tweaks(config, &code, overrides);

    if !tweaks_need_update_with_defaults(&code, &tweaks, &config.default_tweaks) {
        println!("Tweaks up to date.");
        return Ok(());
    }

    match extract_tweaks_with_defaults(&code, &config.default_tweaks) {
        Some(current) => {
            println!("Tweaks need update:");
            for kind in current.diff(&tweaks) {
                println!("  {}: {} -> {}", kind, current.get(kind), tweaks.get(kind));
            }
        }
        None => println!("Tweaks need update: no valid TWEAKS comment."),
    }
    Ok(())
}

/// Print the dB value for a volume percentage.
pub fn volume_db(percent: i32) -> Result<()> {
    println!("{}% = {:.2} dB", percent, volume_to_db(percent));
    Ok(())
}

/// Generate and print a share token.
pub fn share_token(config: &EngineConfig, length: Option<usize>) -> Result<()> {
    let len = length.unwrap_or(config.share.token_length);
    if !(MIN_TOKEN_LENGTH..=MAX_TOKEN_LENGTH).contains(&len) {
        return Err(LoFieldError::InvalidConfig {
            reason: format!(
                "token length must be between {} and {}, got {}",
                MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH, len
            ),
        });
    }

    println!("{}", generate_share_token_with(&mut rand::thread_rng(), len));
    Ok(())
}
