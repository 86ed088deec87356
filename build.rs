//! Build script for scene preset validation
//!
//! This script runs at compile time and validates all preset JSON files
//! against the same limits the runtime config loader enforces.

// Include the shared scene limits
#[path = "src/scene_limits.rs"]
mod scene_limits;

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scene preset from JSON (only the fields worth checking early)
#[derive(Debug, Deserialize)]
struct Preset {
    name: String,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    particle_count: Option<usize>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    point_size: Option<f32>,
    #[serde(default)]
    smoothing: Option<f32>,
}

/// Validate a single preset against the shared limits
fn validate_preset(preset: &Preset) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(shape) = &preset.shape {
        // Same matching as the runtime loader: case and separators ignored
        if scene_limits::shape_index(shape).is_none() {
            errors.push(format!(
                "  unknown shape '{}' (expected one of {})",
                shape,
                scene_limits::SHAPE_NAMES.join(", ")
            ));
        }
    }

    if let Some(count) = preset.particle_count {
        if !scene_limits::is_valid_particle_count(count) {
            errors.push(format!(
                "  particle_count {} outside 1..={}",
                count,
                scene_limits::MAX_PARTICLES
            ));
        }
    }

    if let Some(color) = &preset.color {
        if !scene_limits::is_hex_color(color) {
            errors.push(format!("  color '{}' is not #rrggbb", color));
        }
    }

    if let Some(size) = preset.point_size {
        if !scene_limits::is_valid_point_size(size) {
            errors.push(format!("  point_size {} must be positive", size));
        }
    }

    if let Some(smoothing) = preset.smoothing {
        if !scene_limits::is_valid_smoothing(smoothing) {
            errors.push(format!("  smoothing {} outside (0, 1]", smoothing));
        }
    }

    errors
}

/// Validate a preset file
fn validate_preset_file(path: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let preset: Preset = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let errors = validate_preset(&preset);
    if errors.is_empty() {
        println!("cargo:warning=✓ preset {} validated", preset.name);
        Ok(())
    } else {
        Err(format!(
            "Preset '{}' is invalid:\n{}",
            preset.name,
            errors.join("\n")
        ))
    }
}

fn main() {
    let preset_dir = Path::new("presets");

    // Rerun if shared limits change
    println!("cargo:rerun-if-changed=src/scene_limits.rs");

    if !preset_dir.exists() {
        println!("cargo:warning=Preset directory not found, skipping validation");
        return;
    }

    let mut has_errors = false;

    if let Ok(entries) = fs::read_dir(preset_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                println!("cargo:rerun-if-changed={}", path.display());

                if let Err(e) = validate_preset_file(&path) {
                    println!("cargo:warning=VALIDATION ERROR: {}", e);
                    has_errors = true;
                }
            }
        }
    }

    if has_errors {
        panic!("Preset validation failed! Fix the scene preset files.");
    }

    println!("cargo:rerun-if-changed={}", preset_dir.display());
}
