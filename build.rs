//! Build script for ratio preset validation
//!
//! This script runs at compile time, validates every preset JSON file under
//! `presets/` against the shared field bounds, and generates the `Preset`
//! enum that embeds them.

// Include the shared ratio bounds
#[path = "src/ratio_bounds.rs"]
mod ratio_bounds;

use heck::ToUpperCamelCase;
use ratio_bounds::{ALL_BOUNDS, FieldBounds};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Validate one preset record against the field bounds
fn validate_preset(record: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    for key in record.keys() {
        if !ALL_BOUNDS.iter().any(|b| b.key == key.as_str()) {
            errors.push(format!("  unknown key '{}'", key));
        }
    }

    let value_of = |bounds: &FieldBounds| -> f32 {
        record
            .get(bounds.key)
            .and_then(Value::as_f64)
            .map_or(bounds.default, |v| v as f32)
    };

    for bounds in ALL_BOUNDS.iter() {
        if let Some(raw) = record.get(bounds.key) {
            if !raw.is_number() {
                errors.push(format!("  {}: expected a number, got {}", bounds.key, raw));
                continue;
            }
        }
        let value = value_of(bounds);
        if !bounds.contains(value) {
            let open = if bounds.min_exclusive { '(' } else { '[' };
            errors.push(format!(
                "  {}: {} outside {}{}, {}]",
                bounds.key, value, open, bounds.min, bounds.max
            ));
        }
    }

    // Presets must give a well-formed body, not just in-range numbers
    let height = value_of(&ratio_bounds::HEIGHT);
    let heads = value_of(&ratio_bounds::HEADS);
    let neck = value_of(&ratio_bounds::NECK_LENGTH);
    let crotch = value_of(&ratio_bounds::CROTCH_HEIGHT);
    let ankle = value_of(&ratio_bounds::ANKLE_HEIGHT);
    let head_size = height / heads;
    let shoulder = head_size * (heads - 1.0) - head_size * neck;
    if shoulder <= crotch {
        errors.push(format!(
            "  shoulders ({:.3}m) must sit above the crotch ({:.3}m)",
            shoulder, crotch
        ));
    }
    if crotch <= ankle {
        errors.push(format!(
            "  crotch ({:.3}m) must sit above the ankle ({:.3}m)",
            crotch, ankle
        ));
    }

    errors
}

/// Validate a preset file, returning its name on success
fn validate_preset_file(path: &Path) -> Result<String, String> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Bad preset file name: {}", path.display()))?
        .to_string();

    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let record: Map<String, Value> = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let errors = validate_preset(&record);
    if errors.is_empty() {
        println!("cargo:warning=✓ preset '{}' validated", name);
        Ok(name)
    } else {
        Err(format!(
            "Preset '{}' has invalid ratios:\n{}",
            name,
            errors.join("\n")
        ))
    }
}

/// Render the `Preset` enum for the validated preset files
fn generate(presets: &[(String, PathBuf)]) -> String {
    let mut variants = String::new();
    let mut all = String::new();
    let mut names = String::new();
    let mut jsons = String::new();

    for (name, path) in presets {
        let variant = name.to_upper_camel_case();
        variants.push_str(&format!("    {},\n", variant));
        all.push_str(&format!("        Preset::{},\n", variant));
        names.push_str(&format!("            Preset::{} => {:?},\n", variant, name));
        jsons.push_str(&format!(
            "            Preset::{} => include_str!({:?}),\n",
            variant,
            path.display().to_string()
        ));
    }

    format!(
        "/// Ratio presets bundled with the crate\n\
         #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n\
         pub enum Preset {{\n{variants}}}\n\n\
         impl Preset {{\n\
         \x20   pub const COUNT: usize = {count};\n\n\
         \x20   pub const ALL: [Preset; {count}] = [\n{all}    ];\n\n\
         \x20   /// File stem of the preset\n\
         \x20   pub fn name(self) -> &'static str {{\n\
         \x20       match self {{\n{names}        }}\n\
         \x20   }}\n\n\
         \x20   /// Embedded JSON record\n\
         \x20   pub fn json(self) -> &'static str {{\n\
         \x20       match self {{\n{jsons}        }}\n\
         \x20   }}\n\
         }}\n",
        count = presets.len(),
    )
}

fn main() {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let preset_dir = manifest_dir.join("presets");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Rerun if shared bounds or any preset change
    println!("cargo:rerun-if-changed=src/ratio_bounds.rs");
    println!("cargo:rerun-if-changed={}", preset_dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(&preset_dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect()
        })
        .unwrap_or_default();
    // Stable variant order regardless of directory listing order
    paths.sort();

    if paths.is_empty() {
        println!("cargo:warning=No presets found in {}", preset_dir.display());
    }

    let mut has_errors = false;
    let mut presets = Vec::new();
    for path in paths {
        println!("cargo:rerun-if-changed={}", path.display());
        match validate_preset_file(&path) {
            Ok(name) => presets.push((name, path)),
            Err(e) => {
                println!("cargo:warning=VALIDATION ERROR: {}", e);
                has_errors = true;
            }
        }
    }

    if has_errors {
        panic!("Preset validation failed! Fix the ratios in the preset files.");
    }

    fs::write(out_dir.join("presets.rs"), generate(&presets))
        .expect("failed to write generated presets");
}
