//! Browser bindings: a thin `#[wasm_bindgen]` wrapper around `RigSession`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::RigError;
use crate::preset::Preset;
use crate::ratio::{RatioField, RatioParameters, Unit};
use crate::session::RigSession;

/// Install the panic hook and console logger once the module loads
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js(err: RigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Property panel description of one ratio field
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldInfo {
    key: &'static str,
    label: &'static str,
    default: f32,
    min: f32,
    max: f32,
    min_exclusive: bool,
    soft_min: Option<f32>,
    soft_max: Option<f32>,
    step: f32,
    precision: u8,
    is_length: bool,
}

impl From<RatioField> for FieldInfo {
    fn from(field: RatioField) -> Self {
        let bounds = field.bounds();
        let soft = field.soft_range();
        Self {
            key: field.key(),
            label: field.label(),
            default: bounds.default,
            min: bounds.min,
            max: bounds.max,
            min_exclusive: bounds.min_exclusive,
            soft_min: soft.map(|(min, _)| min),
            soft_max: soft.map(|(_, max)| max),
            step: field.step(),
            precision: field.precision(),
            is_length: field.unit() == Unit::Length,
        }
    }
}

/// Metadata for every ratio field, in panel order
#[wasm_bindgen]
pub fn ratio_fields() -> Result<JsValue, JsValue> {
    let fields: Vec<FieldInfo> = RatioField::ALL.into_iter().map(FieldInfo::from).collect();
    serde_wasm_bindgen::to_value(&fields).map_err(Into::into)
}

/// Names of the bundled presets
#[wasm_bindgen]
pub fn preset_names() -> Vec<String> {
    Preset::ALL.iter().map(|p| p.name().to_string()).collect()
}

/// A humanoid rig being edited in the browser
#[wasm_bindgen]
pub struct RigEditor {
    session: RigSession,
}

#[wasm_bindgen]
impl RigEditor {
    /// Create and shape a "human" rig from a JSON config record
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<RigEditor, JsValue> {
        let session = RigSession::create_human(config_json).map_err(to_js)?;
        Ok(RigEditor { session })
    }

    pub fn delete_bones(&mut self) -> Result<(), JsValue> {
        self.session.delete_bones().map_err(to_js)
    }

    pub fn create_bones(&mut self) -> Result<(), JsValue> {
        self.session.create_bones().map_err(to_js)
    }

    pub fn has_bones(&self) -> bool {
        self.session.has_topology()
    }

    /// Set one field by key or label; the rig follows immediately
    pub fn set_field(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.session.set_field(name, value).map_err(to_js)
    }

    /// Current parameters as a plain JS object
    pub fn params(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.params()).map_err(Into::into)
    }

    /// Replace all parameters from a plain JS object; missing keys take defaults
    pub fn set_params(&mut self, params: JsValue) -> Result<(), JsValue> {
        let params: RatioParameters = serde_wasm_bindgen::from_value(params)?;
        self.session.set_params(params).map_err(to_js)
    }

    pub fn load_config(&mut self, json: &str) -> Result<(), JsValue> {
        self.session.load_config_json(json).map_err(to_js)
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        self.session.config_json().map_err(to_js)
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.apply_preset(name).map_err(to_js)
    }

    /// Derived lengths for the current parameters
    pub fn measures(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.measures()).map_err(Into::into)
    }

    /// Bones as an array of `{ name, parent, connected, head, tail }`
    pub fn bones(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot()).map_err(Into::into)
    }

    pub fn bones_json(&self) -> Result<String, JsValue> {
        self.session.snapshot_json().map_err(to_js)
    }
}
