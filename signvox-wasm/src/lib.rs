use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use signvox::icon::{self, DEFAULT_ALPHA_THRESHOLD};
use signvox::spec::{HangingSign, HangingWidth, IconPosition, SignKind, SignSpec, StandardSign};
use signvox::text::BitmapFont;

// ── Tsify types for TypeScript interface generation ──

/// Sign parameters passed from JavaScript.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmSignSpec {
    /// "standard" or "hanging".
    pub sign_type: String,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default = "default_true")]
    pub frame: bool,
    #[serde(default = "default_frame_width")]
    pub frame_width: u32,
    /// 48, 64 or 80.
    #[serde(default = "default_hanging_width")]
    pub hanging_width: u32,
    /// "left" or "right".
    #[serde(default)]
    pub icon_position: Option<String>,
    #[serde(default = "default_thickness")]
    pub thickness: u32,
    #[serde(default)]
    pub icon_offset_x: i32,
    #[serde(default)]
    pub text_offset_x: i32,
    #[serde(default)]
    pub text: String,
    /// Icon scale in percent (default: 100).
    #[serde(default = "default_icon_scale")]
    pub icon_scale: u32,
    #[serde(default)]
    pub icon_offset_y: i32,
    #[serde(default)]
    pub text_offset_y: i32,
    #[serde(default = "default_true")]
    pub with_icon: bool,
}

fn default_size() -> u32 {
    48
}

fn default_true() -> bool {
    true
}

fn default_frame_width() -> u32 {
    2
}

fn default_hanging_width() -> u32 {
    64
}

fn default_thickness() -> u32 {
    2
}

fn default_icon_scale() -> u32 {
    100
}

/// A generated sign returned to JavaScript.
#[derive(Tsify, Serialize, Deserialize)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmSignModel {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub total_voxels: usize,
    /// Extents in .vox axis order (z up).
    pub size: [u32; 3],
    /// The encoded .vox file.
    #[serde(with = "serde_bytes_array")]
    #[tsify(type = "Uint8Array")]
    pub payload: Vec<u8>,
}

/// Serialize the payload as a typed array rather than a plain JS array.
mod serde_bytes_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(bytes)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        Vec::<u8>::deserialize(d)
    }
}

/// Generate a sign, optionally with an RGBA icon (4 bytes per pixel).
#[wasm_bindgen(js_name = "generateSign")]
pub fn generate_sign(
    spec: WasmSignSpec,
    icon_rgba: Option<Vec<u8>>,
    icon_width: Option<u32>,
    icon_height: Option<u32>,
) -> Result<JsValue, JsError> {
    let mut core_spec = spec_from_wasm(&spec)?;

    if let Some(rgba) = icon_rgba {
        let (w, h) = match (icon_width, icon_height) {
            (Some(w), Some(h)) => (w as usize, h as usize),
            _ => return Err(JsError::new("icon data requires iconWidth and iconHeight")),
        };
        let bitmap = icon::bitmap_from_rgba(&rgba, w, h, spec.icon_scale, DEFAULT_ALPHA_THRESHOLD)
            .map_err(|e| JsError::new(&e.to_string()))?;
        core_spec.icon = Some(bitmap);
    }

    let model =
        signvox::generate(&core_spec, &BitmapFont).map_err(|e| JsError::new(&e.to_string()))?;

    let result = WasmSignModel {
        label: model.label,
        width: model.width,
        height: model.height,
        depth: model.depth,
        total_voxels: model.total_voxels,
        size: model.size,
        payload: model.payload,
    };

    serde_wasm_bindgen::to_value(&result).map_err(|e| JsError::new(&e.to_string()))
}

fn spec_from_wasm(spec: &WasmSignSpec) -> Result<SignSpec, JsError> {
    let sign = match spec.sign_type.as_str() {
        "standard" => SignKind::Standard(StandardSign {
            width: spec.width,
            height: spec.height,
            frame: spec.frame,
            frame_width: spec.frame_width,
        }),
        "hanging" => {
            let width = HangingWidth::try_from(spec.hanging_width)
                .map_err(|e| JsError::new(&e.to_string()))?;
            let icon_position = match spec.icon_position.as_deref() {
                None | Some("left") => IconPosition::Left,
                Some("right") => IconPosition::Right,
                Some(other) => {
                    return Err(JsError::new(&format!("unknown icon position: {other}")))
                }
            };
            SignKind::Hanging(HangingSign {
                width,
                icon_position,
                thickness: spec.thickness,
                icon_offset_x: spec.icon_offset_x,
                text_offset_x: spec.text_offset_x,
            })
        }
        other => return Err(JsError::new(&format!("unknown sign type: {other}"))),
    };

    Ok(SignSpec {
        sign,
        icon: None,
        text: spec.text.clone(),
        icon_scale: spec.icon_scale,
        icon_offset_y: spec.icon_offset_y,
        text_offset_y: spec.text_offset_y,
        with_icon: spec.with_icon,
    })
}
