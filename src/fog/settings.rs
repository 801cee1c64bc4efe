use crate::fog::composite::Rgba;
use crate::fog::store::FOG_STORAGE_KEY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VEIL_OPACITY: f32 = 0.55;
pub const DEFAULT_BRUSH_RADIUS: f64 = 40.0;
/// Roughly what a browser grants local storage per origin.
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FogColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FogColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Modifier that turns a mouse or pen gesture into an erase gesture.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EraseModifier {
    None,
    #[default]
    Shift,
    Alt,
    Ctrl,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FogSettings {
    #[serde(default = "default_veil_color")]
    pub veil_color: FogColor,
    /// Opacity of unexplored areas, 0.0 to 1.0.
    #[serde(default = "default_veil_opacity")]
    pub veil_opacity: f32,
    /// Brush radius in image pixels.
    #[serde(default = "default_brush_radius")]
    pub brush_radius: f64,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub erase_modifier: EraseModifier,
    /// A second simultaneous touch point starts an erase gesture.
    #[serde(default = "default_multi_touch_erases")]
    pub multi_touch_erases: bool,
    #[serde(default = "default_storage_quota_bytes")]
    pub storage_quota_bytes: Option<usize>,
    /// When enabled the logger is initialised at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            veil_color: default_veil_color(),
            veil_opacity: default_veil_opacity(),
            brush_radius: default_brush_radius(),
            storage_key: default_storage_key(),
            erase_modifier: EraseModifier::default(),
            multi_touch_erases: default_multi_touch_erases(),
            storage_quota_bytes: default_storage_quota_bytes(),
            debug_logging: false,
        }
    }
}

impl FogSettings {
    pub fn sanitize(&mut self) {
        self.veil_opacity = if self.veil_opacity.is_finite() {
            self.veil_opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_VEIL_OPACITY
        };
        if !self.brush_radius.is_finite() || self.brush_radius <= 0.0 {
            self.brush_radius = DEFAULT_BRUSH_RADIUS;
        }
        if self.storage_key.trim().is_empty() {
            self.storage_key = default_storage_key();
        }
    }

    pub fn veil_rgba(&self) -> Rgba {
        let alpha = (self.veil_opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba::rgba(self.veil_color.r, self.veil_color.g, self.veil_color.b, alpha)
    }
}

fn default_veil_color() -> FogColor {
    FogColor::rgb(0, 0, 0)
}

fn default_veil_opacity() -> f32 {
    DEFAULT_VEIL_OPACITY
}

fn default_brush_radius() -> f64 {
    DEFAULT_BRUSH_RADIUS
}

fn default_storage_key() -> String {
    FOG_STORAGE_KEY.to_string()
}

fn default_multi_touch_erases() -> bool {
    true
}

fn default_storage_quota_bytes() -> Option<usize> {
    Some(DEFAULT_STORAGE_QUOTA_BYTES)
}
