//! Colormaps and the lookup tables built from them.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::error::{MeshplotError, Result};

/// Hue at the low end of the default hue ramp (blue).
pub const HUE_BLUE: f32 = 0.666_67;
/// Hue at the high end of the default hue ramp (red).
pub const HUE_RED: f32 = 0.0;

/// A named gradient over `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub name: String,
    /// Control points, evenly spaced.
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a gradient from evenly spaced control points.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Linearly interpolates between control points; `t` is clamped to `[0, 1]`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample(&self, t: f32) -> Vec3 {
        match self.colors.as_slice() {
            [] => Vec3::ZERO,
            [only] => *only,
            colors => {
                let segments = colors.len() - 1;
                let pos = t.clamp(0.0, 1.0) * segments as f32;
                let lower = (pos as usize).min(segments - 1);
                colors[lower].lerp(colors[lower + 1], pos - lower as f32)
            }
        }
    }

    /// Returns a copy with the color order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            name: format!("{}_r", self.name),
            colors: self.colors.iter().rev().copied().collect(),
        }
    }
}

/// Named colormaps available to scalar binding.
#[derive(Debug, Clone, Default)]
pub struct ColorMapRegistry {
    maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a registry holding the built-in colormaps.
    pub fn new() -> Self {
        let mut maps = Self::default();
        maps.add_builtin();
        maps
    }

    fn add_builtin(&mut self) {
        self.register(ColorMap::new(
            "jet",
            vec![
                Vec3::new(0.0, 0.0, 0.5),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.5, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.5, 1.0, 0.5),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.5, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
            ],
        ));

        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        self.register(ColorMap::new(
            "coolwarm",
            vec![
                Vec3::new(0.230, 0.299, 0.754),
                Vec3::new(0.552, 0.690, 0.996),
                Vec3::new(0.866, 0.866, 0.866),
                Vec3::new(0.956, 0.604, 0.486),
                Vec3::new(0.706, 0.016, 0.150),
            ],
        ));

        self.register(ColorMap::new(
            "blues",
            vec![
                Vec3::new(0.969, 0.984, 1.000),
                Vec3::new(0.776, 0.859, 0.937),
                Vec3::new(0.419, 0.682, 0.839),
                Vec3::new(0.129, 0.443, 0.710),
                Vec3::new(0.031, 0.188, 0.420),
            ],
        ));

        self.register(ColorMap::new(
            "reds",
            vec![
                Vec3::new(1.000, 0.961, 0.941),
                Vec3::new(0.988, 0.733, 0.631),
                Vec3::new(0.984, 0.416, 0.290),
                Vec3::new(0.796, 0.094, 0.114),
                Vec3::new(0.404, 0.000, 0.051),
            ],
        ));

        self.register(ColorMap::new(
            "hot",
            vec![
                Vec3::new(0.04, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
            ],
        ));

        self.register(ColorMap::new("gray", vec![Vec3::ZERO, Vec3::ONE]));
        self.register(ColorMap::new("grey", vec![Vec3::ZERO, Vec3::ONE]));

        self.register(ColorMap::new(
            "rainbow",
            vec![
                Vec3::new(0.5, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
        ));
    }

    /// Adds a colormap, replacing one with the same name.
    pub fn register(&mut self, map: ColorMap) {
        self.maps.insert(map.name.clone(), map);
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.maps.get(name)
    }

    /// Looks up a color map, accepting any letter case and a `_r` suffix for
    /// the reversed map.
    pub fn resolve(&self, name: &str) -> Result<ColorMap> {
        let lower = name.to_lowercase();
        if let Some(map) = self.get(name).or_else(|| self.get(&lower)) {
            return Ok(map.clone());
        }
        lower
            .strip_suffix("_r")
            .and_then(|base| self.get(base))
            .map(ColorMap::reversed)
            .ok_or_else(|| MeshplotError::UnknownColorMap(name.to_string()))
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }
}

/// An 8-bit RGBA lookup table entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Creates an entry.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts a `[0, 1]` color, truncating each channel after scaling by 255.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unit(color: Vec4) -> Self {
        let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).to_array();
        Self::new(c[0] as u8, c[1] as u8, c[2] as u8, c[3] as u8)
    }

    /// Converts a `[0, 1]` color, rounding each channel to the nearest value.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unit_rounded(color: Vec4) -> Self {
        let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0 + 0.5).to_array();
        Self::new(c[0] as u8, c[1] as u8, c[2] as u8, c[3] as u8)
    }
}

/// Converts hue/saturation/value in `[0, 1]` to RGB.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = (h.clamp(0.0, 1.0) * 6.0) % 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

/// Ordered RGBA colors that a mapper indexes with normalized scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    colors: Vec<Rgba8>,
    nan_color: Vec4,
}

impl LookupTable {
    /// Samples `n_colors` evenly spaced colors over `[0, 1]` through `map`.
    ///
    /// The sample order is reversed when `flip` is set.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_color_map(map: &ColorMap, n_colors: usize, flip: bool) -> Self {
        let mut colors: Vec<Rgba8> = linspace(n_colors)
            .map(|t| Rgba8::from_unit(map.sample(t).extend(1.0)))
            .collect();
        if flip {
            colors.reverse();
        }
        Self {
            colors,
            nan_color: Vec4::new(0.5, 0.0, 0.0, 1.0),
        }
    }

    /// Builds a ramp between two hues at full saturation and value.
    pub fn hue_ramp(hue_start: f32, hue_end: f32, n_colors: usize) -> Self {
        let colors = linspace(n_colors)
            .map(|t| {
                let hue = hue_start + (hue_end - hue_start) * t;
                Rgba8::from_unit_rounded(hsv_to_rgb(hue, 1.0, 1.0).extend(1.0))
            })
            .collect();
        Self {
            colors,
            nan_color: Vec4::new(0.5, 0.0, 0.0, 1.0),
        }
    }

    /// The default blue-to-red ramp; red-to-blue when `flip` is set.
    pub fn default_ramp(n_colors: usize, flip: bool) -> Self {
        if flip {
            Self::hue_ramp(HUE_RED, HUE_BLUE, n_colors)
        } else {
            Self::hue_ramp(HUE_BLUE, HUE_RED, n_colors)
        }
    }

    /// Sets the color used for NaN values.
    #[must_use]
    pub fn with_nan_color(mut self, nan_color: Vec4) -> Self {
        self.nan_color = nan_color;
        self
    }

    /// Returns the table entries.
    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true for an empty table.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the NaN color.
    pub fn nan_color(&self) -> Vec4 {
        self.nan_color
    }

    /// Returns the table as raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

#[allow(clippy::cast_precision_loss)]
fn linspace(n: usize) -> impl Iterator<Item = f32> {
    let denom = n.saturating_sub(1).max(1) as f32;
    (0..n).map(move |i| i as f32 / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let registry = ColorMapRegistry::new();
        for name in ["jet", "viridis", "coolwarm", "gray", "rainbow"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(registry.resolve("Viridis").is_ok());
        assert!(matches!(
            registry.resolve("nope"),
            Err(MeshplotError::UnknownColorMap(_))
        ));
    }

    #[test]
    fn test_reversed_lookup() {
        let registry = ColorMapRegistry::new();
        let gray_r = registry.resolve("gray_r").unwrap();
        assert_eq!(gray_r.sample(0.0), Vec3::ONE);
        assert_eq!(gray_r.sample(1.0), Vec3::ZERO);
    }

    #[test]
    fn test_table_from_color_map() {
        let gray = ColorMap::new("gray", vec![Vec3::ZERO, Vec3::ONE]);
        let table = LookupTable::from_color_map(&gray, 3, false);
        assert_eq!(table.len(), 3);
        assert_eq!(table.colors()[0], Rgba8::new(0, 0, 0, 255));
        assert_eq!(table.colors()[1], Rgba8::new(127, 127, 127, 255));
        assert_eq!(table.colors()[2], Rgba8::new(255, 255, 255, 255));
        assert_eq!(table.as_bytes().len(), 12);

        let flipped = LookupTable::from_color_map(&gray, 3, true);
        assert_eq!(flipped.colors()[0], Rgba8::new(255, 255, 255, 255));
    }

    #[test]
    fn test_default_ramp_endpoints() {
        let ramp = LookupTable::default_ramp(256, false);
        assert_eq!(ramp.len(), 256);
        assert_eq!(ramp.colors()[0].b, 255);
        assert_eq!(ramp.colors()[0].r, 0);
        assert_eq!(ramp.colors()[255], Rgba8::new(255, 0, 0, 255));

        let flipped = LookupTable::default_ramp(256, true);
        assert_eq!(flipped.colors()[0], Rgba8::new(255, 0, 0, 255));
    }

    #[test]
    fn test_hsv() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Vec3::X);
        assert!((hsv_to_rgb(1.0 / 3.0, 1.0, 1.0) - Vec3::Y).length() < 1e-5);
        assert_eq!(hsv_to_rgb(0.5, 0.0, 1.0), Vec3::ONE);
    }
}
