//! Color and font resolution.
//!
//! Colors are accepted as names (`"white"`, `"w"`), hex strings (`"#FFFFFF"`)
//! or RGB triples in `[0, 1]`, and always come out as a [`Vec3`].

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshplotError, Result};

/// Named colors, as `0xRRGGBB`. Lookup is case-insensitive.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("w", 0xFF_FF_FF),
    ("k", 0x00_00_00),
    ("r", 0xFF_00_00),
    ("g", 0x00_80_00),
    ("b", 0x00_00_FF),
    ("c", 0x00_BF_BF),
    ("m", 0xBF_00_BF),
    ("y", 0xBF_BF_00),
    ("white", 0xFF_FF_FF),
    ("black", 0x00_00_00),
    ("red", 0xFF_00_00),
    ("green", 0x00_80_00),
    ("lime", 0x00_FF_00),
    ("blue", 0x00_00_FF),
    ("cyan", 0x00_FF_FF),
    ("magenta", 0xFF_00_FF),
    ("yellow", 0xFF_FF_00),
    ("orange", 0xFF_A5_00),
    ("purple", 0x80_00_80),
    ("pink", 0xFF_C0_CB),
    ("brown", 0xA5_2A_2A),
    ("gray", 0x80_80_80),
    ("grey", 0x80_80_80),
    ("darkgray", 0xA9_A9_A9),
    ("darkgrey", 0xA9_A9_A9),
    ("lightgray", 0xD3_D3_D3),
    ("lightgrey", 0xD3_D3_D3),
    ("dimgray", 0x69_69_69),
    ("silver", 0xC0_C0_C0),
    ("navy", 0x00_00_80),
    ("teal", 0x00_80_80),
    ("olive", 0x80_80_00),
    ("maroon", 0x80_00_00),
    ("gold", 0xFF_D7_00),
    ("tan", 0xD2_B4_8C),
    ("salmon", 0xFA_80_72),
    ("coral", 0xFF_7F_50),
    ("beige", 0xF5_F5_DC),
    ("ivory", 0xFF_FF_F0),
    ("violet", 0xEE_82_EE),
    ("indigo", 0x4B_00_82),
    ("turquoise", 0x40_E0_D0),
    ("skyblue", 0x87_CE_EB),
    ("lightblue", 0xAD_D8_E6),
    ("darkblue", 0x00_00_8B),
    ("darkgreen", 0x00_64_00),
    ("darkred", 0x8B_00_00),
    ("paraview", 0x52_57_6E),
];

fn rgb_from_u32(rgb: u32) -> Vec3 {
    let [_, r, g, b] = rgb.to_be_bytes();
    Vec3::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    )
}

/// A user-facing color specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// A color name or `#RRGGBB` hex string.
    Name(String),
    /// A numeric sequence; valid only with exactly three components in `[0, 1]`.
    Rgb(Vec<f32>),
}

impl From<&str> for ColorSpec {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for ColorSpec {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<[f32; 3]> for ColorSpec {
    fn from(rgb: [f32; 3]) -> Self {
        Self::Rgb(rgb.to_vec())
    }
}

impl From<Vec3> for ColorSpec {
    fn from(rgb: Vec3) -> Self {
        Self::Rgb(rgb.to_array().to_vec())
    }
}

impl From<Vec<f32>> for ColorSpec {
    fn from(values: Vec<f32>) -> Self {
        Self::Rgb(values)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Rgb(values) => write!(f, "{values:?}"),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(rgb_from_u32)
}

/// Parses a single color specification.
pub fn parse_color(spec: &ColorSpec) -> Result<Vec3> {
    match spec {
        ColorSpec::Name(name) => {
            if name.starts_with('#') {
                return parse_hex(name).ok_or_else(|| MeshplotError::InvalidColorSpec(name.clone()));
            }
            let lower = name.to_lowercase();
            NAMED_COLORS
                .iter()
                .find(|(n, _)| *n == lower)
                .map(|&(_, rgb)| rgb_from_u32(rgb))
                .ok_or_else(|| MeshplotError::InvalidColorSpec(name.clone()))
        }
        ColorSpec::Rgb(values) => match values.as_slice() {
            &[r, g, b] if [r, g, b].iter().all(|c| (0.0..=1.0).contains(c)) => {
                Ok(Vec3::new(r, g, b))
            }
            _ => Err(MeshplotError::InvalidColorSpec(spec.to_string())),
        },
    }
}

/// Resolves optional color specifications against a default color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorResolver {
    default: Vec3,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self {
            default: Vec3::ONE,
        }
    }
}

impl ColorResolver {
    /// Creates a resolver that maps `None` to `default`.
    pub fn new(default: Vec3) -> Self {
        Self { default }
    }

    /// Creates a resolver whose default is itself given as a color specification.
    pub fn with_default_spec(default: &ColorSpec) -> Result<Self> {
        parse_color(default).map(Self::new)
    }

    /// Returns the fallback color.
    pub fn default_color(&self) -> Vec3 {
        self.default
    }

    /// Resolves `spec`, or the default color when no spec is given.
    pub fn resolve(&self, spec: Option<&ColorSpec>) -> Result<Vec3> {
        spec.map_or(Ok(self.default), parse_color)
    }
}

/// Font families understood by the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Arial,
    #[default]
    Courier,
    Times,
}

impl FontFamily {
    /// Returns the lowercase font name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arial => "arial",
            Self::Courier => "courier",
            Self::Times => "times",
        }
    }
}

impl FromStr for FontFamily {
    type Err = MeshplotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "arial" => Ok(Self::Arial),
            "courier" => Ok(Self::Courier),
            "times" => Ok(Self::Times),
            _ => Err(MeshplotError::InvalidFontSpec(s.to_string())),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a font family name.
pub fn parse_font_family(name: &str) -> Result<FontFamily> {
    name.parse()
}
