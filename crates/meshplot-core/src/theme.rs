//! Plotting theme: the defaults used when a plotting call leaves a parameter unset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{ColorSpec, FontFamily};
use crate::error::{MeshplotError, Result};

/// Default geometry of a scalar bar for one orientation, in normalized
/// viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorbarLayout {
    pub width: f32,
    pub height: f32,
    pub position_x: f32,
    pub position_y: f32,
}

impl ColorbarLayout {
    /// Layout for horizontal bars along the bottom of the viewport.
    pub const HORIZONTAL: Self = Self {
        width: 0.60,
        height: 0.08,
        position_x: 0.35,
        position_y: 0.02,
    };

    /// Layout for vertical bars along the right edge of the viewport.
    pub const VERTICAL: Self = Self {
        width: 0.1,
        height: 0.8,
        position_x: 0.85,
        position_y: 0.1,
    };
}

/// Font defaults for scalar bars and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontTheme {
    pub family: FontFamily,
    pub size: u32,
    /// Title font size; `None` sizes automatically.
    pub title_size: Option<u32>,
    /// Label font size; `None` sizes automatically.
    pub label_size: Option<u32>,
    pub color: ColorSpec,
}

impl Default for FontTheme {
    fn default() -> Self {
        Self {
            family: FontFamily::Courier,
            size: 12,
            title_size: None,
            label_size: None,
            color: ColorSpec::Rgb(vec![1.0, 1.0, 1.0]),
        }
    }
}

/// Global defaults for a plotting session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Background color.
    pub background: ColorSpec,

    /// Default colormap. `None` uses a blue-to-red hue ramp.
    pub cmap: Option<String>,

    /// Flat mesh color when no scalars are shown.
    pub color: ColorSpec,

    /// Color for NaN scalar values.
    pub nan_color: ColorSpec,

    /// Color for wireframes when no color is given.
    pub outline_color: ColorSpec,

    /// Font defaults.
    pub font: FontTheme,

    /// Horizontal scalar bar layout.
    pub colorbar_horizontal: ColorbarLayout,

    /// Vertical scalar bar layout.
    pub colorbar_vertical: ColorbarLayout,

    /// Whether mesh edges are shown by default.
    pub show_edges: bool,

    /// Whether lighting is enabled by default.
    pub lighting: bool,

    /// Whether scalar bars are interactive widgets by default.
    pub interactive: bool,

    /// Whether a scalar range of exactly `(0, 0)` means "no range set".
    pub zero_range_is_unset: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: ColorSpec::Rgb(vec![0.3, 0.3, 0.3]),
            cmap: Some("jet".to_string()),
            color: ColorSpec::Name("white".to_string()),
            nan_color: ColorSpec::Name("darkgray".to_string()),
            outline_color: ColorSpec::Name("white".to_string()),
            font: FontTheme::default(),
            colorbar_horizontal: ColorbarLayout::HORIZONTAL,
            colorbar_vertical: ColorbarLayout::VERTICAL,
            show_edges: false,
            lighting: true,
            interactive: false,
            zero_range_is_unset: true,
        }
    }
}

impl Theme {
    /// Returns a predefined theme by name.
    ///
    /// Known names: `default`, `paraview`/`pv`, and `document`/`doc`/`paper`/`report`.
    pub fn named(name: &str) -> Result<Self> {
        let mut theme = Self::default();
        match name.to_lowercase().as_str() {
            "default" => {}
            "paraview" | "pv" => {
                theme.background = ColorSpec::Name("paraview".to_string());
                theme.cmap = Some("coolwarm".to_string());
                theme.font.family = FontFamily::Arial;
                theme.font.label_size = Some(16);
                theme.show_edges = false;
            }
            "document" | "doc" | "paper" | "report" => {
                theme.background = ColorSpec::Name("white".to_string());
                theme.cmap = Some("coolwarm".to_string());
                theme.font.color = ColorSpec::Name("black".to_string());
                theme.show_edges = false;
                theme.color = ColorSpec::Name("orange".to_string());
                theme.outline_color = ColorSpec::Name("black".to_string());
            }
            _ => return Err(MeshplotError::UnknownTheme(name.to_string())),
        }
        Ok(theme)
    }

    /// Returns the scalar bar layout for the given orientation.
    pub fn colorbar_layout(&self, vertical: bool) -> ColorbarLayout {
        if vertical {
            self.colorbar_vertical
        } else {
            self.colorbar_horizontal
        }
    }

    /// Parses a theme from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the theme as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a theme from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let theme = Self::from_json(&json)?;
        log::debug!("loaded theme from {}", path.as_ref().display());
        Ok(theme)
    }

    /// Saves the theme to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
