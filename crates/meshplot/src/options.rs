//! Per-call options for adding meshes and scalar bars.
//!
//! Every field left as `None` is filled from the session [`Theme`](crate::Theme).

use meshplot_core::{Association, ColorSpec, MapperHandle, RangeSpec, ScalarSpec, DEFAULT_N_COLORS};
use meshplot_render::Representation;

/// Options for [`Plotter::add_mesh`](crate::Plotter::add_mesh).
#[derive(Debug, Clone)]
pub struct MeshOptions {
    /// Flat color; ignored where scalars are shown.
    pub color: Option<ColorSpec>,
    pub style: Option<Representation>,
    /// Scalars to color by. With neither scalars nor color, the mesh's active
    /// scalars are used.
    pub scalars: Option<ScalarSpec>,
    /// Scalar range; a single value `s` means `(-s, s)`.
    pub range: Option<RangeSpec>,
    /// Scalar bar title. Setting it creates a scalar bar.
    pub stitle: Option<String>,
    pub show_edges: Option<bool>,
    pub edge_color: ColorSpec,
    pub point_size: f32,
    pub opacity: f32,
    pub line_width: Option<f32>,
    /// Reverse the colormap direction.
    pub flip_scalars: bool,
    pub lighting: Option<bool>,
    pub n_colors: usize,
    pub interpolate_before_map: bool,
    pub cmap: Option<String>,
    /// Legend label.
    pub label: Option<String>,
    /// `None` resets the camera only for the first mesh.
    pub reset_camera: Option<bool>,
    pub scalar_bar: ScalarBarOptions,
    /// Color each block of a multi-block input from a fixed palette.
    pub multi_colors: bool,
    /// Actor name. Adding under an existing name replaces that actor.
    pub name: Option<String>,
    pub render_points_as_spheres: bool,
    pub render_lines_as_tubes: bool,
    pub ambient: f32,
    pub show_scalar_bar: bool,
    pub nan_color: Option<ColorSpec>,
    pub nan_opacity: f32,
    /// Which store wins when a scalar name exists in both.
    pub preference: Association,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            color: None,
            style: None,
            scalars: None,
            range: None,
            stitle: None,
            show_edges: None,
            edge_color: ColorSpec::Name("black".to_string()),
            point_size: 5.0,
            opacity: 1.0,
            line_width: None,
            flip_scalars: false,
            lighting: None,
            n_colors: DEFAULT_N_COLORS,
            interpolate_before_map: false,
            cmap: None,
            label: None,
            reset_camera: None,
            scalar_bar: ScalarBarOptions::default(),
            multi_colors: false,
            name: None,
            render_points_as_spheres: false,
            render_lines_as_tubes: false,
            ambient: 0.2,
            show_scalar_bar: true,
            nan_color: None,
            nan_opacity: 1.0,
            preference: Association::Cell,
        }
    }
}

impl MeshOptions {
    /// Colors by the given scalars.
    #[must_use]
    pub fn scalars(mut self, scalars: impl Into<ScalarSpec>) -> Self {
        self.scalars = Some(scalars.into());
        self
    }

    /// Sets the scalar range.
    #[must_use]
    pub fn range(mut self, range: impl Into<RangeSpec>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Sets the scalar bar title.
    #[must_use]
    pub fn stitle(mut self, title: impl Into<String>) -> Self {
        self.stitle = Some(title.into());
        self
    }

    /// Sets the flat color.
    #[must_use]
    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the colormap.
    #[must_use]
    pub fn cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = Some(cmap.into());
        self
    }

    /// Sets the actor name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the representation style.
    #[must_use]
    pub fn style(mut self, style: Representation) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the legend label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Options for [`Plotter::add_scalar_bar`](crate::Plotter::add_scalar_bar).
#[derive(Debug, Clone)]
pub struct ScalarBarOptions {
    /// Title. Bars with the same title share one slot and one range.
    pub title: Option<String>,
    pub n_labels: u32,
    pub italic: bool,
    pub bold: bool,
    /// Setting either font size disables automatic sizing for both.
    pub title_font_size: Option<u32>,
    pub label_font_size: Option<u32>,
    pub color: Option<ColorSpec>,
    /// One of `courier`, `times` or `arial`.
    pub font_family: Option<String>,
    pub shadow: bool,
    /// Mapper to show; defaults to the most recently added mesh's mapper.
    pub mapper: Option<MapperHandle>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub position_x: Option<f32>,
    pub position_y: Option<f32>,
    pub vertical: Option<bool>,
    pub interactive: Option<bool>,
}

impl Default for ScalarBarOptions {
    fn default() -> Self {
        Self {
            title: None,
            n_labels: 5,
            italic: false,
            bold: true,
            title_font_size: None,
            label_font_size: None,
            color: None,
            font_family: None,
            shadow: false,
            mapper: None,
            width: None,
            height: None,
            position_x: None,
            position_y: None,
            vertical: None,
            interactive: None,
        }
    }
}

/// Options for [`Plotter::add_legend`](crate::Plotter::add_legend).
#[derive(Debug, Clone)]
pub struct LegendOptions {
    /// Entries to show; `None` uses the labels recorded by `add_mesh`.
    pub labels: Option<Vec<(String, ColorSpec)>>,
    pub background: ColorSpec,
    pub border: bool,
    pub size: (f32, f32),
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            labels: None,
            background: ColorSpec::Rgb(vec![0.5, 0.5, 0.5]),
            border: false,
            size: (0.2, 0.2),
        }
    }
}
