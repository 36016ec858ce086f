//! Scalar binding: deciding which array colors a mesh, over which range, with
//! which lookup table.
//!
//! [`ScalarBinder::bind`] is run once per plotted mesh. It never recurses into
//! multi-block data; callers flatten those first.

use glam::Vec4;

use crate::color_maps::{ColorMapRegistry, LookupTable};
use crate::error::{MeshplotError, Result};
use crate::mapper::{MapperHandle, ScalarMode, ScalarRange};
use crate::mesh::{Association, DataArray, DataSet};

/// Title used for caller-supplied scalars with no explicit title.
pub const DEFAULT_SCALAR_TITLE: &str = "Data";

/// Default number of lookup-table colors.
pub const DEFAULT_N_COLORS: usize = 256;

/// What to color a mesh by.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarSpec {
    /// A named array already stored on the mesh.
    Name(String),
    /// Values supplied directly by the caller.
    Values(DataArray),
}

impl From<&str> for ScalarSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ScalarSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<DataArray> for ScalarSpec {
    fn from(values: DataArray) -> Self {
        Self::Values(values)
    }
}

impl From<Vec<f64>> for ScalarSpec {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values.into())
    }
}

impl From<Vec<f32>> for ScalarSpec {
    fn from(values: Vec<f32>) -> Self {
        Self::Values(values.into())
    }
}

impl From<Vec<bool>> for ScalarSpec {
    fn from(values: Vec<bool>) -> Self {
        Self::Values(values.into())
    }
}

/// A requested scalar range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeSpec {
    /// `s` means `(-s, s)`.
    Symmetric(f64),
    /// Explicit `(min, max)`.
    Bounds(f64, f64),
}

impl RangeSpec {
    /// Resolves to a concrete range.
    pub fn resolve(self) -> ScalarRange {
        match self {
            Self::Symmetric(s) => ScalarRange::new(-s, s),
            Self::Bounds(min, max) => ScalarRange::new(min, max),
        }
    }
}

impl From<f64> for RangeSpec {
    fn from(s: f64) -> Self {
        Self::Symmetric(s)
    }
}

impl From<(f64, f64)> for RangeSpec {
    fn from((min, max): (f64, f64)) -> Self {
        Self::Bounds(min, max)
    }
}

impl From<[f64; 2]> for RangeSpec {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::Bounds(min, max)
    }
}

/// Parameters for one binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BindRequest {
    /// Scalars to show; `None` uses the mesh's active scalars if any.
    pub scalars: Option<ScalarSpec>,
    /// Explicit range; `None` computes it from the data.
    pub range: Option<RangeSpec>,
    /// Title for caller-supplied values.
    pub title: Option<String>,
    /// Store searched first when a name exists in both.
    pub preference: Association,
    pub n_colors: usize,
    /// Colormap name; `None` uses the hue ramp.
    pub cmap: Option<String>,
    pub flip: bool,
    pub interpolate_before_map: bool,
    /// Color for NaN values, with alpha.
    pub nan_color: Vec4,
}

impl Default for BindRequest {
    fn default() -> Self {
        Self {
            scalars: None,
            range: None,
            title: None,
            preference: Association::Cell,
            n_colors: DEFAULT_N_COLORS,
            cmap: None,
            flip: false,
            interpolate_before_map: false,
            nan_color: Vec4::new(169.0 / 255.0, 169.0 / 255.0, 169.0 / 255.0, 1.0),
        }
    }
}

/// A resolved instruction for displaying one scalar array.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarBinding {
    pub association: Association,
    /// Name the array was stored under; also the default colorbar title.
    pub array_name: String,
    pub range: ScalarRange,
    pub color_table: LookupTable,
    pub flip: bool,
    pub n_colors: usize,
    pub interpolate_before_map: bool,
}

impl ScalarBinding {
    /// Writes this binding into a mapper.
    ///
    /// When `zero_range_is_unset` is true a `(0, 0)` range leaves the mapper's
    /// range untouched.
    pub fn apply(&self, mapper: &MapperHandle, zero_range_is_unset: bool) {
        mapper.set_scalar_mode(ScalarMode::from(self.association));
        mapper.set_array_name(self.array_name.clone());
        mapper.set_interpolate_before_map(self.interpolate_before_map);
        if !(zero_range_is_unset && self.range.is_zero()) {
            mapper.set_scalar_range(self.range.min, self.range.max);
        }
        mapper.set_lookup_table(self.color_table.clone());
    }
}

/// Resolves scalar bindings against a colormap registry.
pub struct ScalarBinder {
    color_maps: ColorMapRegistry,
}

impl Default for ScalarBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarBinder {
    /// Creates a binder with the default colormaps.
    pub fn new() -> Self {
        Self::with_color_maps(ColorMapRegistry::new())
    }

    /// Creates a binder with a custom colormap registry.
    pub fn with_color_maps(color_maps: ColorMapRegistry) -> Self {
        Self { color_maps }
    }

    /// Returns the colormap registry.
    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    /// Returns the colormap registry mutably.
    pub fn color_maps_mut(&mut self) -> &mut ColorMapRegistry {
        &mut self.color_maps
    }

    /// Binds scalars for display on `mesh`.
    ///
    /// Returns `Ok(None)` when no scalars were requested and the mesh has no
    /// rank-1 active scalars. On success the bound array is stored on the mesh
    /// under the binding's title and made active.
    pub fn bind<D: DataSet + ?Sized>(
        &self,
        mesh: &mut D,
        request: &BindRequest,
    ) -> Result<Option<ScalarBinding>> {
        let (title, array) = match &request.scalars {
            None => match mesh.active_scalars() {
                Some((name, _, array)) if array.is_rank1() => (name.to_string(), array.clone()),
                _ => return Ok(None),
            },
            Some(ScalarSpec::Name(name)) => {
                let array = lookup_array(&*mesh, name, request.preference)?;
                (name.clone(), array.clone())
            }
            Some(ScalarSpec::Values(values)) => (
                request
                    .title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SCALAR_TITLE.to_string()),
                values.clone(),
            ),
        };

        let values = array.to_f64();
        let association = associate(values.len(), mesh.point_count(), mesh.cell_count())?;

        let range = match request.range {
            Some(spec) => spec.resolve(),
            None => crate::mesh::nan_range(&values)
                .map_or(ScalarRange::new(0.0, 0.0), ScalarRange::from),
        };

        let color_table = self
            .color_table(request.cmap.as_deref(), request.n_colors, request.flip)?
            .with_nan_color(request.nan_color);

        log::debug!(
            "bound '{title}' as {association:?} scalars ({} values, range {range})",
            values.len()
        );

        mesh.set_array(&title, association, DataArray::scalars(values), true);

        Ok(Some(ScalarBinding {
            association,
            array_name: title,
            range,
            color_table,
            flip: request.flip,
            n_colors: request.n_colors,
            interpolate_before_map: request.interpolate_before_map,
        }))
    }

    /// Builds a lookup table from a colormap name, or the hue ramp when `None`.
    pub fn color_table(&self, cmap: Option<&str>, n_colors: usize, flip: bool) -> Result<LookupTable> {
        match cmap {
            Some(name) => {
                let map = self.color_maps.resolve(name)?;
                Ok(LookupTable::from_color_map(&map, n_colors, flip))
            }
            None => Ok(LookupTable::default_ramp(n_colors, flip)),
        }
    }
}

/// Picks point or cell association from the flattened scalar length.
///
/// Point wins when the point and cell counts are equal.
pub fn associate(len: usize, points: usize, cells: usize) -> Result<Association> {
    if len == points {
        Ok(Association::Point)
    } else if len == cells {
        Ok(Association::Cell)
    } else {
        Err(MeshplotError::ScalarSizeMismatch {
            actual: len,
            points,
            cells,
        })
    }
}

/// Replaces the values of the active scalars in place.
///
/// The new values pick point or cell data by length, the same way
/// [`associate`] does, and the active array must live in that store. The
/// array keeps its name and stays active. Returns the association written.
pub fn update_active_scalars<D: DataSet + ?Sized>(
    mesh: &mut D,
    values: &DataArray,
) -> Result<Association> {
    let values = values.to_f64();
    let association = associate(values.len(), mesh.point_count(), mesh.cell_count())?;
    let name = match mesh.active_scalars() {
        Some((name, active, _)) if active == association => name.to_string(),
        _ => return Err(MeshplotError::NoActiveScalars(association)),
    };
    log::debug!("updated {association:?} scalars '{name}' ({} values)", values.len());
    mesh.set_array(&name, association, DataArray::scalars(values), true);
    Ok(association)
}

/// Finds a named array, searching the preferred store first.
pub fn lookup_array<'a, D: DataSet + ?Sized>(
    mesh: &'a D,
    name: &str,
    preference: Association,
) -> Result<&'a DataArray> {
    mesh.get_array(name, preference)
        .or_else(|| mesh.get_array(name, preference.other()))
        .ok_or_else(|| MeshplotError::ScalarArrayNotFound(name.to_string()))
}
