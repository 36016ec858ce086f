//! Mapper handles: the binding between a data array, a scalar range and a
//! lookup table that the rendering engine draws with.
//!
//! A [`MapperHandle`] is shared between the actor that draws with it and the
//! colorbar bookkeeping that later re-applies merged ranges to it.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use glam::Vec4;

use crate::color_maps::LookupTable;
use crate::mesh::Association;

/// A closed numeric interval `[min, max]` for scalar display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarRange {
    pub min: f64,
    pub max: f64,
}

impl ScalarRange {
    /// Creates a range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if both bounds are zero.
    pub fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    /// Returns the smallest range covering both ranges.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Returns the range as a tuple.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl From<(f64, f64)> for ScalarRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

impl fmt::Display for ScalarRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Which data a mapper colors by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalarMode {
    /// Engine default; no scalars are bound.
    #[default]
    Default,
    PointData,
    CellData,
    /// Field data only, which leaves the mesh flat-colored.
    FieldData,
}

impl From<Association> for ScalarMode {
    fn from(association: Association) -> Self {
        match association {
            Association::Point => Self::PointData,
            Association::Cell => Self::CellData,
        }
    }
}

/// Mutable mapper state behind a [`MapperHandle`].
#[derive(Debug, Clone, Default)]
pub struct MapperState {
    pub scalar_mode: ScalarMode,
    pub array_name: Option<String>,
    pub scalar_range: ScalarRange,
    pub lookup_table: Option<LookupTable>,
    pub interpolate_before_map: bool,
}

/// A shared handle to one mapper.
#[derive(Clone, Default)]
pub struct MapperHandle {
    inner: Arc<RwLock<MapperState>>,
}

impl MapperHandle {
    /// Creates a mapper with default state.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MapperState> {
        self.inner.read().expect("mapper lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MapperState> {
        self.inner.write().expect("mapper lock poisoned")
    }

    /// Returns the current scalar range.
    pub fn scalar_range(&self) -> ScalarRange {
        self.read().scalar_range
    }

    /// Sets the scalar range.
    pub fn set_scalar_range(&self, min: f64, max: f64) {
        self.write().scalar_range = ScalarRange::new(min, max);
    }

    /// Returns the scalar mode.
    pub fn scalar_mode(&self) -> ScalarMode {
        self.read().scalar_mode
    }

    /// Sets the scalar mode.
    pub fn set_scalar_mode(&self, mode: ScalarMode) {
        self.write().scalar_mode = mode;
    }

    /// Returns the bound array name.
    pub fn array_name(&self) -> Option<String> {
        self.read().array_name.clone()
    }

    /// Sets the bound array name.
    pub fn set_array_name(&self, name: impl Into<String>) {
        self.write().array_name = Some(name.into());
    }

    /// Returns a copy of the lookup table.
    pub fn lookup_table(&self) -> Option<LookupTable> {
        self.read().lookup_table.clone()
    }

    /// Sets the lookup table.
    pub fn set_lookup_table(&self, table: LookupTable) {
        self.write().lookup_table = Some(table);
    }

    /// Returns the lookup table's NaN color, if a table is set.
    pub fn nan_color(&self) -> Option<Vec4> {
        self.read().lookup_table.as_ref().map(LookupTable::nan_color)
    }

    /// Returns whether scalars are interpolated before color mapping.
    pub fn interpolate_before_map(&self) -> bool {
        self.read().interpolate_before_map
    }

    /// Sets whether scalars are interpolated before color mapping.
    pub fn set_interpolate_before_map(&self, interpolate: bool) {
        self.write().interpolate_before_map = interpolate;
    }

    /// Returns a snapshot of the full state.
    pub fn state(&self) -> MapperState {
        self.read().clone()
    }

    /// Returns true if both handles refer to the same mapper.
    pub fn same_mapper(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for MapperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("MapperHandle")
            .field("scalar_mode", &state.scalar_mode)
            .field("array_name", &state.array_name)
            .field("scalar_range", &state.scalar_range)
            .finish_non_exhaustive()
    }
}
