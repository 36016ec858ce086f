//! Mesh data model: geometry plus named point and cell arrays.
//!
//! Meshes are owned by the caller. Plotting only reads their arrays and, when
//! scalars are bound for display, appends one array and marks it active.

use glam::Vec3;

/// Whether a data array is indexed per point or per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Association {
    Point,
    #[default]
    Cell,
}

impl Association {
    /// Returns the other association.
    pub fn other(self) -> Self {
        match self {
            Self::Point => Self::Cell,
            Self::Cell => Self::Point,
        }
    }
}

/// Values of a data array.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Bool(Vec<bool>),
}

impl ArrayValues {
    /// Total number of stored values (tuples times components).
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Bool(v) => v.len(),
        }
    }

    /// Returns true if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named-array payload with a component count.
///
/// A rank-1 array has one component per tuple. Arrays with more components
/// (vectors, tensors) are stored flat in tuple-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    values: ArrayValues,
    components: usize,
}

impl DataArray {
    /// Creates an array with the given number of components per tuple.
    pub fn new(values: ArrayValues, components: usize) -> Self {
        Self {
            values,
            components: components.max(1),
        }
    }

    /// Creates a rank-1 float array.
    pub fn scalars(values: Vec<f64>) -> Self {
        Self::new(ArrayValues::Float(values), 1)
    }

    /// Creates a float array of 3-component vectors.
    pub fn vectors(values: &[Vec3]) -> Self {
        let flat = values
            .iter()
            .flat_map(|v| v.to_array())
            .map(f64::from)
            .collect();
        Self::new(ArrayValues::Float(flat), 3)
    }

    /// Returns the raw values.
    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    /// Returns the number of components per tuple.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Returns the number of tuples.
    pub fn num_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    /// Returns true for single-component arrays.
    pub fn is_rank1(&self) -> bool {
        self.components == 1
    }

    /// Returns all values flattened to `f64`. Booleans become `0.0` / `1.0`.
    pub fn to_f64(&self) -> Vec<f64> {
        match &self.values {
            ArrayValues::Float(v) => v.clone(),
            #[allow(clippy::cast_precision_loss)]
            ArrayValues::Int(v) => v.iter().map(|&x| x as f64).collect(),
            ArrayValues::Bool(v) => v.iter().map(|&b| f64::from(u8::from(b))).collect(),
        }
    }

    /// Returns the NaN-ignoring `(min, max)` of all values, or `None` when
    /// there is no non-NaN value.
    pub fn range(&self) -> Option<(f64, f64)> {
        nan_range(&self.to_f64())
    }
}

impl From<Vec<f64>> for DataArray {
    fn from(values: Vec<f64>) -> Self {
        Self::scalars(values)
    }
}

impl From<Vec<f32>> for DataArray {
    fn from(values: Vec<f32>) -> Self {
        Self::scalars(values.into_iter().map(f64::from).collect())
    }
}

impl From<Vec<i64>> for DataArray {
    fn from(values: Vec<i64>) -> Self {
        Self::new(ArrayValues::Int(values), 1)
    }
}

impl From<Vec<bool>> for DataArray {
    fn from(values: Vec<bool>) -> Self {
        Self::new(ArrayValues::Bool(values), 1)
    }
}

/// `(min, max)` ignoring NaN entries.
pub fn nan_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Insertion-ordered named arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayStore {
    arrays: Vec<(String, DataArray)>,
}

impl ArrayStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an array by name.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }

    /// Inserts or replaces an array.
    pub fn insert(&mut self, name: impl Into<String>, array: DataArray) {
        let name = name.into();
        if let Some(slot) = self.arrays.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = array;
        } else {
            self.arrays.push((name, array));
        }
    }

    /// Removes an array by name.
    pub fn remove(&mut self, name: &str) -> Option<DataArray> {
        let idx = self.arrays.iter().position(|(n, _)| n == name)?;
        Some(self.arrays.remove(idx).1)
    }

    /// Returns whether an array with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the array names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|(n, _)| n.as_str())
    }

    /// Returns the number of arrays.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Returns true if the store holds no arrays.
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

/// Read and append access to a dataset's sizes and array stores.
pub trait DataSet {
    /// Number of points.
    fn point_count(&self) -> usize;

    /// Number of cells.
    fn cell_count(&self) -> usize;

    /// Gets a named array from the point or cell store.
    fn get_array(&self, name: &str, association: Association) -> Option<&DataArray>;

    /// Stores a named array, optionally making it the active scalars.
    fn set_array(
        &mut self,
        name: &str,
        association: Association,
        array: DataArray,
        make_active: bool,
    );

    /// Returns the active scalars: name, association and array.
    ///
    /// A dataset has at most one active array across both stores.
    fn active_scalars(&self) -> Option<(&str, Association, &DataArray)>;

    /// NaN-ignoring range of a named array, searching point data first.
    fn data_range(&self, name: &str) -> Option<(f64, f64)> {
        self.get_array(name, Association::Point)
            .or_else(|| self.get_array(name, Association::Cell))
            .and_then(DataArray::range)
    }
}

/// The kind of geometry a mesh represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeshKind {
    #[default]
    PolyData,
    UnstructuredGrid,
    StructuredGrid,
    PointCloud,
}

impl MeshKind {
    /// Returns the display name of this kind.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::PolyData => "PolyData",
            Self::UnstructuredGrid => "UnstructuredGrid",
            Self::StructuredGrid => "StructuredGrid",
            Self::PointCloud => "PointCloud",
        }
    }
}

/// An in-memory mesh with point and cell data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    kind: MeshKind,
    points: Vec<Vec3>,
    cells: Vec<Vec<u32>>,
    point_data: ArrayStore,
    cell_data: ArrayStore,
    active: Option<(Association, String)>,
}

impl Mesh {
    /// Creates a mesh from points and cell connectivity.
    pub fn new(points: Vec<Vec3>, cells: Vec<Vec<u32>>) -> Self {
        Self {
            points,
            cells,
            ..Self::default()
        }
    }

    /// Creates a point cloud with one vertex cell per point.
    pub fn point_cloud(points: Vec<Vec3>) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let cells = (0..points.len() as u32).map(|i| vec![i]).collect();
        Self {
            kind: MeshKind::PointCloud,
            points,
            cells,
            ..Self::default()
        }
    }

    /// Sets the mesh kind.
    #[must_use]
    pub fn with_kind(mut self, kind: MeshKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the mesh kind.
    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    /// Returns the points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Replaces the points.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        self.points = points;
    }

    /// Returns the cell connectivity.
    pub fn cells(&self) -> &[Vec<u32>] {
        &self.cells
    }

    /// Returns the point data store.
    pub fn point_data(&self) -> &ArrayStore {
        &self.point_data
    }

    /// Returns the cell data store.
    pub fn cell_data(&self) -> &ArrayStore {
        &self.cell_data
    }

    /// Marks an existing array as the active scalars, replacing the previous
    /// marker in either store. Returns false if the array is absent.
    pub fn set_active_scalars(&mut self, name: &str, association: Association) -> bool {
        if self.store(association).contains(name) {
            self.active = Some((association, name.to_string()));
            true
        } else {
            false
        }
    }

    /// Removes an array, clearing the active marker if it pointed at it.
    pub fn remove_array(&mut self, name: &str, association: Association) -> Option<DataArray> {
        let removed = self.store_mut(association).remove(name)?;
        if self
            .active
            .as_ref()
            .is_some_and(|(assoc, active)| *assoc == association && active == name)
        {
            self.active = None;
        }
        Some(removed)
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }

    /// Adds a point array.
    pub fn add_point_array(&mut self, name: &str, array: impl Into<DataArray>) -> &mut Self {
        self.point_data.insert(name, array.into());
        self
    }

    /// Adds a cell array.
    pub fn add_cell_array(&mut self, name: &str, array: impl Into<DataArray>) -> &mut Self {
        self.cell_data.insert(name, array.into());
        self
    }

    fn store(&self, association: Association) -> &ArrayStore {
        match association {
            Association::Point => &self.point_data,
            Association::Cell => &self.cell_data,
        }
    }

    fn store_mut(&mut self, association: Association) -> &mut ArrayStore {
        match association {
            Association::Point => &mut self.point_data,
            Association::Cell => &mut self.cell_data,
        }
    }
}

impl DataSet for Mesh {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn get_array(&self, name: &str, association: Association) -> Option<&DataArray> {
        self.store(association).get(name)
    }

    fn set_array(
        &mut self,
        name: &str,
        association: Association,
        array: DataArray,
        make_active: bool,
    ) {
        self.store_mut(association).insert(name, array);
        if make_active {
            self.active = Some((association, name.to_string()));
        }
    }

    fn active_scalars(&self) -> Option<(&str, Association, &DataArray)> {
        let (association, name) = self.active.as_ref()?;
        let array = self.store(*association).get(name)?;
        Some((name.as_str(), *association, array))
    }
}

/// One entry of a [`MultiBlock`].
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Mesh(Mesh),
    MultiBlock(MultiBlock),
}

/// An ordered collection of meshes and nested collections. Entries may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBlock {
    blocks: Vec<Option<Block>>,
}

impl MultiBlock {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a mesh.
    pub fn push_mesh(&mut self, mesh: Mesh) -> &mut Self {
        self.blocks.push(Some(Block::Mesh(mesh)));
        self
    }

    /// Appends a nested collection.
    pub fn push_multi_block(&mut self, block: MultiBlock) -> &mut Self {
        self.blocks.push(Some(Block::MultiBlock(block)));
        self
    }

    /// Appends an empty entry.
    pub fn push_empty(&mut self) -> &mut Self {
        self.blocks.push(None);
        self
    }

    /// Returns the entries.
    pub fn blocks(&self) -> &[Option<Block>] {
        &self.blocks
    }

    /// Returns the number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Range of a named array across every mesh in the tree.
    pub fn data_range(&self, name: &str) -> Option<(f64, f64)> {
        self.blocks
            .iter()
            .flatten()
            .filter_map(|block| match block {
                Block::Mesh(mesh) => mesh.data_range(name),
                Block::MultiBlock(nested) => nested.data_range(name),
            })
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }

    /// Flattens the tree into `(name, mesh)` leaves in order.
    ///
    /// Leaves are named `{prefix}-{index}`, recursively for nested blocks.
    /// Empty entries are skipped.
    pub fn flatten(self, prefix: &str) -> Vec<(String, Mesh)> {
        let mut leaves = Vec::new();
        self.flatten_into(prefix, &mut leaves);
        leaves
    }

    fn flatten_into(self, prefix: &str, leaves: &mut Vec<(String, Mesh)>) {
        for (idx, block) in self.blocks.into_iter().enumerate() {
            let name = format!("{prefix}-{idx}");
            match block {
                Some(Block::Mesh(mesh)) => leaves.push((name, mesh)),
                Some(Block::MultiBlock(nested)) => nested.flatten_into(&name, leaves),
                None => {}
            }
        }
    }
}
