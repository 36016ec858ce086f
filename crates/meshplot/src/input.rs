//! Classification of plot inputs before any binding happens.

use meshplot_core::{Mesh, MeshKind, MultiBlock, Vec3};

/// Anything that can be handed to [`Plotter::add`](crate::Plotter::add).
#[derive(Debug, Clone)]
pub enum PlotInput {
    /// Raw point coordinates.
    Points(Vec<Vec3>),
    Mesh(Mesh),
    MultiBlock(MultiBlock),
}

impl From<Vec<Vec3>> for PlotInput {
    fn from(points: Vec<Vec3>) -> Self {
        Self::Points(points)
    }
}

impl From<&[Vec3]> for PlotInput {
    fn from(points: &[Vec3]) -> Self {
        Self::Points(points.to_vec())
    }
}

impl From<Vec<[f32; 3]>> for PlotInput {
    fn from(points: Vec<[f32; 3]>) -> Self {
        Self::Points(points.into_iter().map(Vec3::from).collect())
    }
}

impl From<Mesh> for PlotInput {
    fn from(mesh: Mesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<MultiBlock> for PlotInput {
    fn from(block: MultiBlock) -> Self {
        Self::MultiBlock(block)
    }
}

/// A classified plot input.
#[derive(Debug, Clone)]
pub enum Normalized {
    Mesh(Mesh),
    /// A mesh built from raw points, one vertex cell per point.
    PointCloud(Mesh),
    MultiBlock(MultiBlock),
}

impl Normalized {
    /// Returns the single mesh, if this is not a multi-block.
    pub fn into_mesh(self) -> Option<Mesh> {
        match self {
            Self::Mesh(mesh) | Self::PointCloud(mesh) => Some(mesh),
            Self::MultiBlock(_) => None,
        }
    }
}

/// Classifies an input.
///
/// Meshes whose kind is [`MeshKind::PointCloud`] are reported as point
/// clouds, the same as raw points.
pub fn normalize(input: PlotInput) -> Normalized {
    match input {
        PlotInput::Points(points) => Normalized::PointCloud(Mesh::point_cloud(points)),
        PlotInput::Mesh(mesh) if mesh.kind() == MeshKind::PointCloud => {
            Normalized::PointCloud(mesh)
        }
        PlotInput::Mesh(mesh) => Normalized::Mesh(mesh),
        PlotInput::MultiBlock(block) => Normalized::MultiBlock(block),
    }
}
