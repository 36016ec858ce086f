//! Drawable scene nodes handed to a [`SceneRenderer`](crate::SceneRenderer).

use std::str::FromStr;
use std::sync::Arc;

use glam::Vec3;
use meshplot_core::{
    FontFamily, LookupTable, MapperHandle, Mesh, MeshplotError, Orientation, ScalarRange,
};

/// How a mesh surface is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    #[default]
    Surface,
    Wireframe,
    Points,
}

impl FromStr for Representation {
    type Err = MeshplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surface" => Ok(Self::Surface),
            "wireframe" => Ok(Self::Wireframe),
            "points" => Ok(Self::Points),
            _ => Err(MeshplotError::InvalidStyle(s.to_string())),
        }
    }
}

/// Surface appearance of a mesh actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorProperty {
    pub representation: Representation,
    pub color: Vec3,
    pub opacity: f32,
    pub point_size: f32,
    pub line_width: Option<f32>,
    pub ambient: f32,
    pub show_edges: bool,
    pub edge_color: Vec3,
    pub lighting: bool,
    pub render_points_as_spheres: bool,
    pub render_lines_as_tubes: bool,
}

impl Default for ActorProperty {
    fn default() -> Self {
        Self {
            representation: Representation::Surface,
            color: Vec3::ONE,
            opacity: 1.0,
            point_size: 5.0,
            line_width: None,
            ambient: 0.2,
            show_edges: false,
            edge_color: Vec3::ZERO,
            lighting: true,
            render_points_as_spheres: false,
            render_lines_as_tubes: false,
        }
    }
}

/// A mesh drawn through a mapper.
#[derive(Debug, Clone)]
pub struct MeshActor {
    /// Snapshot of the mesh taken when it was added.
    pub mesh: Arc<Mesh>,
    pub mapper: MapperHandle,
    pub property: ActorProperty,
}

/// Font styling for scalar bar titles and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub color: Vec3,
    pub bold: bool,
    pub italic: bool,
    pub shadow: bool,
    /// `None` lets the engine size the font.
    pub font_size: Option<u32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: FontFamily::Courier,
            color: Vec3::ONE,
            bold: true,
            italic: false,
            shadow: false,
            font_size: None,
        }
    }
}

/// A scalar bar legend for one mapper.
#[derive(Debug, Clone)]
pub struct ScalarBarActor {
    pub title: Option<String>,
    pub mapper: MapperHandle,
    pub n_labels: u32,
    pub orientation: Orientation,
    /// Lower-left corner in normalized viewport coordinates.
    pub position: (f32, f32),
    /// Width and height in normalized viewport coordinates.
    pub size: (f32, f32),
    pub title_style: TextStyle,
    pub label_style: TextStyle,
    /// Set when either font size was left to the engine.
    pub unconstrained_font_size: bool,
    /// Whether the bar is a movable widget.
    pub interactive: bool,
}

impl ScalarBarActor {
    /// Current range, read through the mapper so merged ranges show up.
    pub fn range(&self) -> ScalarRange {
        self.mapper.scalar_range()
    }

    /// Current lookup table, read through the mapper.
    pub fn lookup_table(&self) -> Option<LookupTable> {
        self.mapper.lookup_table()
    }
}

/// A legend listing labeled meshes.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendActor {
    pub entries: Vec<(String, Vec3)>,
    pub background: Vec3,
    pub border: bool,
    pub size: (f32, f32),
}

/// A node in the rendered scene.
#[derive(Debug, Clone)]
pub enum Actor {
    Mesh(MeshActor),
    ScalarBar(ScalarBarActor),
    Legend(LegendActor),
}

impl Actor {
    /// Returns the mesh actor, if this is one.
    pub fn as_mesh(&self) -> Option<&MeshActor> {
        match self {
            Self::Mesh(actor) => Some(actor),
            _ => None,
        }
    }

    /// Returns the scalar bar actor, if this is one.
    pub fn as_scalar_bar(&self) -> Option<&ScalarBarActor> {
        match self {
            Self::ScalarBar(actor) => Some(actor),
            _ => None,
        }
    }

    /// Returns the legend actor, if this is one.
    pub fn as_legend(&self) -> Option<&LegendActor> {
        match self {
            Self::Legend(actor) => Some(actor),
            _ => None,
        }
    }

    /// Short kind name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::ScalarBar(_) => "scalar bar",
            Self::Legend(_) => "legend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representation_parse() {
        assert_eq!("Surface".parse::<Representation>().unwrap(), Representation::Surface);
        assert_eq!("WIREFRAME".parse::<Representation>().unwrap(), Representation::Wireframe);
        assert_eq!("points".parse::<Representation>().unwrap(), Representation::Points);
        assert!(matches!(
            "volume".parse::<Representation>(),
            Err(MeshplotError::InvalidStyle(_))
        ));
    }

    #[test]
    fn test_scalar_bar_reads_through_mapper() {
        let mapper = MapperHandle::new();
        let bar = ScalarBarActor {
            title: Some("T".to_string()),
            mapper: mapper.clone(),
            n_labels: 5,
            orientation: Orientation::Horizontal,
            position: (0.35, 0.02),
            size: (0.6, 0.08),
            title_style: TextStyle::default(),
            label_style: TextStyle::default(),
            unconstrained_font_size: true,
            interactive: false,
        };
        mapper.set_scalar_range(-3.0, 3.0);
        assert_eq!(bar.range(), ScalarRange::new(-3.0, 3.0));
        assert!(bar.lookup_table().is_none());
        assert_eq!(Actor::ScalarBar(bar).kind(), "scalar bar");
    }
}
