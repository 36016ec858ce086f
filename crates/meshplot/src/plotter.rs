//! The plotting session.

use std::collections::HashMap;
use std::sync::Arc;

use meshplot_core::{
    clamp_to_viewport, lookup_array, parse_color, parse_font_family, slot_position,
    update_active_scalars, Association, BindRequest, ColorResolver, ColorSpec, ColorbarLayout,
    ColorbarSlotManager, DataSet, MapperHandle, Mesh, MeshplotError, MultiBlock, Orientation,
    RangeSpec, Result, ScalarBinder, ScalarMode, ScalarSpec, Theme, Vec3,
};
use meshplot_render::{
    Actor, ActorProperty, HeadlessRenderer, LegendActor, MeshActor, Representation,
    ScalarBarActor, SceneRenderer, TextStyle,
};

use crate::input::{normalize, Normalized, PlotInput};
use crate::options::{LegendOptions, MeshOptions, ScalarBarOptions};

/// Block colors used when `multi_colors` is set.
pub const MULTI_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const LEGEND_NAME: &str = "legend";

/// A plotting session on top of a [`SceneRenderer`].
///
/// Holds the colorbar slots, the most recent mapper, the legend labels and the
/// mesh snapshots that [`update_scalars`](Self::update_scalars) rewrites.
/// All of it is reset by [`clear`](Self::clear) and [`close`](Self::close).
pub struct Plotter {
    renderer: Box<dyn SceneRenderer>,
    theme: Theme,
    binder: ScalarBinder,
    colorbars: ColorbarSlotManager,
    mapper: Option<MapperHandle>,
    scalar_bars: Vec<String>,
    labels: Vec<(String, Vec3)>,
    meshes: HashMap<String, MeshActor>,
    last_mesh: Option<String>,
    multi_blocks: HashMap<String, Vec<String>>,
    actor_count: usize,
    camera_set: bool,
    closed: bool,
}

impl Plotter {
    /// Creates a session with the default theme.
    pub fn new(renderer: impl SceneRenderer) -> Result<Self> {
        Self::with_theme(renderer, Theme::default())
    }

    /// Creates a session with the given theme.
    pub fn with_theme(renderer: impl SceneRenderer, theme: Theme) -> Result<Self> {
        let mut renderer: Box<dyn SceneRenderer> = Box::new(renderer);
        renderer.set_background(parse_color(&theme.background)?);
        Ok(Self {
            renderer,
            theme,
            binder: ScalarBinder::new(),
            colorbars: ColorbarSlotManager::new(),
            mapper: None,
            scalar_bars: Vec::new(),
            labels: Vec::new(),
            meshes: HashMap::new(),
            last_mesh: None,
            multi_blocks: HashMap::new(),
            actor_count: 0,
            camera_set: false,
            closed: false,
        })
    }

    /// Creates a session that records the scene in memory.
    pub fn headless() -> Result<Self> {
        Self::new(HeadlessRenderer::new())
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &dyn SceneRenderer {
        self.renderer.as_ref()
    }

    /// Returns the renderer as a concrete type.
    pub fn renderer_as<R: SceneRenderer>(&self) -> Option<&R> {
        self.renderer.as_any().downcast_ref::<R>()
    }

    /// Returns the renderer as a concrete type, mutably.
    pub fn renderer_as_mut<R: SceneRenderer>(&mut self) -> Option<&mut R> {
        self.renderer.as_any_mut().downcast_mut::<R>()
    }

    /// Returns the theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns the theme mutably. Changes apply to later calls.
    pub fn theme_mut(&mut self) -> &mut Theme {
        &mut self.theme
    }

    /// Returns the scalar binder, e.g. to register colormaps.
    pub fn binder_mut(&mut self) -> &mut ScalarBinder {
        &mut self.binder
    }

    /// Returns the colorbar bookkeeping.
    pub fn colorbars(&self) -> &ColorbarSlotManager {
        &self.colorbars
    }

    /// Returns the mapper of the most recently added mesh.
    pub fn mapper(&self) -> Option<&MapperHandle> {
        self.mapper.as_ref()
    }

    /// Returns the recorded legend labels.
    pub fn labels(&self) -> &[(String, Vec3)] {
        &self.labels
    }

    /// Returns the scalar bar actor names in the order they were added.
    pub fn scalar_bar_names(&self) -> &[String] {
        &self.scalar_bars
    }

    /// Returns whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(MeshplotError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn next_actor_name(&mut self, type_name: &str) -> String {
        let name = format!("{type_name}({:#x})", self.actor_count);
        self.actor_count += 1;
        name
    }

    /// Adds a mesh and returns its actor name.
    ///
    /// When scalars are bound, the bound array is appended to `mesh` and made
    /// active. A scalar bar is added when a title is known: `stitle`, or the
    /// array name for named or active scalars.
    pub fn add_mesh(&mut self, mesh: &mut Mesh, options: &MeshOptions) -> Result<String> {
        self.ensure_open()?;

        let nan_color = ColorResolver::with_default_spec(&self.theme.nan_color)?
            .resolve(options.nan_color.as_ref())?
            .extend(options.nan_opacity);
        let style = options.style.unwrap_or_default();
        let color_default = if style == Representation::Wireframe && options.color.is_none() {
            &self.theme.outline_color
        } else {
            &self.theme.color
        };
        let color = ColorResolver::with_default_spec(color_default)?.resolve(options.color.as_ref())?;
        let edge_color = parse_color(&options.edge_color)?;

        let binding = if options.color.is_some() && options.scalars.is_none() {
            None
        } else {
            let request = BindRequest {
                scalars: options.scalars.clone(),
                range: options.range,
                title: options.stitle.clone(),
                preference: options.preference,
                n_colors: options.n_colors,
                cmap: options.cmap.clone().or_else(|| self.theme.cmap.clone()),
                flip: options.flip_scalars,
                interpolate_before_map: options.interpolate_before_map,
                nan_color,
            };
            self.binder.bind(mesh, &request)?
        };

        let mapper = MapperHandle::new();
        match &binding {
            Some(binding) => binding.apply(&mapper, self.theme.zero_range_is_unset),
            None => mapper.set_scalar_mode(ScalarMode::FieldData),
        }

        let name = match &options.name {
            Some(name) => name.clone(),
            None => self.next_actor_name(mesh.kind().type_name()),
        };
        let property = ActorProperty {
            representation: style,
            color,
            opacity: options.opacity,
            point_size: options.point_size,
            line_width: options.line_width,
            ambient: options.ambient,
            show_edges: options.show_edges.unwrap_or(self.theme.show_edges),
            edge_color,
            lighting: options.lighting.unwrap_or(self.theme.lighting),
            render_points_as_spheres: options.render_points_as_spheres,
            render_lines_as_tubes: options.render_lines_as_tubes,
        };
        let actor = MeshActor {
            mesh: Arc::new(mesh.clone()),
            mapper: mapper.clone(),
            property,
        };
        self.renderer.add_or_replace_actor(&name, Actor::Mesh(actor.clone()))?;
        self.meshes.insert(name.clone(), actor);
        self.last_mesh = Some(name.clone());
        log::debug!("added mesh '{name}' ({} points, {} cells)", mesh.point_count(), mesh.cell_count());

        if let Some(label) = &options.label {
            self.labels.push((label.clone(), color));
        }
        if options.reset_camera.unwrap_or(!self.camera_set) {
            self.renderer.reset_camera();
            self.camera_set = true;
        }
        self.mapper = Some(mapper.clone());

        if let Some(binding) = &binding {
            let title = match (&options.stitle, &options.scalars) {
                (Some(title), _) => Some(title.clone()),
                (None, Some(ScalarSpec::Values(_))) => None,
                (None, _) => Some(binding.array_name.clone()),
            };
            if let Some(title) = title.filter(|_| options.show_scalar_bar) {
                let bar = ScalarBarOptions {
                    title: Some(title),
                    mapper: Some(mapper),
                    ..options.scalar_bar.clone()
                };
                self.add_scalar_bar(&bar)?;
            }
        }

        Ok(name)
    }

    /// Adds raw points as a point cloud, drawn as points unless a style is given.
    pub fn add_points(&mut self, points: Vec<Vec3>, options: &MeshOptions) -> Result<String> {
        self.add_point_cloud(&mut Mesh::point_cloud(points), options)
    }

    fn add_point_cloud(&mut self, mesh: &mut Mesh, options: &MeshOptions) -> Result<String> {
        let options = MeshOptions {
            style: Some(options.style.unwrap_or(Representation::Points)),
            ..options.clone()
        };
        self.add_mesh(mesh, &options)
    }

    /// Adds every mesh of a multi-block, returning the actor names in order.
    ///
    /// Scalars must be given by name. Blocks without that array are drawn
    /// without scalars. When no range is given, the range spans the array
    /// across all blocks.
    pub fn add_multi_block(&mut self, block: MultiBlock, options: &MeshOptions) -> Result<Vec<String>> {
        self.ensure_open()?;

        let scalar_name = match &options.scalars {
            Some(ScalarSpec::Values(_)) => return Err(MeshplotError::MultiBlockScalarsMustBeNamed),
            Some(ScalarSpec::Name(name)) => Some(name.clone()),
            None => None,
        };
        let range = match (&scalar_name, options.range) {
            (_, Some(range)) => Some(range),
            (Some(name), None) => block
                .data_range(name)
                .map(|(min, max)| RangeSpec::Bounds(min, max)),
            (None, None) => None,
        };
        let prefix = match &options.name {
            Some(name) => name.clone(),
            None => self.next_actor_name("MultiBlock"),
        };

        let leaves = block.flatten(&prefix);
        log::info!("adding multi-block '{prefix}' with {} meshes", leaves.len());

        let mut names = Vec::with_capacity(leaves.len());
        for (idx, (leaf_name, mut mesh)) in leaves.into_iter().enumerate() {
            let scalars = scalar_name
                .as_deref()
                .filter(|name| has_array(&mesh, name))
                .map(ScalarSpec::from);
            let color = if options.multi_colors {
                Some(ColorSpec::from(MULTI_COLORS[idx % MULTI_COLORS.len()]))
            } else {
                options.color.clone()
            };
            let leaf_options = MeshOptions {
                name: Some(leaf_name),
                scalars,
                range,
                color,
                ..options.clone()
            };
            names.push(self.add_mesh(&mut mesh, &leaf_options)?);
        }
        self.multi_blocks.insert(prefix, names.clone());
        Ok(names)
    }

    /// Adds any plot input. Returns one actor name per mesh added.
    pub fn add(&mut self, input: impl Into<PlotInput>, options: &MeshOptions) -> Result<Vec<String>> {
        match normalize(input.into()) {
            Normalized::Mesh(mut mesh) => Ok(vec![self.add_mesh(&mut mesh, options)?]),
            Normalized::PointCloud(mut mesh) => Ok(vec![self.add_point_cloud(&mut mesh, options)?]),
            Normalized::MultiBlock(block) => self.add_multi_block(block, options),
        }
    }

    /// Adds a scalar bar for a mapper.
    ///
    /// A title that already has a bar does not get a second one: the mapper
    /// joins that bar and its range is merged in. Returns the new actor name,
    /// or `None` when merged into an existing bar.
    pub fn add_scalar_bar(&mut self, options: &ScalarBarOptions) -> Result<Option<String>> {
        self.ensure_open()?;

        let mapper = options
            .mapper
            .clone()
            .or_else(|| self.mapper.clone())
            .ok_or(MeshplotError::NoMapper)?;

        if let Some(title) = &options.title {
            if self.colorbars.contains(title) {
                let range = mapper.scalar_range();
                self.colorbars.attach_mapper(title, mapper)?;
                let merged = self.colorbars.merge_range(title, range)?;
                log::debug!("scalar bar '{title}' shared, range now {merged}");
                return Ok(None);
            }
        }

        let family = match &options.font_family {
            Some(name) => parse_font_family(name)?,
            None => self.theme.font.family,
        };
        let text_color = ColorResolver::with_default_spec(&self.theme.font.color)?
            .resolve(options.color.as_ref())?;

        let slot = match &options.title {
            Some(title) => self.colorbars.acquire(title)?,
            None => self.colorbars.acquire_untitled()?,
        };

        let vertical = options.vertical.unwrap_or(false);
        let orientation = if vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let base = self.theme.colorbar_layout(vertical);
        let layout = ColorbarLayout {
            width: options.width.unwrap_or(base.width),
            height: options.height.unwrap_or(base.height),
            ..base
        };
        let (slot_x, slot_y) = slot_position(slot, orientation, &layout);
        let position = clamp_to_viewport(
            options.position_x.unwrap_or(slot_x),
            options.position_y.unwrap_or(slot_y),
            layout.width,
            layout.height,
        );

        let title_size = options.title_font_size.or(self.theme.font.title_size);
        let label_size = options.label_font_size.or(self.theme.font.label_size);
        let text = TextStyle {
            family,
            color: text_color,
            bold: options.bold,
            italic: options.italic,
            shadow: options.shadow,
            font_size: None,
        };

        if let Some(title) = &options.title {
            let range = mapper.scalar_range();
            self.colorbars.attach_mapper(title, mapper.clone())?;
            self.colorbars.merge_range(title, range)?;
        }

        let actor = Actor::ScalarBar(ScalarBarActor {
            title: options.title.clone(),
            mapper,
            n_labels: options.n_labels,
            orientation,
            position,
            size: (layout.width, layout.height),
            title_style: TextStyle {
                font_size: title_size,
                ..text.clone()
            },
            label_style: TextStyle {
                font_size: label_size,
                ..text
            },
            unconstrained_font_size: title_size.is_none() || label_size.is_none(),
            interactive: options.interactive.unwrap_or(self.theme.interactive),
        });
        let name = match &options.title {
            Some(title) => format!("scalar-bar-{title}"),
            None => format!("scalar-bar({slot:#x})"),
        };
        self.renderer.add_or_replace_actor(&name, actor)?;
        self.scalar_bars.push(name.clone());
        log::debug!("scalar bar '{name}' in slot {slot} at ({:.2}, {:.2})", position.0, position.1);

        Ok(Some(name))
    }

    /// Removes an actor by name. Returns false if there was none.
    pub fn remove_actor(&mut self, name: &str) -> bool {
        self.scalar_bars.retain(|bar| bar != name);
        self.meshes.remove(name);
        if self.last_mesh.as_deref() == Some(name) {
            self.last_mesh = None;
        }
        for leaves in self.multi_blocks.values_mut() {
            leaves.retain(|leaf| leaf != name);
        }
        self.renderer.remove_actor(name)
    }

    /// Replaces the values of the active scalars of a plotted mesh.
    ///
    /// `target` is a name returned by [`add_mesh`](Self::add_mesh) or the
    /// prefix given to [`add_multi_block`](Self::add_multi_block), in which
    /// case every block is updated with the same values. `None` updates the
    /// most recently added mesh. Values are routed to point or cell data by
    /// length and must land on that store's active array. A named array is
    /// looked up on the mesh and copied into the active array.
    ///
    /// Only the plotted snapshot changes; the mapper range is kept.
    pub fn update_scalars(&mut self, scalars: impl Into<ScalarSpec>, target: Option<&str>) -> Result<()> {
        self.ensure_open()?;
        let scalars = scalars.into();

        let names = match target {
            None => vec![self.last_mesh.clone().ok_or(MeshplotError::NoMapper)?],
            Some(name) if self.meshes.contains_key(name) => vec![name.to_string()],
            Some(name) => self
                .multi_blocks
                .get(name)
                .cloned()
                .ok_or_else(|| MeshplotError::UnknownActor(name.to_string()))?,
        };
        for name in &names {
            self.update_mesh_scalars(name, &scalars)?;
        }
        Ok(())
    }

    fn update_mesh_scalars(&mut self, name: &str, scalars: &ScalarSpec) -> Result<()> {
        let actor = self
            .meshes
            .get_mut(name)
            .ok_or_else(|| MeshplotError::UnknownActor(name.to_string()))?;
        let mesh = Arc::make_mut(&mut actor.mesh);
        let values = match scalars {
            ScalarSpec::Values(values) => values.clone(),
            ScalarSpec::Name(array) => lookup_array(&*mesh, array, Association::Cell)?.clone(),
        };
        let association = update_active_scalars(mesh, &values)?;
        let actor = Actor::Mesh(actor.clone());
        self.renderer.add_or_replace_actor(name, actor)?;
        log::debug!("updated {association:?} scalars of '{name}'");
        Ok(())
    }

    /// Removes the most recently added scalar bar.
    ///
    /// Its slot stays reserved until the session is cleared.
    pub fn remove_scalar_bar(&mut self) -> bool {
        match self.scalar_bars.pop() {
            Some(name) => self.renderer.remove_actor(&name),
            None => false,
        }
    }

    /// Adds a legend, replacing any existing one.
    pub fn add_legend(&mut self, options: &LegendOptions) -> Result<String> {
        self.ensure_open()?;

        let entries = match &options.labels {
            Some(labels) => labels
                .iter()
                .map(|(label, color)| Ok((label.clone(), parse_color(color)?)))
                .collect::<Result<Vec<_>>>()?,
            None => self.labels.clone(),
        };
        if entries.is_empty() {
            return Err(MeshplotError::NoLegendLabels);
        }

        let actor = Actor::Legend(LegendActor {
            entries,
            background: parse_color(&options.background)?,
            border: options.border,
            size: options.size,
        });
        self.renderer.add_or_replace_actor(LEGEND_NAME, actor)?;
        Ok(LEGEND_NAME.to_string())
    }

    /// Removes the legend. Returns false if there was none.
    pub fn remove_legend(&mut self) -> bool {
        self.renderer.remove_actor(LEGEND_NAME)
    }

    /// Sets the background color; `None` restores the theme background.
    pub fn set_background(&mut self, color: Option<&ColorSpec>) -> Result<()> {
        self.ensure_open()?;
        let color = ColorResolver::with_default_spec(&self.theme.background)?.resolve(color)?;
        self.renderer.set_background(color);
        Ok(())
    }

    /// Removes every actor and resets colorbars, labels and the current mapper.
    pub fn clear(&mut self) {
        self.renderer.remove_all_actors();
        self.reset_state();
        log::debug!("plotter cleared");
    }

    /// Closes the session and finalizes the renderer.
    ///
    /// Later calls that change the scene return [`MeshplotError::SessionClosed`].
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.reset_state();
        self.renderer.finalize();
        self.closed = true;
        log::info!("plotter closed");
    }

    fn reset_state(&mut self) {
        self.colorbars.release_all();
        self.mapper = None;
        self.scalar_bars.clear();
        self.labels.clear();
        self.meshes.clear();
        self.last_mesh = None;
        self.multi_blocks.clear();
        self.camera_set = false;
    }

    /// Renders one frame.
    pub fn render(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.renderer.render()?;
        Ok(())
    }

    /// Shows the scene, blocking until the renderer returns.
    pub fn show(&mut self) -> Result<()> {
        let _ = env_logger::try_init();
        self.ensure_open()?;
        self.renderer.show()?;
        Ok(())
    }
}

impl std::fmt::Debug for Plotter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plotter")
            .field("colorbars", &self.colorbars.len())
            .field("labels", &self.labels.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

fn has_array(mesh: &Mesh, name: &str) -> bool {
    mesh.get_array(name, Association::Point).is_some()
        || mesh.get_array(name, Association::Cell).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshplot_core::{ScalarRange, MAX_COLOR_BARS};
    use proptest::prelude::*;

    fn triangle() -> Mesh {
        Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![vec![0, 1, 2]])
    }

    fn headless(plotter: &Plotter) -> &HeadlessRenderer {
        plotter.renderer_as::<HeadlessRenderer>().unwrap()
    }

    #[test]
    fn test_default_names_and_camera() {
        let mut plotter = Plotter::headless().unwrap();
        let a = plotter.add_mesh(&mut triangle(), &MeshOptions::default()).unwrap();
        let b = plotter.add_mesh(&mut triangle(), &MeshOptions::default()).unwrap();
        assert_eq!(a, "PolyData(0x0)");
        assert_eq!(b, "PolyData(0x1)");
        assert_eq!(headless(&plotter).camera_resets(), 1);
    }

    #[test]
    fn test_flat_color_skips_binding() {
        let mut plotter = Plotter::headless().unwrap();
        let mut mesh = triangle();
        mesh.add_point_array("height", vec![0.0_f64, 1.0, 2.0]);
        mesh.set_active_scalars("height", Association::Point);

        let name = plotter
            .add_mesh(&mut mesh, &MeshOptions::default().color("red"))
            .unwrap();
        let actor = headless(&plotter).actor(&name).unwrap().as_mesh().unwrap();
        assert_eq!(actor.property.color, Vec3::X);
        assert_eq!(actor.mapper.scalar_mode(), ScalarMode::FieldData);
        assert!(plotter.colorbars().is_empty());
    }

    #[test]
    fn test_active_scalars_get_a_bar() {
        let mut plotter = Plotter::headless().unwrap();
        let mut mesh = triangle();
        mesh.add_point_array("height", vec![0.0_f64, 1.0, 2.0]);
        mesh.set_active_scalars("height", Association::Point);

        plotter.add_mesh(&mut mesh, &MeshOptions::default()).unwrap();
        assert_eq!(plotter.colorbars().range_of("height"), Some(ScalarRange::new(0.0, 2.0)));
        assert_eq!(plotter.scalar_bar_names(), ["scalar-bar-height"]);
    }

    #[test]
    fn test_raw_values_without_title_get_no_bar() {
        let mut plotter = Plotter::headless().unwrap();
        plotter
            .add_mesh(&mut triangle(), &MeshOptions::default().scalars(vec![1.0_f64, 2.0, 3.0]))
            .unwrap();
        assert!(plotter.colorbars().is_empty());
        assert_eq!(plotter.mapper().unwrap().scalar_range(), ScalarRange::new(1.0, 3.0));
    }

    #[test]
    fn test_wireframe_uses_outline_color() {
        let mut theme = Theme::default();
        theme.outline_color = ColorSpec::from("blue");
        let mut plotter = Plotter::with_theme(HeadlessRenderer::new(), theme).unwrap();
        let options = MeshOptions::default()
            .style(Representation::Wireframe)
            .color("red");
        let red = plotter.add_mesh(&mut triangle(), &options).unwrap();
        let options = MeshOptions::default().style(Representation::Wireframe);
        let blue = plotter.add_mesh(&mut triangle(), &options).unwrap();

        let color = |name: &str| headless(&plotter).actor(name).unwrap().as_mesh().unwrap().property.color;
        assert_eq!(color(&red), Vec3::X);
        assert_eq!(color(&blue), Vec3::Z);
    }

    #[test]
    fn test_untitled_bars_hold_slots() {
        let mut plotter = Plotter::headless().unwrap();
        plotter.add_mesh(&mut triangle(), &MeshOptions::default().color("w")).unwrap();
        for _ in 0..MAX_COLOR_BARS {
            plotter.add_scalar_bar(&ScalarBarOptions::default()).unwrap();
        }
        assert_eq!(plotter.colorbars().free_slots(), 0);
        assert!(matches!(
            plotter.add_scalar_bar(&ScalarBarOptions::default()),
            Err(MeshplotError::ColorbarCapacityExceeded { capacity: 10 })
        ));
    }

    #[test]
    fn test_untitled_bars_never_merge_with_titles() {
        let mut plotter = Plotter::headless().unwrap();
        plotter.add_mesh(&mut triangle(), &MeshOptions::default().color("w")).unwrap();
        let untitled = plotter.add_scalar_bar(&ScalarBarOptions::default()).unwrap();
        let titled = ScalarBarOptions {
            title: Some("untitled-0".to_string()),
            ..ScalarBarOptions::default()
        };
        let titled = plotter.add_scalar_bar(&titled).unwrap();

        assert_eq!(untitled.as_deref(), Some("scalar-bar(0x0)"));
        assert_eq!(titled.as_deref(), Some("scalar-bar-untitled-0"));
        assert_eq!(plotter.colorbars().slot_of("untitled-0"), Some(1));
        assert_eq!(plotter.colorbars().untitled_slots(), &[0]);
        assert_eq!(headless(&plotter).len(), 3);
    }

    #[test]
    fn test_update_point_and_cell_scalars() {
        let mut plotter = Plotter::headless().unwrap();
        let mut mesh = triangle();
        mesh.add_point_array("height", vec![0.0_f64, 1.0, 2.0]);
        mesh.add_point_array("depth", vec![7.0_f64, 8.0, 9.0]);
        let points = plotter
            .add_mesh(&mut mesh, &MeshOptions::default().scalars("height"))
            .unwrap();
        plotter
            .add_mesh(&mut triangle(), &MeshOptions::default().scalars(vec![4.0_f64]).stitle("cell"))
            .unwrap();

        plotter.update_scalars(vec![5.0_f64], None).unwrap();
        plotter.update_scalars("depth", Some(points.as_str())).unwrap();

        let active = |name: &str| {
            let actor = headless(&plotter).actor(name).unwrap().as_mesh().unwrap();
            let (array, assoc, values) = actor.mesh.active_scalars().unwrap();
            (array.to_string(), assoc, values.to_f64())
        };
        assert_eq!(
            active(&points),
            ("height".to_string(), Association::Point, vec![7.0, 8.0, 9.0])
        );
        assert_eq!(
            active("PolyData(0x1)"),
            ("cell".to_string(), Association::Cell, vec![5.0])
        );
        // the caller's mesh is untouched
        assert_eq!(mesh.get_array("height", Association::Point).unwrap().to_f64(), vec![0.0, 1.0, 2.0]);
        assert_eq!(plotter.colorbars().range_of("cell"), Some(ScalarRange::new(4.0, 4.0)));
    }

    #[test]
    fn test_update_scalars_errors() {
        let mut plotter = Plotter::headless().unwrap();
        assert!(matches!(
            plotter.update_scalars(vec![1.0_f64], None),
            Err(MeshplotError::NoMapper)
        ));

        let flat = plotter.add_mesh(&mut triangle(), &MeshOptions::default().color("red")).unwrap();
        assert!(matches!(
            plotter.update_scalars(vec![1.0_f64, 2.0, 3.0], None),
            Err(MeshplotError::NoActiveScalars(Association::Point))
        ));
        assert!(matches!(
            plotter.update_scalars(vec![1.0_f64, 2.0], Some(flat.as_str())),
            Err(MeshplotError::ScalarSizeMismatch { actual: 2, points: 3, cells: 1 })
        ));
        assert!(matches!(
            plotter.update_scalars(vec![1.0_f64], Some("missing")),
            Err(MeshplotError::UnknownActor(_))
        ));

        assert!(plotter.remove_actor(&flat));
        assert!(matches!(
            plotter.update_scalars(vec![1.0_f64], None),
            Err(MeshplotError::NoMapper)
        ));
    }

    #[test]
    fn test_scalar_bar_layout() {
        let mut plotter = Plotter::headless().unwrap();
        plotter.add_mesh(&mut triangle(), &MeshOptions::default()).unwrap();

        let options = ScalarBarOptions {
            title: Some("a".to_string()),
            ..ScalarBarOptions::default()
        };
        plotter.add_scalar_bar(&options).unwrap();
        let options = ScalarBarOptions {
            title: Some("b".to_string()),
            vertical: Some(true),
            font_family: Some("Times".to_string()),
            title_font_size: Some(20),
            label_font_size: Some(14),
            ..ScalarBarOptions::default()
        };
        let name = plotter.add_scalar_bar(&options).unwrap().unwrap();

        let bar = headless(&plotter).actor(&name).unwrap().as_scalar_bar().unwrap();
        assert_eq!(bar.orientation, Orientation::Vertical);
        assert_eq!(bar.title_style.family, meshplot_core::FontFamily::Times);
        assert!(!bar.unconstrained_font_size);
        // slot 1, stacked upward by one height and shifted back on screen
        assert!((bar.position.0 - 0.85).abs() < 1e-6);
        assert!((bar.position.1 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_font_does_not_take_a_slot() {
        let mut plotter = Plotter::headless().unwrap();
        plotter.add_mesh(&mut triangle(), &MeshOptions::default()).unwrap();
        let options = ScalarBarOptions {
            title: Some("t".to_string()),
            font_family: Some("comic sans".to_string()),
            ..ScalarBarOptions::default()
        };
        assert!(matches!(
            plotter.add_scalar_bar(&options),
            Err(MeshplotError::InvalidFontSpec(_))
        ));
        assert!(plotter.colorbars().is_empty());
    }

    #[test]
    fn test_remove_scalar_bar_keeps_slot() {
        let mut plotter = Plotter::headless().unwrap();
        plotter
            .add_mesh(&mut triangle(), &MeshOptions::default().scalars(vec![1.0_f64, 2.0, 3.0]).stitle("t"))
            .unwrap();
        assert!(plotter.remove_scalar_bar());
        assert!(!plotter.remove_scalar_bar());
        assert_eq!(plotter.colorbars().slot_of("t"), Some(0));
        assert!(headless(&plotter).actor("scalar-bar-t").is_none());
    }

    #[test]
    fn test_no_mapper() {
        let mut plotter = Plotter::headless().unwrap();
        assert!(matches!(
            plotter.add_scalar_bar(&ScalarBarOptions::default()),
            Err(MeshplotError::NoMapper)
        ));
    }

    proptest! {
        #[test]
        fn prop_slots_match_titles(titles in proptest::collection::vec(0usize..14, 1..40)) {
            let mut plotter = Plotter::headless().unwrap();
            for title in titles {
                let options = MeshOptions::default()
                    .scalars(vec![0.0_f64, 1.0, 2.0])
                    .stitle(format!("t{title}"));
                let result = plotter.add_mesh(&mut triangle(), &options);
                let is_full = matches!(result, Err(MeshplotError::ColorbarCapacityExceeded { .. }));
                prop_assert!(result.is_ok() || is_full);
                let bars = plotter.colorbars();
                prop_assert_eq!(bars.len() + bars.free_slots(), MAX_COLOR_BARS);
            }
        }
    }

    #[test]
    fn test_background() {
        let mut plotter = Plotter::headless().unwrap();
        assert!((headless(&plotter).background() - Vec3::splat(0.3)).length() < 1e-6);
        plotter.set_background(Some(&ColorSpec::from("k"))).unwrap();
        assert_eq!(headless(&plotter).background(), Vec3::ZERO);
        plotter.set_background(None).unwrap();
        assert!((headless(&plotter).background() - Vec3::splat(0.3)).length() < 1e-6);
    }
}
