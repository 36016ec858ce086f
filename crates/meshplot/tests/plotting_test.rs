//! Plotting session integration tests against the headless renderer.

use meshplot::*;

/// A mesh with 8 points and 6 cells.
fn box_mesh() -> Mesh {
    let points = (0..8_u8)
        .map(|i| {
            Vec3::new(
                f32::from(i & 1),
                f32::from((i >> 1) & 1),
                f32::from(i >> 2),
            )
        })
        .collect();
    let cells = vec![
        vec![0, 1, 3, 2],
        vec![4, 5, 7, 6],
        vec![0, 1, 5, 4],
        vec![2, 3, 7, 6],
        vec![0, 2, 6, 4],
        vec![1, 3, 7, 5],
    ];
    Mesh::new(points, cells)
}

fn scene(plotter: &Plotter) -> &HeadlessRenderer {
    plotter
        .renderer_as::<HeadlessRenderer>()
        .expect("headless renderer")
}

#[test]
fn test_association_scenario() {
    let mut plotter = Plotter::headless().unwrap();

    let mut mesh = box_mesh();
    mesh.add_point_array("temp", vec![20.0_f64, 21.0, 22.0, 23.0, 24.0, 25.0, 26.0, 27.0]);
    plotter
        .add_mesh(&mut mesh, &MeshOptions::default().scalars("temp"))
        .unwrap();
    let mapper = plotter.mapper().unwrap();
    assert_eq!(mapper.scalar_mode(), ScalarMode::PointData);
    assert_eq!(mapper.array_name().as_deref(), Some("temp"));
    assert_eq!(plotter.colorbars().range_of("temp"), Some(ScalarRange::new(20.0, 27.0)));

    let mut mesh = box_mesh();
    plotter
        .add_mesh(
            &mut mesh,
            &MeshOptions::default().scalars(vec![1.0_f64; 6]).stitle("per cell"),
        )
        .unwrap();
    assert_eq!(plotter.mapper().unwrap().scalar_mode(), ScalarMode::CellData);
    assert!(mesh.cell_data().contains("per cell"));

    let result = plotter.add_mesh(&mut box_mesh(), &MeshOptions::default().scalars(vec![1.0_f64; 7]));
    match result {
        Err(MeshplotError::ScalarSizeMismatch {
            actual,
            points,
            cells,
        }) => assert_eq!((actual, points, cells), (7, 8, 6)),
        other => panic!("expected a size mismatch, got {other:?}"),
    }
}

#[test]
fn test_shared_pressure_colorbar() {
    let mut plotter = Plotter::headless().unwrap();

    let first = plotter
        .add_mesh(
            &mut box_mesh(),
            &MeshOptions::default()
                .scalars(vec![0.0_f64; 8])
                .range((0.0_f64, 10.0_f64))
                .stitle("pressure"),
        )
        .unwrap();
    let second = plotter
        .add_mesh(
            &mut box_mesh(),
            &MeshOptions::default()
                .scalars(vec![0.0_f64; 8])
                .range((5.0_f64, 20.0_f64))
                .stitle("pressure"),
        )
        .unwrap();

    let merged = ScalarRange::new(0.0, 20.0);
    assert_eq!(plotter.colorbars().range_of("pressure"), Some(merged));
    assert_eq!(plotter.colorbars().len(), 1);
    assert_eq!(plotter.colorbars().mappers_of("pressure").len(), 2);

    for name in [&first, &second] {
        let actor = scene(&plotter).actor(name).unwrap().as_mesh().unwrap();
        assert_eq!(actor.mapper.scalar_range(), merged);
    }

    // only one bar actor, and it reads the merged range
    assert_eq!(plotter.scalar_bar_names(), ["scalar-bar-pressure"]);
    let bar = scene(&plotter)
        .actor("scalar-bar-pressure")
        .unwrap()
        .as_scalar_bar()
        .unwrap();
    assert_eq!(bar.range(), merged);
}

#[test]
fn test_capacity_and_clear() {
    let mut plotter = Plotter::headless().unwrap();
    let add = |plotter: &mut Plotter, i: usize| {
        plotter.add_mesh(
            &mut box_mesh(),
            &MeshOptions::default()
                .scalars(vec![0.5_f64; 8])
                .stitle(format!("field {i}")),
        )
    };

    for i in 0..MAX_COLOR_BARS {
        add(&mut plotter, i).unwrap();
        assert_eq!(plotter.colorbars().slot_of(&format!("field {i}")), Some(i));
    }
    assert!(matches!(
        add(&mut plotter, MAX_COLOR_BARS),
        Err(MeshplotError::ColorbarCapacityExceeded { capacity: 10 })
    ));

    // an existing title still merges at capacity
    add(&mut plotter, 3).unwrap();

    plotter.clear();
    assert!(plotter.colorbars().is_empty());
    assert_eq!(plotter.colorbars().free_slots(), MAX_COLOR_BARS);
    assert!(scene(&plotter).is_empty());
    assert!(plotter.mapper().is_none());

    add(&mut plotter, MAX_COLOR_BARS).unwrap();
    assert_eq!(
        plotter.colorbars().slot_of(&format!("field {MAX_COLOR_BARS}")),
        Some(0)
    );
}

#[test]
fn test_boolean_mask() {
    let mut plotter = Plotter::headless().unwrap();
    let mask = vec![true, false, true, false, false, true, true, false];
    plotter
        .add_mesh(
            &mut box_mesh(),
            &MeshOptions::default().scalars(mask).stitle("mask"),
        )
        .unwrap();
    assert_eq!(plotter.colorbars().range_of("mask"), Some(ScalarRange::new(0.0, 1.0)));
}

#[test]
fn test_zero_range_is_unset() {
    let mut plotter = Plotter::headless().unwrap();
    plotter
        .add_mesh(&mut box_mesh(), &MeshOptions::default().scalars(vec![0.0_f64; 8]))
        .unwrap();
    assert_eq!(plotter.mapper().unwrap().scalar_range(), ScalarRange::new(0.0, 1.0));

    plotter.theme_mut().zero_range_is_unset = false;
    plotter
        .add_mesh(&mut box_mesh(), &MeshOptions::default().scalars(vec![0.0_f64; 8]))
        .unwrap();
    assert_eq!(plotter.mapper().unwrap().scalar_range(), ScalarRange::new(0.0, 0.0));
}

#[test]
fn test_multi_block() {
    let mut plotter = Plotter::headless().unwrap();

    let mut hot = box_mesh();
    hot.add_point_array("temp", vec![50.0_f64; 8]);
    let mut cold = box_mesh();
    cold.add_cell_array("temp", vec![-5.0_f64; 6]);
    let bare = box_mesh();

    let mut nested = MultiBlock::new();
    nested.push_mesh(cold).push_empty();
    let mut block = MultiBlock::new();
    block.push_mesh(hot).push_multi_block(nested).push_mesh(bare);

    assert!(matches!(
        plotter.add_multi_block(
            block.clone(),
            &MeshOptions::default().scalars(vec![1.0_f64; 8])
        ),
        Err(MeshplotError::MultiBlockScalarsMustBeNamed)
    ));

    let names = plotter
        .add(
            block,
            &MeshOptions::default().scalars("temp").name("blocks"),
        )
        .unwrap();
    assert_eq!(names, ["blocks-0", "blocks-1-0", "blocks-2"]);

    let range = ScalarRange::new(-5.0, 50.0);
    assert_eq!(plotter.colorbars().range_of("temp"), Some(range));
    assert_eq!(plotter.colorbars().mappers_of("temp").len(), 2);

    let bare = scene(&plotter).actor("blocks-2").unwrap().as_mesh().unwrap();
    assert_eq!(bare.mapper.scalar_mode(), ScalarMode::FieldData);
}

#[test]
fn test_multi_colors() {
    let mut plotter = Plotter::headless().unwrap();
    let mut block = MultiBlock::new();
    block.push_mesh(box_mesh()).push_mesh(box_mesh());

    let options = MeshOptions {
        multi_colors: true,
        ..MeshOptions::default()
    };
    let names = plotter.add(block, &options).unwrap();

    let colors: Vec<Vec3> = names
        .iter()
        .map(|name| scene(&plotter).actor(name).unwrap().as_mesh().unwrap().property.color)
        .collect();
    assert_eq!(colors[0], parse_color(&MULTI_COLORS[0].into()).unwrap());
    assert_eq!(colors[1], parse_color(&MULTI_COLORS[1].into()).unwrap());
}

#[test]
fn test_points_input() {
    let mut plotter = Plotter::headless().unwrap();
    let names = plotter
        .add(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &MeshOptions::default())
        .unwrap();
    assert_eq!(names, ["PointCloud(0x0)"]);

    let actor = scene(&plotter).actor(&names[0]).unwrap().as_mesh().unwrap();
    assert_eq!(actor.property.representation, Representation::Points);
    assert_eq!(actor.mesh.point_count(), 3);
}

#[test]
fn test_legend() {
    let mut plotter = Plotter::headless().unwrap();
    assert!(matches!(
        plotter.add_legend(&LegendOptions::default()),
        Err(MeshplotError::NoLegendLabels)
    ));

    plotter
        .add_mesh(&mut box_mesh(), &MeshOptions::default().color("red").label("walls"))
        .unwrap();
    let name = plotter.add_legend(&LegendOptions::default()).unwrap();
    let legend = scene(&plotter).actor(&name).unwrap().as_legend().unwrap();
    assert_eq!(legend.entries, vec![("walls".to_string(), Vec3::X)]);

    let options = LegendOptions {
        labels: Some(vec![("floor".to_string(), ColorSpec::from("#0000ff"))]),
        ..LegendOptions::default()
    };
    plotter.add_legend(&options).unwrap();
    let legend = scene(&plotter).actor(&name).unwrap().as_legend().unwrap();
    assert_eq!(legend.entries, vec![("floor".to_string(), Vec3::Z)]);

    assert!(plotter.remove_legend());
    assert!(!plotter.remove_legend());
}

#[test]
fn test_invalid_inputs() {
    let mut plotter = Plotter::headless().unwrap();
    assert!(matches!(
        plotter.add_mesh(&mut box_mesh(), &MeshOptions::default().color("not-a-color")),
        Err(MeshplotError::InvalidColorSpec(_))
    ));
    assert!(matches!(
        plotter.add_mesh(&mut box_mesh(), &MeshOptions::default().scalars("missing")),
        Err(MeshplotError::ScalarArrayNotFound(_))
    ));
    assert!(matches!(
        plotter.add_mesh(
            &mut box_mesh(),
            &MeshOptions::default().scalars(vec![1.0_f64; 8]).cmap("nope")
        ),
        Err(MeshplotError::UnknownColorMap(_))
    ));
    assert!(scene(&plotter).is_empty());
    assert!(plotter.colorbars().is_empty());
}

#[test]
fn test_replace_and_remove_actor() {
    let mut plotter = Plotter::headless().unwrap();
    let options = MeshOptions::default().name("part");
    plotter.add_mesh(&mut box_mesh(), &options).unwrap();
    plotter
        .add_mesh(&mut box_mesh(), &options.clone().color("red"))
        .unwrap();
    assert_eq!(scene(&plotter).actor_names(), ["part"]);

    assert!(plotter.remove_actor("part"));
    assert!(!plotter.remove_actor("part"));
}

#[test]
fn test_close() {
    let mut plotter = Plotter::headless().unwrap();
    plotter
        .add_mesh(&mut box_mesh(), &MeshOptions::default().scalars(vec![1.0_f64; 8]).stitle("t"))
        .unwrap();
    plotter.render().unwrap();
    assert_eq!(scene(&plotter).frames(), 1);

    plotter.close();
    assert!(plotter.is_closed());
    assert!(scene(&plotter).is_finalized());
    assert!(plotter.colorbars().is_empty());

    assert!(matches!(
        plotter.add_mesh(&mut box_mesh(), &MeshOptions::default()),
        Err(MeshplotError::SessionClosed)
    ));
    assert!(matches!(plotter.render(), Err(MeshplotError::SessionClosed)));
    assert!(matches!(
        plotter.add_scalar_bar(&ScalarBarOptions::default()),
        Err(MeshplotError::SessionClosed)
    ));
    plotter.close();
}

#[test]
fn test_named_theme() {
    let theme = Theme::named("document").unwrap();
    let mut plotter = Plotter::with_theme(HeadlessRenderer::new(), theme).unwrap();
    assert_eq!(scene(&plotter).background(), Vec3::ONE);

    let name = plotter.add_mesh(&mut box_mesh(), &MeshOptions::default()).unwrap();
    let actor = scene(&plotter).actor(&name).unwrap().as_mesh().unwrap();
    assert_eq!(actor.property.color, parse_color(&"orange".into()).unwrap());
}

#[test]
fn test_update_multi_block_scalars() {
    let mut plotter = Plotter::headless().unwrap();

    let mut block = MultiBlock::new();
    for value in [1.0_f64, 2.0] {
        let mut mesh = box_mesh();
        mesh.add_point_array("temp", vec![value; 8]);
        block.push_mesh(mesh);
    }
    plotter
        .add_multi_block(block, &MeshOptions::default().scalars("temp").name("parts"))
        .unwrap();

    let ramp: Vec<f64> = (0..8).map(f64::from).collect();
    plotter.update_scalars(ramp.clone(), Some("parts")).unwrap();
    for leaf in ["parts-0", "parts-1"] {
        let actor = scene(&plotter).actor(leaf).unwrap().as_mesh().unwrap();
        let (name, association, values) = actor.mesh.active_scalars().unwrap();
        assert_eq!((name, association), ("temp", Association::Point));
        assert_eq!(values.to_f64(), ramp);
    }
    assert_eq!(plotter.colorbars().range_of("temp"), Some(ScalarRange::new(1.0, 2.0)));

    // a point-sized update never lands on cell data
    let mut cells = box_mesh();
    cells.add_cell_array("id", vec![0.0_f64; 6]);
    plotter
        .add_mesh(&mut cells, &MeshOptions::default().scalars("id"))
        .unwrap();
    assert!(matches!(
        plotter.update_scalars(vec![0.0_f64; 8], None),
        Err(MeshplotError::NoActiveScalars(Association::Point))
    ));
    plotter.update_scalars(vec![3.0_f64; 6], None).unwrap();
}
