use approx::assert_relative_eq;
use glam::{DMat4, DVec3};
use meshgen_kernel::assembly::{bridge, sample_bezier, BezierPoint};
use meshgen_kernel::construct::{
    arc_center, copy_template_onto_selection, tangent_points_from_pole, voronoi_cells,
    Circle, CopyOptions, Selection, TargetMesh,
};
use meshgen_kernel::math::normalize_or_zero;
use meshgen_kernel::primitives::{
    DiamondParams, FunctionSurfaceParams, GemParams, SpindleParams, StarParams,
    TriangleParams, TriangleTopology, TwistedTorusParams, WedgeParams,
};
use meshgen_kernel::{Mesh, PrimitiveParams};

fn check_counts<P: PrimitiveParams>(params: &P) -> Mesh {
    let mesh = params.build().unwrap();
    assert_eq!(mesh.vertex_count(), params.vertex_count());
    assert_eq!(mesh.face_count(), params.face_count());
    for face in &mesh.faces {
        assert!(face.len() >= 3);
        assert!(face.iter().all(|&i| i < mesh.vertex_count()));
    }
    mesh
}

#[test]
fn every_builder_matches_declared_counts() {
    check_counts(&DiamondParams::default());
    check_counts(&GemParams::default());
    check_counts(&SpindleParams::default());
    check_counts(&SpindleParams {
        height: 0.0,
        ..SpindleParams::default()
    });
    check_counts(&StarParams::default());
    check_counts(&WedgeParams::default());
    check_counts(&TwistedTorusParams::default());
    check_counts(&FunctionSurfaceParams::default());
    for topology in [
        TriangleTopology::OneTri,
        TriangleTopology::ThreeTris,
        TriangleTopology::ThreeQuads,
        TriangleTopology::SixQuads,
    ] {
        check_counts(&TriangleParams {
            topology,
            ..TriangleParams::default()
        });
    }
}

#[test]
fn spindle_without_band() {
    let params = SpindleParams {
        segments: 12,
        height: 0.0,
        ..SpindleParams::default()
    };
    let mesh = check_counts(&params);
    assert_eq!(mesh.vertex_count(), 2 + 12);
    assert_eq!(mesh.face_count(), 2 * 12);
}

#[test]
fn builders_are_repeatable() {
    let params = GemParams::default();
    assert_eq!(params.build().unwrap(), params.build().unwrap());
    let params = StarParams::default();
    assert_eq!(params.build().unwrap(), params.build().unwrap());
}

#[test]
fn flipped_bridge_reverses_each_face() {
    let a = [0, 1, 2, 3];
    let b = [4, 5, 6, 7];
    let plain = bridge(&a, &b, false, false).unwrap();
    let flipped = bridge(&a, &b, false, true).unwrap();
    for (p, f) in plain.iter().zip(&flipped) {
        let reversed: Vec<usize> = p.iter().rev().copied().collect();
        assert_eq!(*f, reversed);
    }
}

#[test]
fn bridge_rejects_bad_rings() {
    assert!(bridge(&[], &[1, 2], false, false).is_err());
    assert!(bridge(&[0], &[1], false, false).is_err());
    assert!(bridge(&[0, 1], &[2, 3, 4], false, false).is_err());
}

#[test]
fn bezier_sample_count() {
    let points = [
        BezierPoint::vector(DVec3::ZERO),
        BezierPoint::vector(DVec3::X),
        BezierPoint::vector(DVec3::Y),
    ];
    assert_eq!(sample_bezier(&points, 4, false).unwrap().len(), 2 * 5);
    assert_eq!(sample_bezier(&points, 4, true).unwrap().len(), 3 * 5);
}

#[test]
fn arc_center_is_equidistant() {
    let points = [
        (DVec3::new(0.3, -1.2, 4.0), DVec3::new(2.0, 2.0, 2.0), DVec3::new(-5.0, 0.1, 1.0)),
        (DVec3::new(1e3, 0.0, 0.0), DVec3::new(0.0, 1e3, 0.0), DVec3::new(0.0, 0.0, 1e3)),
    ];
    for (a, b, c) in points {
        let arc = arc_center(a, b, c, 1e-9).unwrap();
        for p in [a, b, c] {
            assert_relative_eq!(arc.center.distance(p), arc.radius, epsilon = 1e-6, max_relative = 1e-9);
        }
    }
}

#[test]
fn tangent_points_are_perpendicular() {
    let circle = Circle::new(DVec3::new(-2.0, 3.0, 0.5), 0.75);
    for pole in [DVec3::new(4.0, 4.0, 0.5), DVec3::new(-2.0, -1.0, 0.5)] {
        let (a, b) = tangent_points_from_pole(&circle, pole).unwrap();
        for t in [a, b] {
            assert!((t - circle.center).dot(t - pole).abs() < 1e-9);
        }
    }
}

#[test]
fn voronoi_corners_are_nearest_to_their_site() {
    let bounds = [DVec3::splat(-2.0), DVec3::splat(2.0)];
    let sites = [
        DVec3::new(-1.0, -0.5, 0.2),
        DVec3::new(1.2, 0.3, -0.4),
        DVec3::new(0.1, 1.4, 0.9),
        DVec3::new(-0.3, -1.1, -1.3),
        DVec3::new(0.6, -0.2, 1.5),
    ];
    let cells = voronoi_cells(&bounds, &sites).unwrap();
    assert_eq!(cells.len(), sites.len());
    for cell in &cells {
        assert!(cell.vertices.len() >= 4);
        for corner in cell.world_vertices() {
            let own = corner.distance(cell.site);
            for other in &sites {
                assert!(own <= corner.distance(*other) + 1e-6);
            }
            assert!(corner.abs().max_element() <= 2.0 + 1e-6);
        }
        let hull = cell.to_mesh(1e-9).unwrap();
        assert!(hull.face_count() >= 4);
    }
}

#[test]
fn identity_template_lands_on_computed_positions() {
    let target = FunctionSurfaceParams {
        div_x: 3,
        div_y: 3,
        expression: "x * x".to_string(),
        ..FunctionSurfaceParams::default()
    }
    .build()
    .unwrap();
    let world = DMat4::from_scale_rotation_translation(
        DVec3::splat(2.0),
        glam::DQuat::from_rotation_z(0.3),
        DVec3::new(1.0, 2.0, 3.0),
    );
    let view = TargetMesh::new(&target, world).unwrap();
    let template = Mesh::from_parts(vec![DVec3::ZERO], vec![]);

    let faces = Selection::Faces((0..target.face_count()).collect());
    let copies = copy_template_onto_selection(&view, &template, &faces, &CopyOptions::default()).unwrap();
    assert_eq!(copies.len(), 4);
    for (face, copy) in copies.iter().enumerate() {
        let expected = world.transform_point3(target.face_center(face).unwrap());
        assert_eq!(copy.mesh.verts[0], expected);
    }

    let vertices = Selection::Vertices((0..target.vertex_count()).collect());
    let copies = copy_template_onto_selection(&view, &template, &vertices, &CopyOptions::default()).unwrap();
    for (v, copy) in copies.iter().enumerate() {
        assert_eq!(copy.mesh.verts[0], world.transform_point3(target.verts[v]));
    }
}

#[test]
fn normalize_is_idempotent() {
    let v = normalize_or_zero(DVec3::new(3.0, -4.0, 12.0));
    assert!(normalize_or_zero(v).distance(v) < 1e-12);
}
