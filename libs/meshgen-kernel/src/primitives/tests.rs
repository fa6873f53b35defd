//! Tests for the primitive builders.

use super::*;
use crate::error::KernelError;
use crate::math::Vector3;
use approx::assert_relative_eq;
use config::constants::KernelConfig;
use std::collections::HashMap;

/// Builds through the trait and checks the declared counts.
fn build_checked<P: PrimitiveParams>(params: &P) -> Mesh {
    let mesh = params.build().unwrap();
    assert_eq!(mesh.vertex_count(), params.vertex_count(), "{} vertices", P::NAME);
    assert_eq!(mesh.face_count(), params.face_count(), "{} faces", P::NAME);
    mesh.validate().unwrap();
    mesh
}

/// Every directed edge appears once and its reverse once.
fn assert_closed_and_consistent(mesh: &Mesh) {
    let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
    for face in &mesh.faces {
        for (k, &a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            *directed.entry((a, b)).or_default() += 1;
        }
    }
    for (&(a, b), &count) in &directed {
        assert_eq!(count, 1, "edge ({a}, {b}) used twice in one direction");
        assert!(directed.contains_key(&(b, a)), "edge ({a}, {b}) is open");
    }
}

/// Signed volume; positive when faces point outward.
fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.faces
        .iter()
        .map(|face| {
            let v0 = mesh.verts[face[0]];
            face.windows(2)
                .skip(1)
                .map(|pair| v0.dot(mesh.verts[pair[0]].cross(mesh.verts[pair[1]])))
                .sum::<f64>()
        })
        .sum::<f64>()
        / 6.0
}

fn assert_outward_solid(mesh: &Mesh) {
    assert_closed_and_consistent(mesh);
    assert!(signed_volume(mesh) > 0.0, "faces point inward");
}

// =============================================================================
// DIAMOND / GEM
// =============================================================================

/// Three segments give the tip, the table center and two rings of three.
#[test]
fn diamond_three_segments() {
    let params = DiamondParams {
        segments: 3,
        girdle_radius: 1.0,
        table_radius: 1.0,
        crown_height: 1.0,
        pavilion_height: 1.0,
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.verts[0], Vector3::new(0.0, 0.0, -1.0));
    assert_eq!(mesh.verts[1], Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 9);
    // Pavilion triangles, crown quads, table triangles.
    let sizes: Vec<usize> = mesh.faces.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 3, 3, 4, 4, 4, 3, 3, 3]);
    for (k, v) in mesh.verts[2..].iter().enumerate() {
        let expected_z = if k % 2 == 0 { 1.0 } else { 0.0 };
        assert_relative_eq!(v.z, expected_z);
        assert_relative_eq!(v.truncate().length(), 1.0, epsilon = 1e-12);
    }
}

/// Default diamonds are closed, outward-facing solids.
#[test]
fn diamond_is_outward_solid() {
    assert_outward_solid(&build_checked(&DiamondParams::default()));
}

/// Zero radii are rejected before anything is built.
#[test]
fn diamond_rejects_bad_parameters() {
    let params = DiamondParams {
        table_radius: 0.0,
        ..DiamondParams::default()
    };
    assert!(matches!(diamond(&params), Err(KernelError::InvalidArgument { .. })));
    let params = DiamondParams {
        segments: 2,
        ..DiamondParams::default()
    };
    assert!(matches!(diamond(&params), Err(KernelError::InvalidArgument { .. })));
}

/// Gems close with four triangles and two kites per segment.
#[test]
fn gem_is_outward_solid() {
    for segments in [3, 8, 17] {
        let mesh = build_checked(&GemParams {
            segments,
            ..GemParams::default()
        });
        let n = segments as usize;
        assert_eq!(mesh.vertex_count(), 2 + 4 * n);
        assert_eq!(mesh.face_count(), 6 * n);
        assert_eq!(mesh.faces.iter().filter(|f| f.len() == 3).count(), 4 * n);
        assert_eq!(mesh.faces.iter().filter(|f| f.len() == 4).count(), 2 * n);
        assert_outward_solid(&mesh);
    }
}

// =============================================================================
// SPINDLE / STAR / WEDGE
// =============================================================================

/// With a band there are two rings and three face bands.
#[test]
fn spindle_with_band() {
    let params = SpindleParams {
        segments: 6,
        radius: 1.0,
        height: 2.0,
        cap_height: 0.5,
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.vertex_count(), 14);
    assert_eq!(mesh.face_count(), 18);
    assert_relative_eq!(mesh.verts[0].z, 1.5);
    assert_relative_eq!(mesh.verts[1].z, -1.5);
    assert_outward_solid(&mesh);
}

/// Zero height drops the band and fans the lower tip onto the only ring.
#[test]
fn spindle_zero_height() {
    let params = SpindleParams {
        segments: 5,
        radius: 1.0,
        height: 0.0,
        cap_height: 1.0,
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.vertex_count(), 2 + 5);
    assert_eq!(mesh.face_count(), 2 * 5);
    assert!(mesh.faces.iter().all(|f| f.len() == 3));
    assert!(mesh.verts[2..].iter().all(|v| v.z == 0.0));
    assert_outward_solid(&mesh);
}

/// Negative heights are rejected; negative caps are not.
#[test]
fn spindle_parameter_ranges() {
    let bad = SpindleParams {
        height: -1.0,
        ..SpindleParams::default()
    };
    assert!(spindle(&bad).is_err());
    let sunk = SpindleParams {
        cap_height: -0.2,
        ..SpindleParams::default()
    };
    assert!(spindle(&sunk).is_ok());
}

/// Outline radii alternate, starting with a point on +X.
#[test]
fn star_outline_alternates() {
    let params = StarParams {
        points: 4,
        outer_radius: 2.0,
        inner_radius: 1.0,
        height: 1.0,
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.vertex_count(), 2 + 2 * 8);
    assert_eq!(mesh.face_count(), 24);
    assert_relative_eq!(mesh.verts[2].x, 2.0);
    assert_relative_eq!(mesh.verts[4].truncate().length(), 1.0, epsilon = 1e-12);
    assert_outward_solid(&mesh);
}

/// One point is not a star.
#[test]
fn star_rejects_single_point() {
    let params = StarParams {
        points: 1,
        ..StarParams::default()
    };
    assert!(star(&params).is_err());
}

/// The 2×2×2 wedge matches the fixed vertex and face tables.
#[test]
fn wedge_two_units() {
    let mesh = build_checked(&WedgeParams::default());
    let expected = [
        (-1.0, -1.0, 1.0),
        (-1.0, -1.0, -1.0),
        (1.0, -1.0, 1.0),
        (1.0, -1.0, -1.0),
        (-1.0, 1.0, 1.0),
        (-1.0, 1.0, -1.0),
    ];
    for (v, (x, y, z)) in mesh.verts.iter().zip(expected) {
        assert_eq!(*v, Vector3::new(x, y, z));
    }
    assert_eq!(
        mesh.faces,
        vec![
            vec![0, 2, 4],
            vec![1, 3, 5],
            vec![0, 1, 3, 2],
            vec![2, 3, 5, 4],
            vec![4, 5, 1, 0],
        ]
    );
}

/// Side quads of the wedge face away from the prism.
#[test]
fn wedge_sides_face_outward() {
    let mesh = wedge(&WedgeParams::default()).unwrap();
    let centroid = Vector3::new(-1.0, -1.0, 0.0) / 3.0;
    for face in 2..5 {
        let center = mesh.face_center(face).unwrap();
        let normal = mesh.face_normal(face).unwrap();
        assert!(normal.dot(center - centroid) > 0.0, "side {face} faces inward");
    }
}

// =============================================================================
// TORUS
// =============================================================================

/// Untwisted tori are standard tori.
#[test]
fn torus_without_twist() {
    let params = TwistedTorusParams {
        major_radius: 2.0,
        minor_radius: 0.5,
        major_segments: 8,
        minor_segments: 6,
        twists: 0,
    };
    let mesh = build_checked(&params);
    for v in &mesh.verts {
        let ring_distance = (v.truncate().length() - 2.0).hypot(v.z);
        assert_relative_eq!(ring_distance, 0.5, epsilon = 1e-12);
    }
    // First vertex of every ring sits on the outer equator.
    for ring in 0..8 {
        let v = mesh.verts[ring * 6];
        assert_relative_eq!(v.truncate().length(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-12);
    }
    assert_outward_solid(&mesh);
}

/// A full turn per ring lands every section back on phase zero.
#[test]
fn torus_twists_equal_to_segments() {
    let base = TwistedTorusParams {
        major_segments: 6,
        minor_segments: 4,
        twists: 0,
        ..TwistedTorusParams::default()
    };
    let plain = twisted_torus(&base).unwrap();
    let full = twisted_torus(&TwistedTorusParams { twists: 6, ..base }).unwrap();
    for (a, b) in plain.verts.iter().zip(&full.verts) {
        assert!(a.distance(*b) < 1e-9, "{a} != {b}");
    }
    assert_eq!(plain.faces, full.faces);
}

/// Twisted rings still close into a consistent solid.
#[test]
fn torus_with_twists_is_solid() {
    let mesh = build_checked(&TwistedTorusParams::default());
    assert_outward_solid(&mesh);
}

// =============================================================================
// FUNCTION SURFACE
// =============================================================================

/// Grid samples are centered and lifted by the expression.
#[test]
fn surface_samples_grid() {
    let params = FunctionSurfaceParams {
        div_x: 5,
        div_y: 3,
        size_x: 4.0,
        size_y: 2.0,
        expression: "x * y".to_string(),
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.vertex_count(), 15);
    assert_eq!(mesh.face_count(), 8);
    assert_eq!(mesh.verts[0], Vector3::new(-2.0, -1.0, 2.0));
    assert_eq!(mesh.verts[14], Vector3::new(2.0, 1.0, 2.0));
    assert_eq!(mesh.faces[0], vec![0, 3, 4, 1]);
    for face in 0..mesh.face_count() {
        // Saddle tilts faces but never past vertical.
        assert!(mesh.face_normal(face).unwrap().z > 0.0);
    }
}

/// Names outside the sandbox never reach evaluation.
#[test]
fn surface_rejects_unknown_names() {
    let params = FunctionSurfaceParams {
        expression: "open(x)".to_string(),
        ..FunctionSurfaceParams::default()
    };
    let err = function_surface(&params).unwrap_err();
    let KernelError::MathError { fragment, .. } = err else {
        panic!("expected math error, got {err:?}");
    };
    assert_eq!(fragment, "open");
}

/// A non-real sample anywhere fails the whole surface.
#[test]
fn surface_rejects_non_real_samples() {
    let params = FunctionSurfaceParams {
        expression: "sqrt(x)".to_string(),
        ..FunctionSurfaceParams::default()
    };
    assert!(matches!(
        function_surface(&params),
        Err(KernelError::MathError { .. })
    ));
}

/// The configured depth budget applies to the expression.
#[test]
fn surface_honours_depth_budget() {
    let params = FunctionSurfaceParams {
        expression: "sin(cos(sin(cos(x))))".to_string(),
        ..FunctionSurfaceParams::default()
    };
    let shallow = KernelConfig::new(1e-6, 2).unwrap();
    assert!(function_surface_with(&params, &shallow).is_err());
    assert!(function_surface(&params).is_ok());
}

/// Grids too coarse to bridge are rejected.
#[test]
fn surface_rejects_small_grid() {
    let params = FunctionSurfaceParams {
        div_y: 2,
        ..FunctionSurfaceParams::default()
    };
    assert!(matches!(
        function_surface(&params),
        Err(KernelError::InvalidArgument { .. })
    ));
}

// =============================================================================
// TRIANGLE
// =============================================================================

/// Unit equilateral triangle with one face.
#[test]
fn triangle_equilateral_one_face() {
    let params = TriangleParams {
        kind: TriangleKind::Equilateral,
        ..TriangleParams::default()
    };
    let mesh = build_checked(&params);
    assert_eq!(mesh.verts[0], Vector3::new(0.0, 0.75_f64.sqrt(), 0.0));
    assert_eq!(mesh.verts[1], Vector3::new(0.5, 0.0, 0.0));
    assert_eq!(mesh.verts[2], Vector3::new(-0.5, 0.0, 0.0));
    assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
}

/// Every kind and topology is flat, consistently wound and area-preserving.
#[test]
fn triangle_topologies_cover_the_same_area() {
    let kinds = [
        TriangleKind::Isosceles,
        TriangleKind::Equilateral,
        TriangleKind::IsoscelesRight,
        TriangleKind::ScaleneRight,
    ];
    let topologies = [
        TriangleTopology::OneTri,
        TriangleTopology::ThreeTris,
        TriangleTopology::ThreeQuads,
        TriangleTopology::SixQuads,
    ];
    for kind in kinds {
        let whole = triangle(&TriangleParams {
            kind,
            scale: 2.0,
            ..TriangleParams::default()
        })
        .unwrap();
        let expected = signed_area(&whole);
        for topology in topologies {
            let params = TriangleParams {
                kind,
                topology,
                scale: 2.0,
                ..TriangleParams::default()
            };
            let mesh = build_checked(&params);
            assert!(mesh.verts.iter().all(|v| v.z == 0.0));
            assert_relative_eq!(signed_area(&mesh), expected, epsilon = 1e-12);
            assert_consistent_winding(&mesh);
        }
    }
}

/// The six quads fan around `E` and each one has positive area.
#[test]
fn triangle_six_quads_fan_around_e() {
    let mesh = build_checked(&TriangleParams {
        kind: TriangleKind::ScaleneRight,
        topology: TriangleTopology::SixQuads,
        ..TriangleParams::default()
    });
    let hub = mesh.vertex_count() - 1;
    let mut used: Vec<usize> = mesh.faces.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();
    assert_eq!(used, (0..mesh.vertex_count()).collect::<Vec<_>>());
    for face in &mesh.faces {
        assert_eq!(face.len(), 4);
        assert_eq!(face[0], hub);
        let single = Mesh::from_parts(mesh.verts.clone(), vec![face.clone()]);
        assert!(signed_area(&single) > 1e-9);
    }
}

/// Twice the signed area summed over faces, seen from +Z.
fn signed_area(mesh: &Mesh) -> f64 {
    mesh.faces
        .iter()
        .map(|face| {
            face.iter()
                .enumerate()
                .map(|(k, &i)| {
                    let a = mesh.verts[i];
                    let b = mesh.verts[face[(k + 1) % face.len()]];
                    a.x * b.y - b.x * a.y
                })
                .sum::<f64>()
        })
        .sum()
}

/// No directed edge is walked by two faces.
fn assert_consistent_winding(mesh: &Mesh) {
    let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
    for face in &mesh.faces {
        for (k, &a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            *directed.entry((a, b)).or_default() += 1;
        }
    }
    assert!(directed.values().all(|&count| count == 1));
}

/// Mirroring one axis reflects coordinates and keeps the normal's side.
#[test]
fn triangle_flip_x_reverses_winding() {
    let base = TriangleParams {
        kind: TriangleKind::ScaleneRight,
        topology: TriangleTopology::ThreeQuads,
        ..TriangleParams::default()
    };
    let plain = triangle(&base).unwrap();
    let flipped = triangle(&TriangleParams {
        flip_x: true,
        ..base
    })
    .unwrap();
    for (a, b) in plain.verts.iter().zip(&flipped.verts) {
        assert_eq!(b.x, -a.x);
        assert_eq!(b.y, a.y);
    }
    for (a, b) in plain.faces.iter().zip(&flipped.faces) {
        let mut reversed = a.clone();
        reversed.reverse();
        assert_eq!(*b, reversed);
    }
    for face in 0..plain.face_count() {
        let n0 = plain.face_normal(face).unwrap();
        let n1 = flipped.face_normal(face).unwrap();
        assert_relative_eq!(n0.z, n1.z, epsilon = 1e-12);
    }
}

/// Mirroring both axes is a rotation and keeps the winding.
#[test]
fn triangle_flip_both_keeps_winding() {
    let base = TriangleParams::default();
    let both = triangle(&TriangleParams {
        flip_x: true,
        flip_y: true,
        ..base
    })
    .unwrap();
    assert_eq!(both.faces, vec![vec![0, 1, 2]]);
    assert_eq!(both.verts[0], Vector3::new(0.0, -1.0, 0.0));
}

/// Topology names round-trip through their string form.
#[test]
fn triangle_topology_names() {
    for name in TriangleTopology::NAMES {
        let topology: TriangleTopology = name.parse().unwrap();
        assert_eq!(topology.to_string(), name);
    }
    assert!("9quad".parse::<TriangleTopology>().is_err());
}

// =============================================================================
// SHARED
// =============================================================================

/// Identical parameters give identical meshes.
#[test]
fn builders_are_deterministic() {
    let params = TwistedTorusParams::default();
    assert_eq!(twisted_torus(&params).unwrap(), twisted_torus(&params).unwrap());
    let params = FunctionSurfaceParams::default();
    assert_eq!(
        function_surface(&params).unwrap(),
        function_surface(&params).unwrap()
    );
}

/// Declared counts past the vertex budget fail before allocating.
#[test]
fn vertex_budget_is_enforced() {
    let params = TwistedTorusParams {
        major_segments: 100_000,
        minor_segments: 1_000,
        ..TwistedTorusParams::default()
    };
    let err = twisted_torus(&params).unwrap_err();
    assert!(matches!(err, KernelError::InvalidArgument { .. }));
    assert!(err.to_string().contains("twisted torus"));
}
