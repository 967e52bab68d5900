//! Property-based tests for endpoint building and tube orientation.
//!
//! Run with: cargo test -p tube-tool -- proptest

use mesh_types::{MeshObject, PolyMesh, Transform3D};
use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use tube_tool::{
    build_endpoints, extract_anchors, scale_ratio, Anchor, EditSelection, ExtractOptions,
    ScaleParameters, SelectionMode, SplineSlot, TubeSettings, TubeSpec,
};

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-50.0..50.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn arb_normal() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_filter("non-zero direction", |[x, y, z]| x * x + y * y + z * z > 1e-3)
        .prop_map(|[x, y, z]| Vector3::new(x, y, z).normalize())
}

fn arb_anchor() -> impl Strategy<Value = Anchor> {
    (arb_point(), arb_normal(), 0.001..20.0f64)
        .prop_map(|(position, normal, length)| Anchor::new(position, normal, length))
}

fn arb_scale() -> impl Strategy<Value = ScaleParameters> {
    (0.0001..5.0f64, 0.0001..5.0f64, 0.0001..5.0f64, any::<bool>()).prop_map(
        |(main_scale, point1_scale, point2_scale, equal_radii)| ScaleParameters {
            main_scale,
            point1_scale,
            point2_scale,
            equal_radii,
        },
    )
}

fn quad_object(name: &str, world: Transform3D) -> MeshObject {
    let mut mesh = PolyMesh::from_pydata(
        &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        &[],
        &[vec![0, 1, 2, 3]],
    )
    .unwrap_or_else(|e| panic!("{e}"));
    mesh.select_face(0).unwrap_or_else(|e| panic!("{e}"));
    MeshObject::new(name, mesh).with_world(world)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn proptest_build_is_idempotent(
        a in arb_anchor(),
        b in arb_anchor(),
        scale in arb_scale(),
        ext1 in -8.0..8.0f64,
        ext2 in -8.0..8.0f64,
    ) {
        let first = build_endpoints(&a, &b, &scale, ext1, ext2);
        let second = build_endpoints(&a, &b, &scale, ext1, ext2);
        prop_assert!(first.is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn proptest_ratios_are_reciprocal(a in arb_anchor(), b in arb_anchor()) {
        let forward = scale_ratio(&a, &b).unwrap_or(f64::NAN);
        let backward = scale_ratio(&b, &a).unwrap_or(f64::NAN);
        prop_assert!((forward * backward - 1.0).abs() < 1e-12);
    }

    #[test]
    fn proptest_flip_u_inverts_ratio(
        s1 in 0.1..4.0f64,
        s2 in 0.1..4.0f64,
        offset in arb_point(),
    ) {
        let selection = EditSelection::pair(
            quad_object("A", Transform3D::uniform_scale(s1)),
            quad_object("B", Transform3D::translation(offset.x, offset.y, offset.z)
                .then(&Transform3D::uniform_scale(s2))),
        );
        let mode = SelectionMode::TwoObjectsFaceEach;
        let straight = extract_anchors(mode, &selection, ExtractOptions::default())
            .unwrap_or_else(|e| panic!("{e}"));
        let flipped = extract_anchors(
            mode,
            &selection,
            ExtractOptions { flip_u: true, ..ExtractOptions::default() },
        )
        .unwrap_or_else(|e| panic!("{e}"));

        let product = scale_ratio(&straight[0], &straight[1]).unwrap_or(f64::NAN)
            * scale_ratio(&flipped[0], &flipped[1]).unwrap_or(f64::NAN);
        prop_assert!((product - 1.0).abs() < 1e-9);
    }

    #[test]
    fn proptest_equal_radii_use_main_scale(
        a in arb_anchor(),
        b in arb_anchor(),
        scale in arb_scale(),
    ) {
        let scale = ScaleParameters { equal_radii: true, ..scale };
        let ends = build_endpoints(&a, &b, &scale, 2.0, 2.0).unwrap_or_else(|e| panic!("{e}"));
        prop_assert_eq!(ends.endpoints[0].radius, scale.main_scale);
        prop_assert_eq!(ends.endpoints[1].radius, scale.main_scale);
    }

    #[test]
    fn proptest_flip_v_only_swaps_slots(a in arb_anchor(), b in arb_anchor()) {
        let plain = TubeSpec::build(&[a, b], &TubeSettings::default())
            .unwrap_or_else(|e| panic!("{e}"));
        let flipped = TubeSpec::build(&[a, b], &TubeSettings::default().with_flips(false, true))
            .unwrap_or_else(|e| panic!("{e}"));

        prop_assert_eq!(plain.endpoints, flipped.endpoints);
        prop_assert_eq!(
            plain.endpoint_at(SplineSlot::First),
            flipped.endpoint_at(SplineSlot::Last)
        );
        prop_assert_eq!(
            plain.endpoint_at(SplineSlot::Last),
            flipped.endpoint_at(SplineSlot::First)
        );
    }

    #[test]
    fn proptest_radii_stay_positive(a in arb_anchor(), b in arb_anchor(), scale in arb_scale()) {
        let ends = build_endpoints(&a, &b, &scale, 1.0, 1.0).unwrap_or_else(|e| panic!("{e}"));
        prop_assert!(ends.endpoints.iter().all(|e| e.radius > 0.0));
        prop_assert_eq!(ends.bevel_depth, a.reference_length);
    }
}
