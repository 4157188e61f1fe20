use super::*;

#[test]
fn default_geometry_matches_reference_book() {
    let g = PageGeometry::default();
    g.validate().unwrap();
    assert_eq!(g.bone_count(), 161);
    assert!((g.segment_width() - 2.6 / 160.0).abs() < 1e-12);
}

#[test]
fn invalid_geometry_is_rejected() {
    let g = PageGeometry {
        segments: 1,
        ..PageGeometry::default()
    };
    assert!(g.validate().is_err());

    let g = PageGeometry {
        width: 0.0,
        ..PageGeometry::default()
    };
    assert!(g.validate().is_err());
}

#[test]
fn rest_offsets_start_at_spine() {
    let g = PageGeometry {
        width: 2.0,
        segments: 4,
        ..PageGeometry::default()
    };
    assert_eq!(g.bone_rest_offsets(), vec![0.0, 0.5, 0.5, 0.5, 0.5]);
}

#[test]
fn skin_weights_split_between_neighbouring_bones() {
    let g = PageGeometry {
        width: 2.0,
        segments: 4,
        ..PageGeometry::default()
    };
    let s = g.skin_vertex(0.625);
    assert_eq!(s.indices, [1, 2, 0, 0]);
    assert!((s.weights[0] - 0.75).abs() < 1e-6);
    assert!((s.weights[1] - 0.25).abs() < 1e-6);
    assert_eq!(s.weights[2], 0.0);
}

#[test]
fn skin_weights_sum_to_one() {
    let g = PageGeometry::default();
    for s in g.skin(&g.vertex_columns()) {
        let sum: f32 = s.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}

#[test]
fn spine_vertex_binds_to_root() {
    let s = PageGeometry::default().skin_vertex(0.0);
    assert_eq!(s.indices, [0, 1, 0, 0]);
    assert_eq!(s.weights[0], 1.0);
}

#[test]
fn stack_offset_pushes_later_pages_back() {
    let g = PageGeometry::default();
    assert_eq!(g.stack_offset(0, 0), 0.0);
    assert!(g.stack_offset(3, 0) < g.stack_offset(1, 0));
    assert!(g.stack_offset(3, 2) > g.stack_offset(3, 0));
}
