use crate::particles::{Aggregate, Quad, QuadKind, QuadTree};

fn build(points: &[(f64, f64)]) -> QuadTree {
    QuadTree::build(points, |p: &(f64, f64)| p.0, |p: &(f64, f64)| p.1)
}

#[test]
fn test_quad_contains() {
    let quad = Quad { cx: 0.0, cy: 0.0, half_size: 1.0 };
    assert!(quad.contains(0.0, 0.0));
    assert!(quad.contains(-1.0, -1.0)); // lower bound is inclusive
    assert!(!quad.contains(1.0, 0.0)); // upper bound is half-open
}

#[test]
fn test_quad_children() {
    let quad = Quad::from_corner(0.0, 0.0, 4.0);
    assert_eq!(quad.width(), 4.0);
    assert_eq!(quad.child(0), Quad { cx: 1.0, cy: 1.0, half_size: 1.0 });
    assert_eq!(quad.child(1), Quad { cx: 3.0, cy: 1.0, half_size: 1.0 });
    assert_eq!(quad.child(2), Quad { cx: 1.0, cy: 3.0, half_size: 1.0 });
    assert_eq!(quad.child(3), Quad { cx: 3.0, cy: 3.0, half_size: 1.0 });

    for slot in 0..4 {
        let child = quad.child(slot);
        assert_eq!(quad.slot(child.cx, child.cy), slot);
        assert!(quad.contains(child.cx, child.cy));
    }
}

#[test]
fn test_covering_extent() {
    // Anchored at the floor of the minimum, doubled until the maximum fits.
    let quad = Quad::covering(-0.5, 0.2, 2.5, 1.0);
    assert_eq!(quad, Some(Quad::from_corner(-1.0, 0.0, 4.0)));

    // A single point still gets a unit square.
    let quad = Quad::covering(3.3, 3.3, 3.3, 3.3);
    assert_eq!(quad, Some(Quad::from_corner(3.0, 3.0, 1.0)));
}

#[test]
fn test_empty_tree() {
    let tree = build(&[]);
    assert!(tree.is_empty());
    let mut visited = 0;
    tree.visit(|_, _| {
        visited += 1;
        false
    });
    assert_eq!(visited, 0);
}

#[test]
fn test_single_point_is_root_leaf() {
    let tree = build(&[(0.25, 0.75)]);
    assert_eq!(tree.len(), 1);
    tree.visit(|node, quad| {
        assert_eq!(node.items(), &[0]);
        assert_eq!(*quad, Quad::from_corner(0.0, 0.0, 1.0));
        false
    });
}

#[test]
fn test_coincident_points_share_a_leaf() {
    let tree = build(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
    assert_eq!(tree.len(), 1);
    tree.visit(|node, _| {
        assert!(node.is_leaf());
        assert_eq!(node.items(), &[0, 1, 2]);
        false
    });
}

#[test]
fn test_every_point_lands_in_its_quad() {
    let points = [(-0.5, -0.5), (0.5, 0.5), (-0.5, 0.5), (0.5, -0.5), (3.0, 7.0), (0.51, 0.5)];
    let tree = build(&points);

    let mut seen = Vec::new();
    tree.visit(|node, quad| {
        if let QuadKind::Leaf { x, y, items } = &node.kind {
            assert!(quad.contains(*x, *y), "leaf ({}, {}) outside {:?}", x, y, quad);
            seen.extend(items.iter().copied());
        }
        false
    });
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_non_finite_points_are_skipped() {
    let tree = build(&[(0.0, 0.0), (f64::NAN, 1.0), (2.0, f64::INFINITY), (0.5, 0.5)]);
    let mut seen = Vec::new();
    tree.visit(|node, _| {
        seen.extend(node.items().iter().copied());
        false
    });
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 3]);
}

#[test]
fn test_overflowing_extent_indexes_nothing() {
    assert_eq!(Quad::covering(-1e308, 0.0, 1e308, 0.0), None);
    assert_eq!(Quad::covering(0.0, -f64::MAX, 0.0, f64::MAX), None);

    // Finite but too far apart to share one square.
    let tree = build(&[(-1e308, 0.0), (1e308, 0.0)]);
    assert!(tree.is_empty());
    assert_eq!(tree.extent(), Quad::from_corner(0.0, 0.0, 1.0));

    // Large coordinates that still fit are indexed normally.
    let tree = build(&[(-1e307, 0.0), (1e307, 0.0)]);
    let mut seen = Vec::new();
    tree.visit(|node, _| {
        seen.extend(node.items().iter().copied());
        false
    });
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1]);
}

#[test]
fn test_visit_prunes_children() {
    let tree = build(&[(0.0, 0.0), (3.0, 3.0), (3.0, 0.0)]);
    let mut visited = 0;
    tree.visit(|_, _| {
        visited += 1;
        true
    });
    assert_eq!(visited, 1, "pruning the root must skip every descendant");
}

#[test]
fn test_visit_after_is_post_order() {
    let points = [(0.0, 0.0), (3.0, 3.0), (3.0, 0.0), (0.1, 0.1)];
    let mut tree = build(&points);

    // Count items under each node; a parent can only be correct if its
    // children were rolled up first.
    tree.visit_after(|node, _, children| match &node.kind {
        QuadKind::Leaf { items, .. } => Aggregate { value: items.len() as f64, x: 0.0, y: 0.0 },
        QuadKind::Internal(_) => Aggregate {
            value: children.iter().flatten().map(|c| c.aggregate.value).sum(),
            x: 0.0,
            y: 0.0,
        },
    });

    let mut root_value = None;
    tree.visit(|node, quad| {
        if root_value.is_none() {
            assert_eq!(*quad, tree.extent());
            root_value = Some(node.aggregate.value);
        }
        false
    });
    assert_eq!(root_value, Some(4.0));
}
