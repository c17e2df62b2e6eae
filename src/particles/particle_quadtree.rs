use log::warn;

/// Represents a square region in 2D space.
///
/// Each `Quad` has a center position (cx, cy) and a half-size, which is half the length
/// of one side of the square. Child quadrants are numbered by slot:
/// `(y >= cy) << 1 | (x >= cx)`, so slot 0 holds the low-x, low-y corner.
///
/// # Examples
///
/// ```
/// use rs_force_layout::particles::Quad;
///
/// // Create a square with center at origin and side length of 2.0
/// let quad = Quad { cx: 0.0, cy: 0.0, half_size: 1.0 };
///
/// assert!(quad.contains(0.5, 0.5));
/// assert!(!quad.contains(1.5, 0.5)); // Outside the square
/// assert_eq!(quad.slot(0.5, -0.5), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub cx: f64,        // center x-coordinate
    pub cy: f64,        // center y-coordinate
    pub half_size: f64, // half the length of one side
}

impl Quad {
    /// Builds the quad spanning `[x0, x0 + size) × [y0, y0 + size)`.
    pub fn from_corner(x0: f64, y0: f64, size: f64) -> Self {
        let half_size = size / 2.0;
        Quad { cx: x0 + half_size, cy: y0 + half_size, half_size }
    }

    /// Returns true if the point (x, y) is inside this quad.
    ///
    /// The quad's boundary is inclusive on the lower bounds and exclusive on the upper bounds,
    /// which helps avoid ambiguity when placing particles on boundaries.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.cx - self.half_size &&
            x <  self.cx + self.half_size &&
            y >= self.cy - self.half_size &&
            y <  self.cy + self.half_size
    }

    /// Side length of the quad.
    pub fn width(&self) -> f64 {
        2.0 * self.half_size
    }

    /// Index of the child quadrant that contains (x, y).
    pub fn slot(&self, x: f64, y: f64) -> usize {
        (((y >= self.cy) as usize) << 1) | (x >= self.cx) as usize
    }

    /// The child quadrant occupying `slot`.
    pub fn child(&self, slot: usize) -> Quad {
        let hs = self.half_size / 2.0;
        let cx = if slot & 1 == 1 { self.cx + hs } else { self.cx - hs };
        let cy = if slot & 2 == 2 { self.cy + hs } else { self.cy - hs };
        Quad { cx, cy, half_size: hs }
    }

    /// Smallest power-of-two square anchored at the floor of the lower bounds
    /// that covers every given point.
    ///
    /// Returns `None` when the bounds are so far apart that the side overflows.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let x0 = min_x.floor();
        let y0 = min_y.floor();
        let mut size: f64 = 1.0;
        while max_x >= x0 + size || max_y >= y0 + size {
            size *= 2.0;
            if !size.is_finite() {
                return None;
            }
        }
        Some(Quad::from_corner(x0, y0, size))
    }
}

/// Values rolled up from the descendants of a node by `QuadTree::visit_after`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aggregate {
    /// Signed sum of descendant charges.
    pub value: f64,
    /// Centroid of the node's charge.
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuadKind {
    /// Up to four child nodes, indexed by slot.
    Internal([Option<usize>; 4]),
    /// One or more items sharing exactly the same coordinates.
    Leaf { x: f64, y: f64, items: Vec<usize> },
}

/// A node of the quadtree arena.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadNode {
    pub kind: QuadKind,
    pub aggregate: Aggregate,
}

impl QuadNode {
    fn leaf(item: usize, x: f64, y: f64) -> Self {
        QuadNode {
            kind: QuadKind::Leaf { x, y, items: vec![item] },
            aggregate: Aggregate::default(),
        }
    }

    fn internal() -> Self {
        QuadNode {
            kind: QuadKind::Internal([None; 4]),
            aggregate: Aggregate::default(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, QuadKind::Leaf { .. })
    }

    /// Items stored at this node; empty for internal nodes.
    pub fn items(&self) -> &[usize] {
        match &self.kind {
            QuadKind::Leaf { items, .. } => items,
            QuadKind::Internal(_) => &[],
        }
    }
}

/// A point quadtree stored in a flat arena and rebuilt from scratch for every
/// set of positions.
///
/// Items are identified by their position in the slice the tree was built from.
///
/// # Examples
///
/// ```
/// use rs_force_layout::particles::QuadTree;
///
/// let points = [(0.0, 0.0), (3.0, 1.0), (3.0, 1.0)];
/// let tree = QuadTree::build(&points, |p: &(f64, f64)| p.0, |p: &(f64, f64)| p.1);
///
/// let mut leaves = 0;
/// tree.visit(|node, _| {
///     if node.is_leaf() {
///         leaves += 1;
///     }
///     false
/// });
/// // The two coincident points share a leaf.
/// assert_eq!(leaves, 2);
/// ```
#[derive(Clone, Debug)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    root: Option<usize>,
    extent: Quad,
}

impl QuadTree {
    /// Indexes `items` by the coordinates returned from the `x` and `y` accessors.
    ///
    /// Items with a non-finite coordinate are left out of the tree.
    pub fn build<T, X, Y>(items: &[T], x: X, y: Y) -> Self
    where
        X: Fn(&T) -> f64,
        Y: Fn(&T) -> f64,
    {
        let mut points = Vec::with_capacity(items.len());
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);

        for (i, item) in items.iter().enumerate() {
            let (px, py) = (x(item), y(item));
            if !px.is_finite() || !py.is_finite() {
                warn!("skipping item {} with non-finite position ({}, {})", i, px, py);
                continue;
            }
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
            points.push((i, px, py));
        }

        let unit = Quad::from_corner(0.0, 0.0, 1.0);
        let extent = if points.is_empty() {
            unit
        } else {
            match Quad::covering(min_x, min_y, max_x, max_y) {
                Some(extent) => extent,
                None => {
                    warn!(
                        "bounds ({}, {}) to ({}, {}) exceed the representable extent, indexing nothing",
                        min_x, min_y, max_x, max_y
                    );
                    points.clear();
                    unit
                }
            }
        };

        let mut tree = QuadTree {
            nodes: Vec::with_capacity(2 * points.len()),
            root: None,
            extent,
        };
        for (i, px, py) in points {
            tree.insert(i, px, py);
        }
        tree
    }

    pub fn extent(&self) -> Quad {
        self.extent
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of arena nodes, internal and leaf.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, node: QuadNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: Option<(usize, usize)>, child: usize) {
        match parent {
            Some((node, slot)) => {
                if let QuadKind::Internal(children) = &mut self.nodes[node].kind {
                    children[slot] = Some(child);
                }
            }
            None => self.root = Some(child),
        }
    }

    fn insert(&mut self, item: usize, x: f64, y: f64) {
        let Some(mut current) = self.root else {
            let leaf = self.push(QuadNode::leaf(item, x, y));
            self.root = Some(leaf);
            return;
        };
        let mut quad = self.extent;
        let mut parent: Option<(usize, usize)> = None;

        // Descend to the leaf or empty slot that should receive the point.
        let (xp, yp) = loop {
            match &self.nodes[current].kind {
                QuadKind::Internal(children) => {
                    let slot = quad.slot(x, y);
                    let next = children[slot];
                    match next {
                        Some(child) => {
                            parent = Some((current, slot));
                            current = child;
                            quad = quad.child(slot);
                        }
                        None => {
                            let leaf = self.push(QuadNode::leaf(item, x, y));
                            self.attach(Some((current, slot)), leaf);
                            return;
                        }
                    }
                }
                QuadKind::Leaf { x: xp, y: yp, .. } => {
                    let (xp, yp) = (*xp, *yp);
                    if xp == x && yp == y {
                        if let QuadKind::Leaf { items, .. } = &mut self.nodes[current].kind {
                            items.push(item);
                        }
                        return;
                    }
                    break (xp, yp);
                }
            }
        };

        // Split until the existing leaf and the new point fall into different slots.
        loop {
            let internal = self.push(QuadNode::internal());
            self.attach(parent, internal);
            let i = quad.slot(x, y);
            let j = quad.slot(xp, yp);
            if i != j {
                let leaf = self.push(QuadNode::leaf(item, x, y));
                self.attach(Some((internal, i)), leaf);
                self.attach(Some((internal, j)), current);
                return;
            }
            parent = Some((internal, i));
            quad = quad.child(i);
        }
    }

    /// Node indices with their quads, in pre-order, children in slot order.
    fn preorder(&self) -> Vec<(usize, Quad)> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(usize, Quad)> = self.root.map(|r| (r, self.extent)).into_iter().collect();
        while let Some((index, quad)) = stack.pop() {
            order.push((index, quad));
            if let QuadKind::Internal(children) = &self.nodes[index].kind {
                for slot in (0..4).rev() {
                    if let Some(child) = children[slot] {
                        stack.push((child, quad.child(slot)));
                    }
                }
            }
        }
        order
    }

    /// Recomputes every node's aggregate bottom-up.
    ///
    /// `rollup` receives a node, its quad and its children (by slot) whose
    /// aggregates are already up to date, and returns the node's aggregate.
    pub fn visit_after<F>(&mut self, mut rollup: F)
    where
        F: FnMut(&QuadNode, &Quad, [Option<&QuadNode>; 4]) -> Aggregate,
    {
        // Reversed pre-order puts every node after all of its descendants.
        let order = self.preorder();
        for &(index, quad) in order.iter().rev() {
            let aggregate = {
                let node = &self.nodes[index];
                let children = match &node.kind {
                    QuadKind::Internal(children) => children.map(|c| c.map(|c| &self.nodes[c])),
                    QuadKind::Leaf { .. } => [None; 4],
                };
                rollup(node, &quad, children)
            };
            self.nodes[index].aggregate = aggregate;
        }
    }

    /// Walks the tree top-down in pre-order. When `prune` returns true the
    /// children of that node are skipped.
    pub fn visit<F>(&self, mut prune: F)
    where
        F: FnMut(&QuadNode, &Quad) -> bool,
    {
        let mut stack: Vec<(usize, Quad)> = self.root.map(|r| (r, self.extent)).into_iter().collect();
        while let Some((index, quad)) = stack.pop() {
            let node = &self.nodes[index];
            if prune(node, &quad) {
                continue;
            }
            if let QuadKind::Internal(children) = &node.kind {
                for slot in (0..4).rev() {
                    if let Some(child) = children[slot] {
                        stack.push((child, quad.child(slot)));
                    }
                }
            }
        }
    }
}
