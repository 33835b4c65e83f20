//! Static two-dimensional index answering nearest-perimeter queries.
//!
//! Distances are Euclidean on raw `(x, y)` coordinates and deliberately
//! ignore the torus wraparound.

use katamari_core::Location;

/// Balanced kd-tree stored implicitly: each slice's median is its root.
#[derive(Clone, Debug, Default)]
pub struct PerimeterIndex {
    points: Vec<Location>,
}

impl PerimeterIndex {
    /// Builds the index over `points`. Rebuilt every turn.
    #[must_use]
    pub fn build(points: &[Location]) -> Self {
        let mut points = points.to_vec();
        arrange(&mut points, Axis::X);
        Self { points }
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Reports whether the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closest indexed point to `query`.
    ///
    /// Ties are broken toward the smaller `y`, then the smaller `x`, so the
    /// answer never depends on how the tree was balanced.
    #[must_use]
    pub fn nearest(&self, query: Location) -> Option<Location> {
        let mut best = None;
        search(&self.points, Axis::X, query, &mut best);
        best.map(|(_, location)| location)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    const fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn coordinate(self, location: Location) -> i64 {
        match self {
            Self::X => i64::from(location.x()),
            Self::Y => i64::from(location.y()),
        }
    }
}

fn arrange(points: &mut [Location], axis: Axis) {
    if points.len() <= 1 {
        return;
    }

    let median = points.len() / 2;
    let _ = points.select_nth_unstable_by_key(median, |point| axis.coordinate(*point));
    let (left, right) = points.split_at_mut(median);
    arrange(left, axis.next());
    arrange(&mut right[1..], axis.next());
}

fn squared_distance(a: Location, b: Location) -> u64 {
    let dx = Axis::X.coordinate(a) - Axis::X.coordinate(b);
    let dy = Axis::Y.coordinate(a) - Axis::Y.coordinate(b);
    (dx * dx + dy * dy).unsigned_abs()
}

fn rank(entry: (u64, Location)) -> (u64, u16, u16) {
    (entry.0, entry.1.y(), entry.1.x())
}

fn search(
    points: &[Location],
    axis: Axis,
    query: Location,
    best: &mut Option<(u64, Location)>,
) {
    if points.is_empty() {
        return;
    }

    let median = points.len() / 2;
    let pivot = points[median];
    let candidate = (squared_distance(pivot, query), pivot);
    if best.map_or(true, |current| rank(candidate) < rank(current)) {
        *best = Some(candidate);
    }

    let delta = axis.coordinate(query) - axis.coordinate(pivot);
    let (near, far) = if delta < 0 {
        (&points[..median], &points[median + 1..])
    } else {
        (&points[median + 1..], &points[..median])
    };

    search(near, axis.next(), query, best);
    // Equal distances may still win the tie-break, so only strictly farther
    // splitting planes are pruned.
    let plane = (delta * delta).unsigned_abs();
    if best.map_or(true, |(distance, _)| plane <= distance) {
        search(far, axis.next(), query, best);
    }
}
