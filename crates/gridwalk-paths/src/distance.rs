use gridwalk_core::Point3;

/// Manhattan (L1) distance between two lattice points.
#[inline]
pub fn manhattan(a: Point3, b: Point3) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs() + (a.z - b.z).abs()
}

/// Chebyshev (L∞) distance between two lattice points.
#[inline]
pub fn chebyshev(a: Point3, b: Point3) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs()).max((a.z - b.z).abs())
}

/// Squared Euclidean distance between two lattice points.
#[inline]
pub fn squared_euclidean(a: Point3, b: Point3) -> i64 {
    let d = a - b;
    let (x, y, z) = (i64::from(d.x), i64::from(d.y), i64::from(d.z));
    x * x + y * y + z * z
}

/// Euclidean (L2) distance between two lattice points.
#[inline]
pub fn euclidean(a: Point3, b: Point3) -> f64 {
    (squared_euclidean(a, b) as f64).sqrt()
}

/// Cost of the cheapest 8-way lateral path on an open lattice: diagonal
/// moves cost `√2`, cardinal moves `1`.
#[inline]
pub fn octile(a: Point3, b: Point3) -> f64 {
    let dx = (a.x - b.x).abs();
    let dz = (a.z - b.z).abs();
    let (lo, hi) = (dx.min(dz), dx.max(dz));
    f64::from(lo) * std::f64::consts::SQRT_2 + f64::from(hi - lo)
}
