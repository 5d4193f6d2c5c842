use imageproc::contours::{find_contours as trace_borders, BorderType};
use imageproc::point::Point;
use crate::detection::preprocessing::EdgeMap;
use crate::models::Contour;

/// Fewest points that can still bound an area
pub const MIN_CONTOUR_POINTS: usize = 3;

/// Find outer contours in a binary edge image.
///
/// Borders are traced with Suzuki-Abe, which scans the image in raster order, so the
/// output order is fully determined by the edge map. Hole borders are skipped, each
/// outer border is compressed to its corner points and anything left with fewer than
/// three points is dropped.
pub fn find_contours(edges: &EdgeMap) -> Vec<Contour> {
    if edges.width() == 0 || edges.height() == 0 {
        return Vec::new();
    }

    trace_borders::<i32>(edges)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer))
        .map(|c| compress_chain(&c.points))
        .filter(|points| points.len() >= MIN_CONTOUR_POINTS)
        .map(Contour::new)
        .collect()
}

/// Drop every point that continues a straight horizontal, vertical or diagonal run,
/// keeping only the points where the direction changes.
pub fn compress_chain(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            step(prev, cur) != step(cur, next)
        })
        .map(|i| points[i])
        .collect()
}
