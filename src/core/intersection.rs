use super::types::{FreedomPoint, Point};

/// Lays a trajectory out as a polyline: value k sits at age `begin + k`.
pub fn to_polyline(begin: u32, values: &[f64]) -> Vec<Point> {
    values
        .iter()
        .enumerate()
        .map(|(k, &y)| Point::new(f64::from(begin) + k as f64, y))
        .collect()
}

/// Intersection of segments `p0→p1` and `p2→p3`, endpoints included.
///
/// Parallel and collinear pairs yield `None`: their zero denominator makes the
/// parameters non-finite, which never lands inside `[0, 1]`.
pub fn segment_intersection(p0: Point, p1: Point, p2: Point, p3: Point) -> Option<Point> {
    let s1_x = p1.x - p0.x;
    let s1_y = p1.y - p0.y;
    let s2_x = p3.x - p2.x;
    let s2_y = p3.y - p2.y;

    let denom = -s2_x * s1_y + s1_x * s2_y;
    let s = (-s1_y * (p0.x - p2.x) + s1_x * (p0.y - p2.y)) / denom;
    let t = (s2_x * (p0.y - p2.y) - s2_y * (p0.x - p2.x)) / denom;

    if !s.is_finite() || !t.is_finite() {
        return None;
    }
    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        let hit = Point::new(p0.x + t * s1_x, p0.y + t * s1_y);
        if hit.x.is_finite() && hit.y.is_finite() {
            return Some(hit);
        }
    }
    None
}

/// Every crossing between two polylines, A-segment-major then B-segment-major.
///
/// A crossing that lands exactly on a shared vertex is reported once per
/// touching segment pair.
pub fn find_all_crossings(a: &[Point], b: &[Point]) -> Vec<Point> {
    let mut crossings = Vec::new();
    for seg_a in a.windows(2) {
        for seg_b in b.windows(2) {
            if let Some(hit) = segment_intersection(seg_a[0], seg_a[1], seg_b[0], seg_b[1]) {
                crossings.push(hit);
            }
        }
    }
    crossings
}

/// First crossing in discovery order, as `(age, value)`.
pub fn financial_freedom_point(a: &[Point], b: &[Point]) -> FreedomPoint {
    first_crossing(&find_all_crossings(a, b))
}

pub(crate) fn first_crossing(crossings: &[Point]) -> FreedomPoint {
    match crossings.first() {
        Some(point) => FreedomPoint::Reached {
            age: point.x,
            value: point.y,
        },
        None => FreedomPoint::NotReached,
    }
}
