use crate::{
    foundation::core::Vec3,
    foundation::math::distance_to_line,
};

/// Indices of the points kept by Ramer–Douglas–Peucker simplification.
///
/// A point is dropped when its perpendicular distance from the chord of the current span is at
/// most `tolerance`. When the chord endpoints coincide, distance to that shared point is used
/// instead. The first and last points are always kept; with `tolerance <= 0` or fewer than three
/// points nothing is dropped.
pub fn simplify_indices(points: &[Vec3], tolerance: f64) -> Vec<usize> {
    let n = points.len();
    if n <= 2 || tolerance.is_nan() || tolerance <= 0.0 {
        return (0..n).collect();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut spans = vec![(0, n - 1)];
    while let Some((first, last)) = spans.pop() {
        if last <= first + 1 {
            continue;
        }
        let (a, b) = (points[first], points[last]);
        let (mut farthest, mut max_dist) = (first, 0.0);
        for (i, &p) in points.iter().enumerate().take(last).skip(first + 1) {
            let d = distance_to_line(p, a, b).unwrap_or_else(|| p.distance(a));
            if d > max_dist {
                farthest = i;
                max_dist = d;
            }
        }
        if max_dist > tolerance {
            keep[farthest] = true;
            spans.push((farthest, last));
            spans.push((first, farthest));
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/bake/simplify.rs"]
mod tests;
