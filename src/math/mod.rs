//! 2D helpers for hit-testing and rasterizing canvas primitives.

use crate::drawing::Point;

pub fn to_f32(p: Point) -> [f32; 2] {
    [p[0] as f32, p[1] as f32]
}

pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

/// Orders two corners into `(min, max)`.
pub fn normalize(a: [f32; 2], b: [f32; 2]) -> ([f32; 2], [f32; 2]) {
    ([a[0].min(b[0]), a[1].min(b[1])], [a[0].max(b[0]), a[1].max(b[1])])
}

pub fn square_bounds(center: Point, half: i32) -> ([f32; 2], [f32; 2]) {
    let c = to_f32(center);
    let h = half as f32;
    ([c[0] - h, c[1] - h], [c[0] + h, c[1] + h])
}

pub fn rect_distance(p: [f32; 2], min: [f32; 2], max: [f32; 2]) -> f32 {
    let dx = (min[0] - p[0]).max(0.0).max(p[0] - max[0]);
    let dy = (min[1] - p[1]).max(0.0).max(p[1] - max[1]);
    (dx * dx + dy * dy).sqrt()
}

pub fn point_to_segment_distance(point: [f32; 2], line_start: [f32; 2], line_end: [f32; 2]) -> f32 {
    let line_length_squared =
        (line_end[0] - line_start[0]).powi(2) + (line_end[1] - line_start[1]).powi(2);

    if line_length_squared == 0.0 {
        return distance(point, line_start);
    }

    let t = ((point[0] - line_start[0]) * (line_end[0] - line_start[0])
        + (point[1] - line_start[1]) * (line_end[1] - line_start[1]))
        / line_length_squared;
    let t = t.clamp(0.0, 1.0);

    let projection = [
        line_start[0] + t * (line_end[0] - line_start[0]),
        line_start[1] + t * (line_end[1] - line_start[1]),
    ];
    distance(point, projection)
}

/// Distance to the frame of the rectangle `min..max`, measured from either side.
pub fn rect_outline_distance(p: [f32; 2], min: [f32; 2], max: [f32; 2]) -> f32 {
    let inside = p[0] >= min[0] && p[0] <= max[0] && p[1] >= min[1] && p[1] <= max[1];
    if !inside {
        return rect_distance(p, min, max);
    }
    (p[0] - min[0]).min(max[0] - p[0]).min(p[1] - min[1]).min(max[1] - p[1])
}

/// Approximate distance to an axis-aligned ellipse inscribed in `min..max`.
/// Unfilled ellipses only count their boundary.
pub fn ellipse_distance(p: [f32; 2], min: [f32; 2], max: [f32; 2], filled: bool) -> f32 {
    let rx = (max[0] - min[0]) / 2.0;
    let ry = (max[1] - min[1]) / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return point_to_segment_distance(p, min, max);
    }
    let center = [min[0] + rx, min[1] + ry];
    let nx = (p[0] - center[0]) / rx;
    let ny = (p[1] - center[1]) / ry;
    let norm = (nx * nx + ny * ny).sqrt();
    if filled && norm <= 1.0 {
        0.0
    } else {
        (norm - 1.0).abs() * rx.min(ry)
    }
}

fn edge_sign(p: [f32; 2], a: [f32; 2], b: [f32; 2]) -> f32 {
    (p[0] - b[0]) * (a[1] - b[1]) - (a[0] - b[0]) * (p[1] - b[1])
}

/// Distance to a triangle. Collinear vertices have no interior, so only the
/// edges count; unfilled triangles likewise.
pub fn triangle_distance(p: [f32; 2], [a, b, c]: [[f32; 2]; 3], filled: bool) -> f32 {
    let to_edges = point_to_segment_distance(p, a, b)
        .min(point_to_segment_distance(p, b, c))
        .min(point_to_segment_distance(p, c, a));
    if !filled || edge_sign(a, b, c).abs() < f32::EPSILON {
        return to_edges;
    }
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    if has_neg && has_pos { to_edges } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = point_to_segment_distance([-3.0, 4.0], [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 5.0).abs() < 0.001);
        let d = point_to_segment_distance([5.0, 2.0], [0.0, 0.0], [10.0, 0.0]);
        assert!((d - 2.0).abs() < 0.001);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let d = point_to_segment_distance([3.0, 4.0], [0.0, 0.0], [0.0, 0.0]);
        assert!((d - 5.0).abs() < 0.001);
    }

    #[test]
    fn ellipse_inside_is_zero_only_when_filled() {
        assert_eq!(ellipse_distance([5.0, 5.0], [0.0, 0.0], [10.0, 10.0], true), 0.0);
        assert!(ellipse_distance([20.0, 5.0], [0.0, 0.0], [10.0, 10.0], true) > 0.0);
        assert!((ellipse_distance([5.0, 5.0], [0.0, 0.0], [10.0, 10.0], false) - 5.0).abs() < 0.001);
        assert!(ellipse_distance([0.0, 5.0], [0.0, 0.0], [10.0, 10.0], false) < 0.001);
    }

    #[test]
    fn rect_outline_measures_to_nearest_edge() {
        assert!((rect_outline_distance([3.0, 5.0], [0.0, 0.0], [10.0, 10.0]) - 3.0).abs() < 0.001);
        assert!((rect_outline_distance([13.0, 5.0], [0.0, 0.0], [10.0, 10.0]) - 3.0).abs() < 0.001);
    }

    #[test]
    fn triangle_contains_its_centroid() {
        let tri = [[0.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert_eq!(triangle_distance([2.0, 7.0], tri, true), 0.0);
        assert!((triangle_distance([-2.0, 5.0], tri, true) - 2.0).abs() < 0.001);
        assert!((triangle_distance([2.0, 7.0], tri, false) - 2.0).abs() < 0.001);
    }

    #[test]
    fn collapsed_triangle_has_no_interior() {
        let point = [[10.0, 10.0]; 3];
        assert!((triangle_distance([600.0, 500.0], point, true) - distance([600.0, 500.0], [10.0, 10.0])).abs() < 0.01);
        let flat = [[0.0, 0.0], [10.0, 0.0], [0.0, 0.0]];
        assert!((triangle_distance([5.0, 4.0], flat, true) - 4.0).abs() < 0.001);
    }
}
