use super::types::{Coordinate, Edge};

/// Arrowhead sizing and travel direction
#[derive(Debug, Clone, Copy)]
pub struct ArrowSpec {
    pub position: Edge,
    pub arrow_length: f32,
    pub arrow_width: f32,
}

/// Isosceles arrow triangle anchored at `point`.
///
/// Returns `[p1, p2, p3]`: `p1` and `p3` sit `arrow_width` either side of `point`
/// across the travel axis, `p2` is the tip `arrow_length` ahead of `point`.
pub fn build_arrow(point: Coordinate, spec: ArrowSpec) -> [Coordinate; 3] {
    let (dx, dy) = spec.position.unit();
    // perpendicular, rotated a quarter turn clockwise in screen space
    let (nx, ny) = (-dy, dx);

    let p1 = point.offset(-nx * spec.arrow_width, -ny * spec.arrow_width);
    let p2 = point.offset(dx * spec.arrow_length, dy * spec.arrow_length);
    let p3 = point.offset(nx * spec.arrow_width, ny * spec.arrow_width);
    [p1, p2, p3]
}

/// Square grab box of half-size `half` centred on `tip`, as (left-top, right-bottom).
pub fn tip_hit_box(tip: Coordinate, half: f32) -> (Coordinate, Coordinate) {
    (tip.offset(-half, -half), tip.offset(half, half))
}
