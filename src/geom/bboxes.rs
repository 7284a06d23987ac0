use crate::geom::point::Point;

/// Returns the (min, max) corners of the box holding all points `pts`.
///
/// Returns `None` for an empty slice.
pub fn bounding_box(pts: &[Point]) -> Option<(Point, Point)> {
    let first = *pts.first()?;
    let (pmin, pmax) = pts.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
        )
    });
    Some((pmin, pmax))
}
