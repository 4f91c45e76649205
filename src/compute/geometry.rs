//! Planar polygon primitives over `geo` coordinates (`x = lon`, `y = lat`).
//!
//! These back [`PlanarGeometry`](super::backend::PlanarGeometry). Rings may be
//! given closed (first coordinate repeated) or open.

use geo::{Coord, LineString, Polygon};

/// Relative tolerance for collinearity (sine of the angle between segments).
const COLLINEAR_TOLERANCE: f64 = 1e-12;

/// Pieces whose net area falls below this share of the subject area are empty.
const EMPTY_AREA_RATIO: f64 = 1e-9;

/// Axis-aligned extent of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl RingBounds {
    #[inline]
    pub fn contains_coord(&self, c: Coord<f64>) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }

    /// Whether `other` lies entirely inside these bounds.
    pub fn contains_bounds(&self, other: &RingBounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}

/// Bounding box of a ring, `None` for an empty ring.
pub fn bounding_box(ring: &[Coord<f64>]) -> Option<RingBounds> {
    let first = ring.first()?;
    let init = RingBounds {
        min_x: first.x,
        max_x: first.x,
        min_y: first.y,
        max_y: first.y,
    };
    Some(ring.iter().fold(init, |b, c| RingBounds {
        min_x: b.min_x.min(c.x),
        max_x: b.max_x.max(c.x),
        min_y: b.min_y.min(c.y),
        max_y: b.max_y.max(c.y),
    }))
}

/// Whether two boxes share at least one point (touching counts).
pub fn bounding_box_overlap(a: &RingBounds, b: &RingBounds) -> bool {
    a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
}

#[inline]
fn cross(o: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[inline]
fn same_side(d1: f64, d2: f64) -> bool {
    (d1 > 0.0 && d2 > 0.0) || (d1 < 0.0 && d2 < 0.0)
}

/// Whether segments `a1a2` and `b1b2` meet.
///
/// Each segment's endpoints must not lie strictly on the same side of the
/// other's supporting line. Parallel and collinear segments never intersect.
pub fn segments_intersect(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
) -> bool {
    if same_side(cross(a1, a2, b1), cross(a1, a2, b2)) {
        return false;
    }
    if same_side(cross(b1, b2, a1), cross(b1, b2, a2)) {
        return false;
    }
    let (da, db) = (a2 - a1, b2 - b1);
    da.x * db.y - da.y * db.x != 0.0
}

/// Whether the segments cross at a single point interior to both.
fn segments_cross(a1: Coord<f64>, a2: Coord<f64>, b1: Coord<f64>, b2: Coord<f64>) -> bool {
    let (d1, d2) = (cross(a1, a2, b1), cross(a1, a2, b2));
    let (d3, d4) = (cross(b1, b2, a1), cross(b1, b2, a2));
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

fn point_on_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    let (ab, ap) = (b - a, p - a);
    let scale = (ab.x.hypot(ab.y)) * (ap.x.hypot(ap.y));
    if cross(a, b, p).abs() > COLLINEAR_TOLERANCE * scale {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Ring edges, including the closing edge of an open ring.
fn edges(ring: &[Coord<f64>]) -> impl Iterator<Item = (Coord<f64>, Coord<f64>)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}

/// Ring without its repeated closing coordinate.
fn open(ring: &[Coord<f64>]) -> &[Coord<f64>] {
    match ring {
        [first, rest @ .., last] if !rest.is_empty() && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

fn rings(polygon: &Polygon<f64>) -> impl Iterator<Item = &LineString<f64>> {
    std::iter::once(polygon.exterior()).chain(polygon.interiors())
}

/// Ray-casting point-in-ring test.
///
/// The ray runs horizontally from the point toward -x, past the ring's
/// bounding box. An edge counts when it straddles the ray half-open
/// (`y1 > y` differs from `y2 > y`), so horizontal edges never count.
pub fn point_in_polygon(point: Coord<f64>, ring: &[Coord<f64>]) -> bool {
    let ring = open(ring);
    let Some(bounds) = bounding_box(ring) else {
        return false;
    };
    if !bounds.contains_coord(point) {
        return false;
    }

    let mut inside = false;
    for (a, b) in edges(ring) {
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x < point.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Inside the exterior ring and outside every hole.
pub fn point_within(point: Coord<f64>, polygon: &Polygon<f64>) -> bool {
    point_in_polygon(point, &polygon.exterior().0)
        && !polygon
            .interiors()
            .iter()
            .any(|hole| point_in_polygon(point, &hole.0))
}

/// Whether the point lies on any ring of the polygon.
pub fn point_on_boundary(point: Coord<f64>, polygon: &Polygon<f64>) -> bool {
    rings(polygon).any(|ring| edges(open(&ring.0)).any(|(a, b)| point_on_segment(point, a, b)))
}

/// No edges meet and neither polygon has a vertex inside the other.
pub fn polygons_disjoint(p: &Polygon<f64>, q: &Polygon<f64>) -> bool {
    if let (Some(pb), Some(qb)) = (
        bounding_box(&p.exterior().0),
        bounding_box(&q.exterior().0),
    ) {
        if !bounding_box_overlap(&pb, &qb) {
            return true;
        }
    }

    for p_ring in rings(p) {
        for (a1, a2) in edges(open(&p_ring.0)) {
            for q_ring in rings(q) {
                if edges(open(&q_ring.0)).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2)) {
                    return false;
                }
            }
        }
    }

    let vertex_inside = |a: &Polygon<f64>, b: &Polygon<f64>| {
        rings(a).any(|ring| ring.0.iter().any(|c| point_within(*c, b)))
    };
    !vertex_inside(p, q) && !vertex_inside(q, p)
}

/// Mean of the ring's distinct vertices.
fn vertex_mean(ring: &[Coord<f64>]) -> Option<Coord<f64>> {
    let ring = open(ring);
    if ring.is_empty() {
        return None;
    }
    let n = ring.len() as f64;
    let sum = ring
        .iter()
        .fold(Coord { x: 0.0, y: 0.0 }, |acc, c| acc + *c);
    Some(Coord {
        x: sum.x / n,
        y: sum.y / n,
    })
}

/// Whether `inner` lies entirely within `outer`; shared boundary is allowed.
///
/// Requires no proper edge crossings, every inner vertex inside or on
/// `outer`, no `outer` vertex strictly inside `inner`, and the vertex mean of
/// `inner` strictly inside `outer`. That last point is interior for convex
/// `inner` such as a cell rectangle.
pub fn polygon_contains(outer: &Polygon<f64>, inner: &Polygon<f64>) -> bool {
    let (Some(ob), Some(ib)) = (
        bounding_box(&outer.exterior().0),
        bounding_box(&inner.exterior().0),
    ) else {
        return false;
    };
    if !ob.contains_bounds(&ib) {
        return false;
    }

    let inner_ring = open(&inner.exterior().0);
    for outer_ring in rings(outer) {
        for (a1, a2) in edges(open(&outer_ring.0)) {
            if edges(inner_ring).any(|(b1, b2)| segments_cross(a1, a2, b1, b2)) {
                return false;
            }
        }
    }

    let covered = |c: &Coord<f64>| point_within(*c, outer) || point_on_boundary(*c, outer);
    if !inner_ring.iter().all(covered) {
        return false;
    }

    let strictly_inside_inner =
        |c: &Coord<f64>| point_within(*c, inner) && !point_on_boundary(*c, inner);
    if rings(outer).any(|ring| ring.0.iter().any(strictly_inside_inner)) {
        return false;
    }

    match vertex_mean(inner_ring) {
        Some(mid) => point_within(mid, outer) && !point_on_boundary(mid, outer),
        None => false,
    }
}

/// Signed shoelace area; positive for counter-clockwise rings.
pub fn ring_area(ring: &[Coord<f64>]) -> f64 {
    let ring = open(ring);
    if ring.len() < 3 {
        return 0.0;
    }
    // relative to the first vertex to keep precision far from the origin
    let origin = ring[0];
    edges(ring)
        .map(|(a, b)| {
            let (a, b) = (a - origin, b - origin);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Exterior area minus the area of the holes.
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    let holes: f64 = polygon
        .interiors()
        .iter()
        .map(|h| ring_area(&h.0).abs())
        .sum();
    ring_area(&polygon.exterior().0).abs() - holes
}

/// Sutherland–Hodgman clip of one ring against a convex ring.
fn clip_ring(subject: &[Coord<f64>], clip: &[Coord<f64>], clip_ccw: bool) -> Vec<Coord<f64>> {
    let mut output: Vec<Coord<f64>> = open(subject).to_vec();

    for (c1, c2) in edges(clip) {
        if output.is_empty() {
            break;
        }
        let side = |p: Coord<f64>| {
            let s = cross(c1, c2, p);
            if clip_ccw { s } else { -s }
        };

        let input = std::mem::take(&mut output);
        let n = input.len();
        for i in 0..n {
            let current = input[i];
            let previous = input[(i + n - 1) % n];
            let (sc, sp) = (side(current), side(previous));

            if sc >= 0.0 {
                if sp < 0.0 {
                    output.push(lerp(previous, current, sp / (sp - sc)));
                }
                output.push(current);
            } else if sp >= 0.0 {
                output.push(lerp(previous, current, sp / (sp - sc)));
            }
        }
    }

    if output.len() < 3 { Vec::new() } else { output }
}

#[inline]
fn lerp(a: Coord<f64>, b: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: a.x + t * (b.x - a.x),
        y: a.y + t * (b.y - a.y),
    }
}

/// The part of `subject` inside the convex polygon `clip`.
///
/// Holes of `subject` are clipped too. Returns `None` when nothing of
/// positive area remains.
pub fn polygon_intersection(subject: &Polygon<f64>, clip: &Polygon<f64>) -> Option<Polygon<f64>> {
    let clip_ring_coords = open(&clip.exterior().0);
    let clip_area = ring_area(clip_ring_coords);
    if clip_area == 0.0 {
        return None;
    }
    let ccw = clip_area > 0.0;

    let exterior = clip_ring(&subject.exterior().0, clip_ring_coords, ccw);
    if exterior.is_empty() {
        return None;
    }
    let holes: Vec<LineString<f64>> = subject
        .interiors()
        .iter()
        .map(|hole| clip_ring(&hole.0, clip_ring_coords, ccw))
        .filter(|ring| ring_area(ring) != 0.0)
        .map(LineString::from)
        .collect();

    let piece = Polygon::new(LineString::from(exterior), holes);
    if polygon_area(&piece) <= polygon_area(subject) * EMPTY_AREA_RATIO {
        return None;
    }
    Some(piece)
}
