//! Distance functions over [`GeoPoint`]s, all in kilometres.

use geo::{Coord, Distance as _, Euclidean, Line, Point};

use crate::GeoPoint;

/// Mean Earth radius used by every distance calculation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance between two points.
///
/// Symmetric, and zero for identical points.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.lat() - from.lat()).to_radians();
    let d_lng = (to.lng() - from.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + from.lat().to_radians().cos()
            * to.lat().to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    // Rounding can push near-antipodal pairs just past 1.
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Approximate distance from `point` to the segment `start`-`end`.
///
/// All three points are projected onto a local tangent plane centred on
/// the segment's mean latitude (equirectangular: longitude scaled by
/// `cos(mean latitude)`, latitude unscaled, Earth radius as the unit).
/// The planar point-to-segment distance is then taken, with the foot of
/// the perpendicular clamped to the segment. A degenerate segment falls
/// back to the planar point-to-point distance.
///
/// This is a short-segment approximation. It is accurate at city scale;
/// error grows with segment length and with latitude, and segments that
/// cross the antimeridian are not handled.
#[must_use]
pub fn segment_distance_km(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    let mean_lat = f64::midpoint(start.lat(), end.lat()).to_radians();
    let x_scale = EARTH_RADIUS_KM * mean_lat.cos();

    let project = |p: GeoPoint| Coord {
        x: p.lng().to_radians() * x_scale,
        y: p.lat().to_radians() * EARTH_RADIUS_KM,
    };

    let segment = Line::new(project(start), project(end));
    Euclidean.distance(&Point::from(project(point)), &segment)
}
