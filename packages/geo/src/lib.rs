#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic primitives for incident proximity checks.
//!
//! Provides a validated WGS84 [`GeoPoint`], the single parse/validate
//! boundary for raw coordinate input, great-circle distance, and an
//! approximate point-to-segment distance used for route corridors.

pub mod distance;

pub use distance::{EARTH_RADIUS_KM, distance_km, segment_distance_km};

use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum Axis {
    /// Latitude, in degrees north.
    #[strum(serialize = "lat")]
    Latitude,
    /// Longitude, in degrees east.
    #[strum(serialize = "lng")]
    Longitude,
}

impl Axis {
    /// Inclusive bound on the absolute value of a coordinate on this axis.
    #[must_use]
    pub const fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }
}

/// Errors produced while turning raw input into a [`GeoPoint`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// The coordinate was not supplied at all.
    #[error("{axis} is required")]
    Missing {
        /// Axis that was missing.
        axis: Axis,
    },

    /// Textual input that does not parse as a number.
    #[error("{axis} must be a number, got {input:?}")]
    Unparseable {
        /// Axis being parsed.
        axis: Axis,
        /// The rejected text.
        input: String,
    },

    /// `NaN` or an infinity.
    #[error("{axis} must be a finite number")]
    NotFinite {
        /// Axis being validated.
        axis: Axis,
    },

    /// Finite, but outside the valid WGS84 range for the axis.
    #[error("{axis} {value} is out of range (expected -{limit}..={limit})", limit = .axis.limit())]
    OutOfRange {
        /// Axis being validated.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
}

/// Parses a textual coordinate (e.g. `"16.5449"`) into degrees.
///
/// Only the text-to-number step happens here; range checks happen in
/// [`GeoPoint::new`].
///
/// # Errors
///
/// Returns [`CoordinateError::Unparseable`] if the trimmed text is not a
/// floating point number.
pub fn parse_degrees(input: &str, axis: Axis) -> Result<f64, CoordinateError> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CoordinateError::Unparseable {
            axis,
            input: input.to_string(),
        })
}

fn validate(value: f64, axis: Axis) -> Result<f64, CoordinateError> {
    if !value.is_finite() {
        return Err(CoordinateError::NotFinite { axis });
    }
    if value.abs() > axis.limit() {
        return Err(CoordinateError::OutOfRange { axis, value });
    }
    Ok(value)
}

/// A WGS84 position in decimal degrees.
///
/// Always finite and within range; the only public constructor is
/// [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Validates a latitude/longitude pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either value is non-finite or out of
    /// range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        Ok(Self {
            lat: validate(lat, Axis::Latitude)?,
            lng: validate(lng, Axis::Longitude)?,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Linear blend of latitude and longitude independently, with `t` in
    /// `[0, 1]`.
    ///
    /// This is not great-circle interpolation. The result is a convex
    /// combination of two valid points, so it stays in range.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }
}

/// An unvalidated latitude/longitude pair as received from a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl RawCoordinates {
    /// Creates a raw pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates the pair into a [`GeoPoint`].
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] if either value is non-finite or out of
    /// range.
    pub fn validate(self) -> Result<GeoPoint, CoordinateError> {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Evenly spaced samples along the straight line from `start` to `end`,
/// both endpoints included (`steps + 1` points).
///
/// With `steps == 0` only `start` is returned.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_line(start: GeoPoint, end: GeoPoint, steps: usize) -> Vec<GeoPoint> {
    if steps == 0 {
        return vec![start];
    }

    (0..=steps)
        .map(|i| start.lerp(end, i as f64 / steps as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let point = GeoPoint::new(16.5449, 81.5212).unwrap();
        assert!((point.lat() - 16.5449).abs() < f64::EPSILON);
        assert!((point.lng() - 81.5212).abs() < f64::EPSILON);

        assert!(GeoPoint::new(90.0, -180.0).is_ok());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert_eq!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(CoordinateError::NotFinite {
                axis: Axis::Latitude
            })
        );
        assert_eq!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(CoordinateError::NotFinite {
                axis: Axis::Longitude
            })
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(CoordinateError::OutOfRange {
                axis: Axis::Latitude,
                ..
            })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.01),
            Err(CoordinateError::OutOfRange {
                axis: Axis::Longitude,
                ..
            })
        ));
    }

    #[test]
    fn parses_textual_degrees() {
        assert!((parse_degrees(" 81.5212 ", Axis::Longitude).unwrap() - 81.5212).abs() < 1e-12);
        assert_eq!(
            parse_degrees("north", Axis::Latitude),
            Err(CoordinateError::Unparseable {
                axis: Axis::Latitude,
                input: "north".to_string(),
            })
        );
    }

    #[test]
    fn parsed_nan_is_caught_by_validation() {
        let lat = parse_degrees("NaN", Axis::Latitude).unwrap();
        assert!(matches!(
            GeoPoint::new(lat, 0.0),
            Err(CoordinateError::NotFinite { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_axis() {
        let err = GeoPoint::new(100.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "lat 100 is out of range (expected -90..=90)"
        );
    }

    #[test]
    fn raw_coordinates_validate_into_points() {
        assert_eq!(
            RawCoordinates::new(16.5, 81.5).validate(),
            GeoPoint::new(16.5, 81.5)
        );
        assert!(RawCoordinates::new(16.5, f64::NAN).validate().is_err());
    }

    #[test]
    fn sample_line_includes_both_endpoints() {
        let start = GeoPoint::new(16.50, 81.50).unwrap();
        let end = GeoPoint::new(16.60, 81.60).unwrap();
        let samples = sample_line(start, end, 25);

        assert_eq!(samples.len(), 26);
        assert_eq!(samples[0], start);
        assert!((samples[25].lat() - end.lat()).abs() < 1e-12);
        assert!((samples[25].lng() - end.lng()).abs() < 1e-12);
    }

    #[test]
    fn sample_line_blends_axes_independently() {
        let start = GeoPoint::new(10.0, 20.0).unwrap();
        let end = GeoPoint::new(20.0, 40.0).unwrap();
        let samples = sample_line(start, end, 4);

        let lats: Vec<f64> = samples.iter().map(|p| p.lat()).collect();
        let lngs: Vec<f64> = samples.iter().map(|p| p.lng()).collect();
        assert_eq!(lats, vec![10.0, 12.5, 15.0, 17.5, 20.0]);
        assert_eq!(lngs, vec![20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn sample_line_with_zero_steps_is_start_only() {
        let start = GeoPoint::new(1.0, 2.0).unwrap();
        let end = GeoPoint::new(3.0, 4.0).unwrap();
        assert_eq!(sample_line(start, end, 0), vec![start]);
    }

    #[test]
    fn serializes_as_lat_lng() {
        let point = GeoPoint::new(16.55, 81.53).unwrap();
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json, serde_json::json!({ "lat": 16.55, "lng": 81.53 }));
    }
}
