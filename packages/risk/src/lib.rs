#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk evaluators over a snapshot of incident reports.
//!
//! All evaluators are pure functions of their inputs: a validated
//! location (or route endpoints) and a point-in-time slice of incidents.
//! They never fail and hold no state, so callers can run them
//! concurrently on a shared snapshot.
//!
//! - [`point::evaluate_point`]: density and severity within 5 km of a
//!   point.
//! - [`route::evaluate_route_density`]: the same tally at 26 samples along
//!   a straight route, merged by incident id.
//! - [`corridor::evaluate_corridor`]: a 0-100 score from incidents within
//!   2 km of the route segment.
//!
//! The two route checks answer different questions and have different
//! output shapes; both are kept.

pub mod corridor;
pub mod point;
pub mod route;
pub mod thresholds;

pub use corridor::evaluate_corridor;
pub use point::evaluate_point;
pub use route::evaluate_route_density;
