//!
//! # scanline-tracker
//!
//! The purpose of this crate is to turn a stream of 2D polar range scans from a single
//! stationary sensor into a stable set of tracked moving objects. It is purely an
//! in-memory computation: no device I/O, no network, no persistence, no visualization.
//!
//! A scan is processed by a three-stage pipeline, each stage owning its own piece of
//! state between calls:
//!
//! * [`background`] — a per-angular-bin estimator that separates static structure from
//!   moving returns using an asymmetric exponential moving average.
//! * [`cluster`] — a grid-accelerated density-based clusterer that groups foreground
//!   points in Cartesian space.
//! * [`tracker`] — a greedy data-association tracker with velocity prediction and a
//!   tentative/confirmed/lost lifecycle.
//!
//! [`scene::Scene`] wires these stages together behind a single `process_scan` entry
//! point and keeps a bounded trajectory history per tracked object.
//!
//! ## Performance
//!
//! The pipeline runs single-threaded and synchronously: calls are expected to be
//! serialized by the caller, and the target regime is a handful of tracked people and
//! at most a few hundred foreground points per scan, so no parallel or SIMD machinery
//! is pulled in.

/// Configuration record and validation for a [`scene::Scene`].
pub mod config;

/// Coordinate types and polar-to-planar conversion.
pub mod geometry;

/// Per-angular-bin background model.
pub mod background;

/// Grid-accelerated density-based clusterer.
pub mod cluster;

/// Greedy data-association tracker.
pub mod tracker;

/// Bounded per-object trajectory history.
pub mod trajectory;

/// The orchestrator that stitches the pipeline stages together.
pub mod scene;

/// Re-exports of the types most callers need.
pub mod prelude;

use thiserror::Error;

/// Errors raised by this crate.
///
/// Per the crate's error taxonomy, this covers configuration errors only: the
/// per-frame computation itself is total and never fails at runtime. Malformed
/// samples are discarded during normalization rather than rejected with an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A [`config::TrackerConfig`] field violated its documented constraint.
    #[error("invalid configuration: {field} {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

#[cfg(test)]
const EPS: f64 = 1e-9;
