#![deny(missing_docs)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::result_large_err)]
#![allow(unexpected_cfgs)]
#![cfg_attr(nightly, feature(test))]
//! `julialib` evaluates which points of a rectangular region of the complex plane stay bounded
//! under the recurrence `z <- z * z + c`, and writes that boolean grid out as a binary
//! greyscale raster.
//!
//! The work is a fixed pipeline:
//! - `region` maps a pixel `(i, j)` of a square grid onto a point of the complex plane
//! - `escapes` iterates a single point until it escapes or the iteration limit is reached
//! - `render` evaluates every point of the grid, in parallel using rayon
//! - `pgm` and `bitmap` encode the resulting `BoundedGrid` and write it to a file

/// `errors` defines the `Error`, `ErrorKind`, `ResultExt` and `Result` types of this crate
pub mod errors;

/// `region` holds the `Region` of the plane being sampled, the `GridSize` and the `PlaneMapper`
pub mod region;

/// `escapes` is the escape-time evaluator for a single point
pub mod escapes;

/// `render` evaluates a full grid into a `BoundedGrid` of classifications
pub mod render;

/// `pgm` encodes and decodes a `BoundedGrid` as a binary ("P5") portable greymap
pub mod pgm;

/// `bitmap` writes a `BoundedGrid` to a file, choosing the format from the file extension
pub mod bitmap;
