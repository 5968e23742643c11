// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subpixel quantization of paint positions.
//!
//! A position is rounded to the nearest `1 / buckets` of a pixel on each axis. The
//! whole-pixel part becomes the placement origin and the remainders select one of
//! `buckets * buckets` phases, indexed `qx * buckets + qy`. A remainder that rounds up to a
//! full pixel carries into the origin, so the phase index is always below the phase count.

use crate::kurbo::{Point, Vec2};

#[cfg(not(feature = "std"))]
use crate::kurbo::common::FloatFuncs as _;

/// Where a cached pattern is painted and which subpixel phase it uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Whole-pixel x offset of the pattern origin.
    pub x: i64,
    /// Whole-pixel y offset of the pattern origin.
    pub y: i64,
    /// Index into the entry's pattern array.
    pub phase: usize,
}

impl Placement {
    /// The placement origin as a point.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

/// Number of phases for `buckets` per axis.
#[inline]
pub(crate) fn phase_count(buckets: u8) -> usize {
    usize::from(buckets) * usize::from(buckets)
}

/// Quantizes `target` into a placement with `buckets` phases per axis.
///
/// With `buckets == 1` this rounds to the nearest pixel and always yields phase 0.
pub(crate) fn place(target: Point, buckets: u8) -> Placement {
    debug_assert!(buckets > 0, "at least one subpixel bucket is required");
    let (x, qx) = quantize(target.x, buckets);
    let (y, qy) = quantize(target.y, buckets);
    Placement {
        x,
        y,
        phase: usize::from(qx) * usize::from(buckets) + usize::from(qy),
    }
}

/// Fractional translation baked into the pattern for `phase`.
pub(crate) fn phase_offset(phase: usize, buckets: u8) -> Vec2 {
    let n = usize::from(buckets);
    let (qx, qy) = (phase / n, phase % n);
    let scale = f64::from(buckets);
    Vec2::new(qx as f64 / scale, qy as f64 / scale)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate, and the remainder is below `buckets` which fits in u8"
)]
#[inline]
fn quantize(v: f64, buckets: u8) -> (i64, u8) {
    let n = i64::from(buckets);
    let scaled = (v * f64::from(buckets)).round() as i64;
    (scaled.div_euclid(n), scaled.rem_euclid(n) as u8)
}
