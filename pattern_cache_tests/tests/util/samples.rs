// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample paths.

use pattern_cache::kurbo::BezPath;
use pattern_cache::PathHandle;

/// An axis-aligned square with its corner at the origin.
pub(crate) fn square(size: f64) -> PathHandle {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((size, 0.0));
    path.line_to((size, size));
    path.line_to((0.0, size));
    path.close_path();
    PathHandle::new(path)
}

/// A plot-marker style cross centered on the origin.
pub(crate) fn cross(radius: f64) -> PathHandle {
    let mut path = BezPath::new();
    path.move_to((-radius, -radius));
    path.line_to((radius, radius));
    path.move_to((-radius, radius));
    path.line_to((radius, -radius));
    PathHandle::new(path)
}

/// A horizontal segment starting at the origin.
pub(crate) fn segment(length: f64) -> PathHandle {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((length, 0.0));
    PathHandle::new(path)
}

/// A triangle with slanted edges inside the `6 x 5` box at the origin.
pub(crate) fn triangle() -> PathHandle {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((6.0, 0.0));
    path.line_to((3.0, 5.0));
    path.close_path();
    PathHandle::new(path)
}
