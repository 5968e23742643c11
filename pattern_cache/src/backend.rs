// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering backend seam.

use crate::dash::DashState;
use crate::error::Error;
use crate::key::{DrawRoutine, PathHandle};
use crate::kurbo::{Affine, Point, Rect};

/// Everything a backend needs to render one subpixel phase of a pattern.
#[derive(Copy, Clone, Debug)]
pub struct RenderRequest<'a> {
    /// The path to render.
    pub path: &'a PathHandle,
    /// Path-to-pattern transform.
    ///
    /// This is the key's transform followed by a translation that moves the transformed
    /// bounds origin to the pattern origin, shifted by the phase's fractional offset.
    pub transform: Affine,
    /// How the path is painted.
    pub routine: DrawRoutine,
    /// Stroke width in pattern (device) units.
    pub line_width: f64,
    /// Dash applied to strokes.
    pub dash: &'a DashState,
    /// Index of the subpixel phase being rendered.
    pub phase: usize,
}

/// Materializes paths into reusable patterns and paints them.
///
/// The shared cache logic lives in [`PatternCache`](crate::PatternCache), which is generic
/// over this trait so different backends can choose their own pattern representation.
/// Implementations are not expected to be usable from several threads at once.
pub trait PatternBackend {
    /// The drawing context patterns are created for and painted into.
    type Context;

    /// An owned, backend-native pattern handle.
    type Pattern;

    /// Computes the untransformed bounding box of `path`.
    ///
    /// Empty paths report a zero-area rectangle.
    fn path_extents(&mut self, path: &PathHandle) -> Rect;

    /// Renders one phase of a pattern.
    ///
    /// Returns an [`Error::pattern_creation_failed`] error when the geometry cannot be
    /// rendered.
    fn create_pattern(
        &mut self,
        ctx: &mut Self::Context,
        request: &RenderRequest<'_>,
    ) -> Result<Self::Pattern, Error>;

    /// Paints `pattern` through `ctx` with its origin at `origin`, using the context's
    /// current source.
    fn mask(&mut self, ctx: &mut Self::Context, pattern: &Self::Pattern, origin: Point);

    /// Gives a pattern back to the backend. Called exactly once for every created pattern.
    fn release_pattern(&mut self, pattern: Self::Pattern);
}
