// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A backend whose patterns are device-space fill outlines.
//!
//! Strokes and dashes are expanded into fills with kurbo when a pattern is created, so
//! painting a cached pattern only costs one fill per layer.

use core::fmt::{Debug, Formatter};
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::backend::{PatternBackend, RenderRequest};
use crate::dash::DashContext;
use crate::error::Error;
use crate::key::{PathHandle, StrokeStyle};
use crate::kurbo::{self, Affine, BezPath, Point, Rect, Shape, Stroke, StrokeOpts};
use crate::Fill;

/// Default flattening tolerance for stroke expansion, in device units.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// A drawing context outline patterns are painted into.
pub trait OutlineTarget: DashContext {
    /// Fills `path`, transformed by `transform`, with the context's current paint.
    fn fill_outline(&mut self, transform: Affine, path: &BezPath, fill: Fill);
}

/// A rendered pattern: one or two outlines in pattern-local device space.
///
/// Fill layers come before stroke layers.
#[derive(Clone, Debug)]
pub struct OutlinePattern {
    layers: SmallVec<[(BezPath, Fill); 2]>,
}

impl OutlinePattern {
    /// The outlines of this pattern with their fill rules, in paint order.
    pub fn layers(&self) -> impl Iterator<Item = (&BezPath, Fill)> + '_ {
        self.layers.iter().map(|(path, fill)| (path, *fill))
    }

    /// Bounds of all layers.
    pub fn bounding_box(&self) -> Rect {
        self.layers
            .iter()
            .map(|(path, _)| path.bounding_box())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }
}

/// Renders patterns by transforming and stroking paths with kurbo.
pub struct OutlineBackend<T> {
    tolerance: f64,
    live: usize,
    target: PhantomData<fn(&mut T)>,
}

impl<T> OutlineBackend<T> {
    /// Creates a backend with [`DEFAULT_TOLERANCE`].
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Creates a backend that flattens strokes to within `tolerance` device units.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            live: 0,
            target: PhantomData,
        }
    }

    /// The flattening tolerance.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Number of patterns created and not yet released.
    #[inline]
    pub fn live_patterns(&self) -> usize {
        self.live
    }

    fn stroke_outline(
        &self,
        device_path: &BezPath,
        style: StrokeStyle,
        request: &RenderRequest<'_>,
    ) -> BezPath {
        let stroke = Stroke::new(request.line_width)
            .with_caps(style.cap.into())
            .with_join(style.join.into())
            .with_miter_limit(StrokeStyle::MITER_LIMIT)
            .with_dashes(
                request.dash.offset(),
                request.dash.pattern().iter().copied(),
            );
        kurbo::stroke(
            device_path.iter(),
            &stroke,
            &StrokeOpts::default(),
            self.tolerance,
        )
    }
}

impl<T> Default for OutlineBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for OutlineBackend<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutlineBackend")
            .field("tolerance", &self.tolerance)
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}

impl<T: OutlineTarget> PatternBackend for OutlineBackend<T> {
    type Context = T;
    type Pattern = OutlinePattern;

    fn path_extents(&mut self, path: &PathHandle) -> Rect {
        path.path().bounding_box()
    }

    fn create_pattern(
        &mut self,
        _ctx: &mut T,
        request: &RenderRequest<'_>,
    ) -> Result<OutlinePattern, Error> {
        let mut device_path = request.path.path().clone();
        device_path.apply_affine(request.transform);
        if !device_path.is_finite() {
            return Err(Error::pattern_creation_failed(
                "transformed path is not finite",
            ));
        }

        let mut layers = SmallVec::new();
        if let Some(style) = request.routine.stroke_style() {
            let outline = self.stroke_outline(&device_path, style, request);
            if !outline.is_finite() {
                return Err(Error::pattern_creation_failed(
                    "stroke outline is not finite",
                ));
            }
            if request.routine.fills() {
                layers.push((device_path, request.path.fill()));
            }
            layers.push((outline, Fill::NonZero));
        } else {
            layers.push((device_path, request.path.fill()));
        }

        self.live += 1;
        Ok(OutlinePattern { layers })
    }

    fn mask(&mut self, ctx: &mut T, pattern: &OutlinePattern, origin: Point) {
        let transform = Affine::translate(origin.to_vec2());
        for (path, fill) in pattern.layers() {
            ctx.fill_outline(transform, path, fill);
        }
    }

    fn release_pattern(&mut self, pattern: OutlinePattern) {
        debug_assert!(self.live > 0, "released more patterns than were created");
        self.live = self.live.saturating_sub(1);
        drop(pattern);
    }
}
