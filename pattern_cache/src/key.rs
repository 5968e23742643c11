// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pattern cache keys.

use alloc::sync::Arc;
use core::fmt::{Debug, Formatter};
use core::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::FixedState;

use crate::dash::DashState;
use crate::kurbo::{Affine, BezPath, Cap, Join, PathEl, Point};
use crate::Fill;

/// Seed for path content digests. Fixed so digests are stable across caches.
const DIGEST_SEED: u64 = 0x7061_7474_6572_6e73;

/// Shared, immutable handle to a path and its fill rule.
///
/// Handles compare by identity: two handles are equal only if one was cloned from the
/// other, even when their coordinates match. The content digest is computed once, on
/// construction, and only serves to spread hashes of distinct allocations.
#[derive(Clone)]
pub struct PathHandle {
    inner: Arc<PathData>,
}

struct PathData {
    path: BezPath,
    fill: Fill,
    digest: u64,
}

impl PathHandle {
    /// Creates a handle for a path filled with the non-zero rule.
    pub fn new(path: BezPath) -> Self {
        Self::with_fill(path, Fill::NonZero)
    }

    /// Creates a handle for a path with the given fill rule.
    pub fn with_fill(path: BezPath, fill: Fill) -> Self {
        let digest = content_digest(&path, fill);
        Self {
            inner: Arc::new(PathData { path, fill, digest }),
        }
    }

    /// The path geometry.
    #[inline]
    pub fn path(&self) -> &BezPath {
        &self.inner.path
    }

    /// The fill rule used when the path is filled.
    #[inline]
    pub fn fill(&self) -> Fill {
        self.inner.fill
    }

    /// Digest of the path elements and fill rule.
    #[inline]
    pub fn digest(&self) -> u64 {
        self.inner.digest
    }

    /// Whether both handles refer to the same path object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Hash for PathHandle {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.inner) as usize).hash(state);
        self.inner.digest.hash(state);
    }
}

impl PartialEq for PathHandle {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for PathHandle {}

impl Debug for PathHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PathHandle")
            .field("elements", &self.inner.path.elements().len())
            .field("fill", &self.inner.fill)
            .field("digest", &format_args!("{:016x}", self.inner.digest))
            .finish()
    }
}

fn content_digest(path: &BezPath, fill: Fill) -> u64 {
    fn write_point(hasher: &mut impl Hasher, p: Point) {
        hasher.write_u64(p.x.to_bits());
        hasher.write_u64(p.y.to_bits());
    }

    let mut hasher = FixedState::with_seed(DIGEST_SEED).build_hasher();
    hasher.write_u8(fill_tag(fill));
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                hasher.write_u8(0);
                write_point(&mut hasher, p);
            }
            PathEl::LineTo(p) => {
                hasher.write_u8(1);
                write_point(&mut hasher, p);
            }
            PathEl::QuadTo(p1, p2) => {
                hasher.write_u8(2);
                write_point(&mut hasher, p1);
                write_point(&mut hasher, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                hasher.write_u8(3);
                write_point(&mut hasher, p1);
                write_point(&mut hasher, p2);
                write_point(&mut hasher, p3);
            }
            PathEl::ClosePath => hasher.write_u8(4),
        }
    }
    hasher.finish()
}

fn fill_tag(fill: Fill) -> u8 {
    match fill {
        Fill::NonZero => 0,
        Fill::EvenOdd => 1,
    }
}

/// Shape drawn at the ends of open stroked subpaths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineCap {
    /// Flat cap ending exactly at the endpoint.
    #[default]
    Butt,
    /// Square cap extending half the line width past the endpoint.
    Square,
    /// Semicircular cap.
    Round,
}

impl From<LineCap> for Cap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Self::Butt,
            LineCap::Square => Self::Square,
            LineCap::Round => Self::Round,
        }
    }
}

/// Connection between consecutive stroked segments.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Segments extended to their intersection, up to [`StrokeStyle::MITER_LIMIT`].
    #[default]
    Miter,
    /// Arc between the segments.
    Round,
    /// Straight line between the segment corners.
    Bevel,
}

impl From<LineJoin> for Join {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => Self::Miter,
            LineJoin::Round => Self::Round,
            LineJoin::Bevel => Self::Bevel,
        }
    }
}

/// Caps and joins of a stroking [`DrawRoutine`].
///
/// Line width and dashes are separate key fields.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StrokeStyle {
    /// Cap style for both ends of open subpaths.
    pub cap: LineCap,
    /// Join style.
    pub join: LineJoin,
}

impl StrokeStyle {
    /// Miter limit applied to [`LineJoin::Miter`].
    pub const MITER_LIMIT: f64 = 10.0;

    /// Creates a stroke style.
    pub const fn new(cap: LineCap, join: LineJoin) -> Self {
        Self { cap, join }
    }

    /// How far, in multiples of half the line width, a stroke can reach past its path.
    pub(crate) fn reach(self) -> f64 {
        let join = match self.join {
            LineJoin::Miter => Self::MITER_LIMIT,
            LineJoin::Round | LineJoin::Bevel => 1.0,
        };
        self.body_reach().max(join)
    }

    /// Like [`reach`](Self::reach), but ignoring miter joins.
    ///
    /// This is how far the stroke of a path without sharp corners reaches.
    pub(crate) fn body_reach(self) -> f64 {
        match self.cap {
            LineCap::Square => core::f64::consts::SQRT_2,
            LineCap::Butt | LineCap::Round => 1.0,
        }
    }
}

/// How a path is painted into its pattern.
///
/// This is a closed set: every variant is a distinct equivalence class in the cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DrawRoutine {
    /// Fill the path with its own fill rule.
    Fill,
    /// Stroke the path.
    Stroke(StrokeStyle),
    /// Fill the path, then stroke it on top.
    FillStroke(StrokeStyle),
}

impl DrawRoutine {
    /// The stroke style, if this routine strokes.
    #[inline]
    pub fn stroke_style(self) -> Option<StrokeStyle> {
        match self {
            Self::Fill => None,
            Self::Stroke(style) | Self::FillStroke(style) => Some(style),
        }
    }

    /// Whether this routine fills the path interior.
    #[inline]
    pub fn fills(self) -> bool {
        matches!(self, Self::Fill | Self::FillStroke(_))
    }
}

/// Everything that determines how a cached pattern looks.
///
/// Two keys are equal iff they refer to the same [`PathHandle`], use the same
/// [`DrawRoutine`], and have bit-identical transforms, line widths and dash states.
/// Numerically close transforms are distinct keys.
#[derive(Clone, Debug)]
pub struct CacheKey {
    /// The path to render.
    pub path: PathHandle,
    /// Path-to-device transform.
    pub transform: Affine,
    /// How the path is painted.
    pub routine: DrawRoutine,
    /// Stroke width in device units. Ignored by [`DrawRoutine::Fill`] but still part of the key.
    pub line_width: f64,
    /// Dash applied to strokes.
    pub dash: DashState,
}

impl CacheKey {
    /// Creates a new key.
    pub fn new(
        path: PathHandle,
        transform: Affine,
        routine: DrawRoutine,
        line_width: f64,
        dash: DashState,
    ) -> Self {
        Self {
            path,
            transform,
            routine,
            line_width,
            dash,
        }
    }
}

impl Hash for CacheKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        for coeff in self.transform.as_coeffs() {
            coeff.to_bits().hash(state);
        }
        self.routine.hash(state);
        self.line_width.to_bits().hash(state);
        self.dash.hash(state);
    }
}

impl PartialEq for CacheKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Cheap scalar fields first.
        self.routine == other.routine
            && self.line_width.to_bits() == other.line_width.to_bits()
            && self
                .transform
                .as_coeffs()
                .iter()
                .zip(other.transform.as_coeffs().iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
            && self.dash == other.dash
            && self.path == other.path
    }
}

impl Eq for CacheKey {}
