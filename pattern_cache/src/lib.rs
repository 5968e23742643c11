// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pattern Cache avoids re-rendering a path that is drawn many times with the same visual
//! parameters at different positions, such as plot markers, hatch tiles or dashed strokes.
//!
//! A [`PatternCache`] keeps two tables:
//!
//! - the intrinsic (untransformed) bounding box of every distinct path, keyed by [`PathHandle`];
//! - one [`PatternEntry`] per [`CacheKey`] (path, transform, [`DrawRoutine`], line width and
//!   [`DashState`]), holding the transformed bounds and one rendered pattern per subpixel phase.
//!
//! [`PatternCache::mask`] resolves both, picks the pattern rendered for the fractional part of
//! the requested position and paints it once, at an integer offset, through the
//! [`PatternBackend`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `vello_cpu`: Implements [`OutlineTarget`](renderers::outline::OutlineTarget) for Vello CPU's
//!   `RenderContext`.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko::{kurbo, Fill};

mod backend;
mod cache;
mod dash;
mod error;
mod key;
mod subpixel;

pub mod renderers;

pub use backend::{PatternBackend, RenderRequest};
pub use cache::{
    PatternCache, PatternCacheConfig, PatternCacheStats, PatternEntry, DEFAULT_SUBPIXEL_BUCKETS,
    DEFAULT_THRESHOLD,
};
pub use dash::{convert_dash, set_dashes, DashContext, DashState};
pub use error::{Error, ErrorKind};
pub use key::{CacheKey, DrawRoutine, LineCap, LineJoin, PathHandle, StrokeStyle};
pub use subpixel::Placement;
