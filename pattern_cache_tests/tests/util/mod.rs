// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod backend;
pub(crate) mod samples;

pub(crate) use backend::{Calls, Counting};

use pattern_cache::kurbo::Affine;
use pattern_cache::renderers::outline::OutlineBackend;
use pattern_cache::renderers::recorder::MaskRecorder;
use pattern_cache::{
    CacheKey, DashState, DrawRoutine, PathHandle, PatternCache, PatternCacheConfig, StrokeStyle,
};

/// The backend most tests run against: outlines recorded into a [`MaskRecorder`].
pub(crate) type TestBackend = Counting<OutlineBackend<MaskRecorder>>;

/// A cache over [`TestBackend`] with the default configuration.
pub(crate) fn test_cache() -> PatternCache<TestBackend> {
    test_cache_with(PatternCacheConfig::default())
}

pub(crate) fn test_cache_with(config: PatternCacheConfig) -> PatternCache<TestBackend> {
    PatternCache::new(Counting::new(OutlineBackend::new()), config)
}

pub(crate) fn fill_key(path: &PathHandle, transform: Affine) -> CacheKey {
    CacheKey::new(
        path.clone(),
        transform,
        DrawRoutine::Fill,
        1.0,
        DashState::NONE,
    )
}

pub(crate) fn stroke_key(path: &PathHandle, line_width: f64, dash: DashState) -> CacheKey {
    CacheKey::new(
        path.clone(),
        Affine::IDENTITY,
        DrawRoutine::Stroke(StrokeStyle::default()),
        line_width,
        dash,
    )
}
