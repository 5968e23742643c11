// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-tier pattern cache: intrinsic path bounds and per-key subpixel patterns.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::hash_map::RawEntryMut;
use hashbrown::HashMap;

use crate::backend::{PatternBackend, RenderRequest};
use crate::error::Error;
use crate::key::{CacheKey, PathHandle};
use crate::kurbo::{Point, Rect, Vec2};
use crate::subpixel::{self, Placement};

/// Default size, in device units, above which subpixel phases are not rendered.
pub const DEFAULT_THRESHOLD: f64 = 32.0;

/// Default number of subpixel buckets per axis.
pub const DEFAULT_SUBPIXEL_BUCKETS: u8 = 4;

/// Configuration for a [`PatternCache`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PatternCacheConfig {
    /// Size, in device units, above which an entry holds a single pattern.
    ///
    /// When the larger side of a key's transformed bounds exceeds this value, subpixel
    /// alignment is visually irrelevant, so one pattern is rendered and painted at the
    /// nearest whole pixel. Strokes count half the line width on each side (more for
    /// square caps); the extra room reserved for miter joins is not counted.
    pub threshold: f64,
    /// Number of subpixel buckets per axis (1-255).
    ///
    /// Small entries hold `subpixel_buckets²` patterns. More buckets means finer alignment
    /// but more renders and memory per key. Common values: 1 (disabled), 2, 4 (default), 8.
    /// Zero is treated as 1.
    pub subpixel_buckets: u8,
}

impl Default for PatternCacheConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            subpixel_buckets: DEFAULT_SUBPIXEL_BUCKETS,
        }
    }
}

/// Transformed bounds of a key plus its rendered patterns, one per subpixel phase.
///
/// Entries are immutable once created.
pub struct PatternEntry<P> {
    bounds: Rect,
    buckets: u8,
    patterns: Box<[P]>,
}

impl<P> PatternEntry<P> {
    /// Bounds of the path after the key's transform, including stroke reach.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// All rendered patterns, indexed by phase.
    #[inline]
    pub fn patterns(&self) -> &[P] {
        &self.patterns
    }

    /// Whether this entry renders subpixel phases.
    ///
    /// `false` for entries above the threshold and for caches with a single bucket.
    #[inline]
    pub fn is_subpixel(&self) -> bool {
        self.patterns.len() > 1
    }

    /// Computes where a pattern of this entry lands when the key is drawn at `position`.
    pub fn place(&self, position: Point) -> Placement {
        let target = position + Vec2::new(self.bounds.x0, self.bounds.y0);
        subpixel::place(target, self.buckets)
    }

    /// The pattern rendered for `phase`.
    pub fn pattern(&self, phase: usize) -> Result<&P, Error> {
        debug_assert!(
            phase < self.patterns.len(),
            "subpixel phase {phase} out of range for {} patterns",
            self.patterns.len()
        );
        self.patterns
            .get(phase)
            .ok_or_else(|| Error::phase_out_of_range(phase, self.patterns.len()))
    }
}

impl<P> Debug for PatternEntry<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PatternEntry")
            .field("bounds", &self.bounds)
            .field("buckets", &self.buckets)
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

/// Statistics about a [`PatternCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternCacheStats {
    /// Number of distinct paths whose intrinsic bounds are cached.
    pub bbox_entries: usize,
    /// Number of pattern entries (distinct keys).
    pub pattern_entries: usize,
    /// Total number of backend patterns owned by the cache.
    pub patterns: usize,
    /// Pattern entry lookups that found an existing entry since the last `clear_stats()`.
    pub hits: u64,
    /// Pattern entry lookups that had to create an entry since the last `clear_stats()`.
    pub misses: u64,
    /// Patterns rendered by the backend since the last `clear_stats()`.
    pub renders: u64,
}

/// Caches rendered patterns of paths drawn repeatedly with the same visual parameters.
///
/// Entries are never evicted: they live until the cache is dropped, at which point every
/// owned pattern is handed back to [`PatternBackend::release_pattern`].
///
/// All operations run synchronously on the calling thread and take `&mut self`. Sharing one
/// cache between threads requires wrapping the whole cache (not just lookups) in a lock, so
/// that a lookup and the insertion following a miss stay atomic. The usual setup is one
/// cache per drawing surface.
pub struct PatternCache<B: PatternBackend> {
    backend: B,
    store: PatternStore<B::Pattern>,
}

impl<B: PatternBackend> PatternCache<B> {
    /// Creates an empty cache rendering through `backend`.
    pub fn new(backend: B, config: PatternCacheConfig) -> Self {
        let config = PatternCacheConfig {
            subpixel_buckets: config.subpixel_buckets.max(1),
            ..config
        };
        Self {
            backend,
            store: PatternStore::new(config),
        }
    }

    /// Creates an empty cache with the given threshold and default subpixel buckets.
    pub fn with_threshold(backend: B, threshold: f64) -> Self {
        Self::new(
            backend,
            PatternCacheConfig {
                threshold,
                ..PatternCacheConfig::default()
            },
        )
    }

    /// Paints the pattern for `key` at `(x, y)` through `ctx`.
    ///
    /// Resolves the path's intrinsic bounds and the key's pattern entry (rendering them on
    /// first use), selects the pattern for the subpixel phase of the target position and
    /// issues exactly one [`PatternBackend::mask`] call at the whole-pixel placement, which
    /// is returned.
    ///
    /// If rendering fails, nothing is painted and nothing is cached; a later call with the
    /// same key retries. A non-finite position fails with
    /// [`ErrorKind::NonFinitePosition`](crate::ErrorKind::NonFinitePosition) without
    /// painting or touching the cache.
    pub fn mask(
        &mut self,
        ctx: &mut B::Context,
        key: &CacheKey,
        x: f64,
        y: f64,
    ) -> Result<Placement, Error> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::non_finite_position(x, y));
        }
        let entry = self.store.resolve(&mut self.backend, ctx, key)?;
        let placement = entry.place(Point::new(x, y));
        let pattern = entry.pattern(placement.phase)?;
        self.backend.mask(ctx, pattern, placement.origin());
        Ok(placement)
    }

    /// Returns the pattern entry for `key`, creating it on first use.
    pub fn resolve(
        &mut self,
        ctx: &mut B::Context,
        key: &CacheKey,
    ) -> Result<&PatternEntry<B::Pattern>, Error> {
        self.store.resolve(&mut self.backend, ctx, key)
    }

    /// Returns the untransformed bounds of `path`, computing them on first use.
    pub fn path_bounds(&mut self, path: &PathHandle) -> Rect {
        self.store.path_bounds(&mut self.backend, path)
    }

    /// Returns the pattern entry for `key` if it has already been created.
    pub fn entry(&self, key: &CacheKey) -> Option<&PatternEntry<B::Pattern>> {
        self.store.patterns.get(key)
    }

    /// The configuration in effect.
    #[inline]
    pub fn config(&self) -> &PatternCacheConfig {
        &self.store.config
    }

    /// The rendering backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The rendering backend, mutably.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Number of pattern entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.patterns.len()
    }

    /// Whether no pattern entry has been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.patterns.is_empty()
    }

    /// Current cache statistics.
    pub fn stats(&self) -> PatternCacheStats {
        PatternCacheStats {
            bbox_entries: self.store.bboxes.len(),
            pattern_entries: self.store.patterns.len(),
            patterns: self.store.pattern_count,
            hits: self.store.hits,
            misses: self.store.misses,
            renders: self.store.renders,
        }
    }

    /// Clears hit, miss and render counters without touching cached entries.
    pub fn clear_stats(&mut self) {
        self.store.hits = 0;
        self.store.misses = 0;
        self.store.renders = 0;
    }
}

impl<B: PatternBackend> Drop for PatternCache<B> {
    fn drop(&mut self) {
        self.store.release_all(&mut self.backend);
    }
}

impl<B: PatternBackend> Debug for PatternCache<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PatternCache")
            .field("config", &self.store.config)
            .field("bboxes", &self.store.bboxes.len())
            .field("patterns", &self.store.patterns.len())
            .field("pattern_count", &self.store.pattern_count)
            .finish_non_exhaustive()
    }
}

/// Cache tables and counters, split from the backend so entries can be borrowed while
/// the backend paints.
struct PatternStore<P> {
    config: PatternCacheConfig,
    /// Bounds of the untransformed paths.
    bboxes: HashMap<PathHandle, Rect>,
    /// Bounds of the transformed paths, and patterns.
    patterns: HashMap<CacheKey, PatternEntry<P>>,
    pattern_count: usize,
    hits: u64,
    misses: u64,
    renders: u64,
}

impl<P> PatternStore<P> {
    fn new(config: PatternCacheConfig) -> Self {
        Self {
            config,
            bboxes: HashMap::new(),
            patterns: HashMap::new(),
            pattern_count: 0,
            hits: 0,
            misses: 0,
            renders: 0,
        }
    }

    fn path_bounds<B>(&mut self, backend: &mut B, path: &PathHandle) -> Rect
    where
        B: PatternBackend<Pattern = P>,
    {
        match self.bboxes.raw_entry_mut().from_key(path) {
            RawEntryMut::Occupied(entry) => *entry.get(),
            RawEntryMut::Vacant(entry) => {
                let bounds = backend.path_extents(path);
                entry.insert(path.clone(), bounds);
                bounds
            }
        }
    }

    fn resolve<B>(
        &mut self,
        backend: &mut B,
        ctx: &mut B::Context,
        key: &CacheKey,
    ) -> Result<&PatternEntry<P>, Error>
    where
        B: PatternBackend<Pattern = P>,
    {
        let intrinsic = self.path_bounds(backend, &key.path);
        match self.patterns.raw_entry_mut().from_key(key) {
            RawEntryMut::Occupied(entry) => {
                self.hits += 1;
                log::trace!("pattern cache hit for {:?}", key.routine);
                Ok(&*entry.into_mut())
            }
            RawEntryMut::Vacant(entry) => {
                self.misses += 1;
                log::trace!("pattern cache miss for {:?}", key.routine);
                let created = create_entry(backend, ctx, key, intrinsic, &self.config)?;
                let count = created.patterns.len();
                log::debug!(
                    "rendered {count} pattern(s) for {:?} with bounds {:?}",
                    key.routine,
                    created.bounds
                );
                self.pattern_count += count;
                self.renders += count as u64;
                Ok(&*entry.insert(key.clone(), created).1)
            }
        }
    }

    fn release_all<B>(&mut self, backend: &mut B)
    where
        B: PatternBackend<Pattern = P>,
    {
        for (_, entry) in self.patterns.drain() {
            for pattern in entry.patterns.into_vec() {
                backend.release_pattern(pattern);
            }
        }
        self.bboxes.clear();
        self.pattern_count = 0;
    }
}

/// Renders every phase of a new entry.
fn create_entry<B: PatternBackend>(
    backend: &mut B,
    ctx: &mut B::Context,
    key: &CacheKey,
    intrinsic: Rect,
    config: &PatternCacheConfig,
) -> Result<PatternEntry<B::Pattern>, Error> {
    if !(key.line_width.is_finite() && key.line_width >= 0.0) {
        return Err(Error::pattern_creation_failed(
            "line width must be finite and non-negative",
        ));
    }
    let bounds = transformed_bounds(key, intrinsic);
    if !bounds.is_finite() {
        return Err(Error::pattern_creation_failed(
            "transformed bounds are not finite",
        ));
    }

    let size = visual_bounds(key, intrinsic);
    let buckets = if size.width().max(size.height()) > config.threshold {
        1
    } else {
        config.subpixel_buckets
    };
    let count = subpixel::phase_count(buckets);
    let origin = Vec2::new(bounds.x0, bounds.y0);

    let mut pending = PendingPatterns {
        backend,
        patterns: Vec::with_capacity(count),
    };
    for phase in 0..count {
        let request = RenderRequest {
            path: &key.path,
            transform: key
                .transform
                .then_translate(subpixel::phase_offset(phase, buckets) - origin),
            routine: key.routine,
            line_width: key.line_width,
            dash: &key.dash,
            phase,
        };
        match pending.backend.create_pattern(ctx, &request) {
            Ok(pattern) => pending.patterns.push(pattern),
            Err(err) => {
                let err = err.at_phase(phase);
                log::warn!("{err}; discarding {phase} rendered phase(s)");
                return Err(err);
            }
        }
    }

    Ok(PatternEntry {
        bounds,
        buckets,
        patterns: pending.finish(),
    })
}

/// Bounds of the key's path in device space, grown by how far its stroke can reach.
fn transformed_bounds(key: &CacheKey, intrinsic: Rect) -> Rect {
    let bounds = key.transform.transform_rect_bbox(intrinsic);
    match key.routine.stroke_style() {
        Some(style) => {
            let pad = 0.5 * key.line_width * style.reach();
            bounds.inflate(pad, pad)
        }
        None => bounds,
    }
}

/// Bounds used for the threshold decision.
///
/// Miter joins only reach far past the path at sharp corners, so they are not counted here.
fn visual_bounds(key: &CacheKey, intrinsic: Rect) -> Rect {
    let bounds = key.transform.transform_rect_bbox(intrinsic);
    match key.routine.stroke_style() {
        Some(style) => {
            let pad = 0.5 * key.line_width * style.body_reach();
            bounds.inflate(pad, pad)
        }
        None => bounds,
    }
}

/// Patterns rendered for an entry that is not inserted yet.
///
/// Releases everything it holds when dropped, so a failed or unwinding creation never
/// leaks backend patterns.
struct PendingPatterns<'a, B: PatternBackend> {
    backend: &'a mut B,
    patterns: Vec<B::Pattern>,
}

impl<B: PatternBackend> PendingPatterns<'_, B> {
    fn finish(mut self) -> Box<[B::Pattern]> {
        core::mem::take(&mut self.patterns).into_boxed_slice()
    }
}

impl<B: PatternBackend> Drop for PendingPatterns<'_, B> {
    fn drop(&mut self) {
        for pattern in self.patterns.drain(..) {
            self.backend.release_pattern(pattern);
        }
    }
}
