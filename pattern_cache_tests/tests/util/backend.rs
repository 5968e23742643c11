// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A backend wrapper that counts calls and can be told to fail.

use std::cell::Cell;
use std::rc::Rc;

use pattern_cache::kurbo::{Point, Rect};
use pattern_cache::{Error, PathHandle, PatternBackend, RenderRequest};

/// Number of calls made into a [`Counting`] backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Calls {
    pub(crate) extents: usize,
    pub(crate) creates: usize,
    pub(crate) failures: usize,
    pub(crate) masks: usize,
    pub(crate) releases: usize,
}

impl Calls {
    /// Patterns created and not yet released.
    pub(crate) fn live(&self) -> usize {
        self.creates - self.releases
    }
}

/// Forwards to `inner`, counting every call.
///
/// The counters are shared, so they can still be read after the cache owning this backend
/// has been dropped.
pub(crate) struct Counting<B> {
    pub(crate) inner: B,
    calls: Rc<Cell<Calls>>,
    fail_at: Option<usize>,
    attempts: usize,
}

impl<B> Counting<B> {
    pub(crate) fn new(inner: B) -> Self {
        Self {
            inner,
            calls: Rc::default(),
            fail_at: None,
            attempts: 0,
        }
    }

    /// Makes the `attempt`-th (zero-based) pattern creation from now on fail.
    pub(crate) fn fail_at(&mut self, attempt: usize) {
        self.fail_at = Some(self.attempts + attempt);
    }

    pub(crate) fn calls(&self) -> Calls {
        self.calls.get()
    }

    pub(crate) fn shared_calls(&self) -> Rc<Cell<Calls>> {
        self.calls.clone()
    }

    fn bump(&self, f: impl FnOnce(&mut Calls)) {
        let mut calls = self.calls.get();
        f(&mut calls);
        self.calls.set(calls);
    }
}

impl<B: PatternBackend> PatternBackend for Counting<B> {
    type Context = B::Context;
    type Pattern = B::Pattern;

    fn path_extents(&mut self, path: &PathHandle) -> Rect {
        self.bump(|calls| calls.extents += 1);
        self.inner.path_extents(path)
    }

    fn create_pattern(
        &mut self,
        ctx: &mut B::Context,
        request: &RenderRequest<'_>,
    ) -> Result<B::Pattern, Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            self.bump(|calls| calls.failures += 1);
            return Err(Error::pattern_creation_failed("injected failure"));
        }
        let pattern = self.inner.create_pattern(ctx, request)?;
        self.bump(|calls| calls.creates += 1);
        Ok(pattern)
    }

    fn mask(&mut self, ctx: &mut B::Context, pattern: &B::Pattern, origin: Point) {
        self.bump(|calls| calls.masks += 1);
        self.inner.mask(ctx, pattern, origin);
    }

    fn release_pattern(&mut self, pattern: B::Pattern) {
        self.bump(|calls| calls.releases += 1);
        self.inner.release_pattern(pattern);
    }
}
