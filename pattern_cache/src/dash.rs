// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canonical dash state.
//!
//! Drawing contexts store dashes in whatever form the backend prefers, which is rarely
//! hashable. [`DashState`] is the single place where dash equality is defined: every cache
//! key carries one, and it can be read from and written back to any [`DashContext`].

use core::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::error::Error;

/// Lengths of dashes in alternating on/off order.
///
/// Same inline capacity as kurbo's `Dashes`.
type DashLengths = SmallVec<[f64; 4]>;

/// A drawing context whose current dash pattern can be read and replaced.
pub trait DashContext {
    /// Returns the current dash offset and on/off lengths.
    ///
    /// An empty slice means the context does not dash its strokes.
    fn dash(&self) -> (f64, &[f64]);

    /// Replaces the current dash offset and on/off lengths.
    fn set_dash(&mut self, offset: f64, pattern: &[f64]);
}

/// Canonical, hashable dash offset and pattern.
///
/// Two dash states are equal iff their offsets have identical bit patterns and their
/// lengths are pairwise bit-identical. [`DashState::NONE`] is the only state with an
/// empty pattern.
#[derive(Clone, Debug, Default)]
pub struct DashState {
    offset: f64,
    pattern: DashLengths,
}

impl DashState {
    /// The "no dash" state: solid strokes.
    pub const NONE: Self = Self {
        offset: 0.0,
        pattern: SmallVec::new_const(),
    };

    /// Reads the dash currently set on `ctx`.
    pub fn from_context(ctx: &impl DashContext) -> Self {
        let (offset, pattern) = ctx.dash();
        Self::canonical(offset, pattern)
    }

    /// Canonicalizes a host-supplied dash specification.
    ///
    /// A missing offset is `0.0`. A missing or empty pattern yields [`DashState::NONE`].
    /// Otherwise every length must be finite and non-negative, the lengths must not all be
    /// zero and the offset must be finite; violations fail with
    /// [`ErrorKind::InvalidDashSpec`](crate::ErrorKind::InvalidDashSpec).
    pub fn from_spec(offset: Option<f64>, pattern: Option<&[f64]>) -> Result<Self, Error> {
        let pattern = match pattern {
            Some(pattern) if !pattern.is_empty() => pattern,
            _ => return Ok(Self::NONE),
        };
        for (index, &length) in pattern.iter().enumerate() {
            if !length.is_finite() || length < 0.0 {
                return Err(Error::invalid_dash_length(index, length));
            }
        }
        if pattern.iter().all(|&length| length == 0.0) {
            return Err(Error::zero_dash_total());
        }
        let offset = offset.unwrap_or(0.0);
        if !offset.is_finite() {
            return Err(Error::invalid_dash_offset(offset));
        }
        Ok(Self::canonical(offset, pattern))
    }

    fn canonical(offset: f64, pattern: &[f64]) -> Self {
        if pattern.is_empty() {
            return Self::NONE;
        }
        Self {
            offset,
            pattern: SmallVec::from_slice(pattern),
        }
    }

    /// Writes this dash onto `ctx`.
    pub fn apply(&self, ctx: &mut impl DashContext) {
        ctx.set_dash(self.offset, self.pattern.as_slice());
    }

    /// Whether this is [`DashState::NONE`].
    #[inline]
    pub fn is_none(&self) -> bool {
        self.pattern.is_empty()
    }

    /// The dash offset.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The on/off lengths.
    #[inline]
    pub fn pattern(&self) -> &[f64] {
        &self.pattern
    }
}

impl Hash for DashState {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.to_bits().hash(state);
        self.pattern.len().hash(state);
        for length in &self.pattern {
            length.to_bits().hash(state);
        }
    }
}

impl PartialEq for DashState {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.offset.to_bits() == other.offset.to_bits()
            && self.pattern.len() == other.pattern.len()
            && self
                .pattern
                .iter()
                .zip(&other.pattern)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for DashState {}

/// Reads the dash currently set on `ctx`. Shorthand for [`DashState::from_context`].
pub fn convert_dash(ctx: &impl DashContext) -> DashState {
    DashState::from_context(ctx)
}

/// Writes `dash` onto `ctx`. Shorthand for [`DashState::apply`].
pub fn set_dashes(ctx: &mut impl DashContext, dash: &DashState) {
    dash.apply(ctx);
}
