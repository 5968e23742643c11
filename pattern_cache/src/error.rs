// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for dash conversion and pattern rendering.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context is known about the
/// offending input: the index and value of a rejected dash length, the phase that
/// failed to render, or a short reason supplied by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    detail: Detail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Detail {
    DashLength { index: usize, value: f64 },
    DashOffset(f64),
    ZeroDashTotal,
    Render { phase: Option<usize>, reason: &'static str },
    Phase { index: usize, len: usize },
    Position { x: f64, y: f64 },
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The phase whose render failed, for [`ErrorKind::PatternCreationFailed`] or
    /// [`ErrorKind::PhaseIndexOutOfRange`].
    pub fn phase(&self) -> Option<usize> {
        match self.detail {
            Detail::Render { phase, .. } => phase,
            Detail::Phase { index, .. } => Some(index),
            _ => None,
        }
    }

    /// The position and value of the rejected dash length, if a length was at fault.
    pub fn dash_length(&self) -> Option<(usize, f64)> {
        match self.detail {
            Detail::DashLength { index, value } => Some((index, value)),
            _ => None,
        }
    }

    /// Creates a [`ErrorKind::PatternCreationFailed`] error.
    ///
    /// Backends return this from [`PatternBackend::create_pattern`] with a short static
    /// description of what they could not render.
    ///
    /// [`PatternBackend::create_pattern`]: crate::PatternBackend::create_pattern
    pub fn pattern_creation_failed(reason: &'static str) -> Self {
        Self {
            kind: ErrorKind::PatternCreationFailed,
            detail: Detail::Render {
                phase: None,
                reason,
            },
        }
    }

    pub(crate) fn invalid_dash_length(index: usize, value: f64) -> Self {
        Self {
            kind: ErrorKind::InvalidDashSpec,
            detail: Detail::DashLength { index, value },
        }
    }

    pub(crate) fn invalid_dash_offset(offset: f64) -> Self {
        Self {
            kind: ErrorKind::InvalidDashSpec,
            detail: Detail::DashOffset(offset),
        }
    }

    pub(crate) fn zero_dash_total() -> Self {
        Self {
            kind: ErrorKind::InvalidDashSpec,
            detail: Detail::ZeroDashTotal,
        }
    }

    pub(crate) fn non_finite_position(x: f64, y: f64) -> Self {
        Self {
            kind: ErrorKind::NonFinitePosition,
            detail: Detail::Position { x, y },
        }
    }

    pub(crate) fn phase_out_of_range(index: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::PhaseIndexOutOfRange,
            detail: Detail::Phase { index, len },
        }
    }

    /// Attaches the phase being rendered to a render failure.
    pub(crate) fn at_phase(mut self, phase: usize) -> Self {
        if let Detail::Render { reason, .. } = self.detail {
            self.detail = Detail::Render {
                phase: Some(phase),
                reason,
            };
        }
        self
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.detail {
            Detail::DashLength { index, value } => write!(
                f,
                "invalid dash spec: length {value} at index {index} is not finite and non-negative"
            ),
            Detail::DashOffset(offset) => {
                write!(f, "invalid dash spec: offset {offset} is not finite")
            }
            Detail::ZeroDashTotal => write!(f, "invalid dash spec: dash lengths sum to zero"),
            Detail::Render {
                phase: Some(phase),
                reason,
            } => write!(f, "pattern creation failed for phase {phase}: {reason}"),
            Detail::Render {
                phase: None,
                reason,
            } => write!(f, "pattern creation failed: {reason}"),
            Detail::Phase { index, len } => write!(
                f,
                "subpixel phase index {index} out of range for {len} cached patterns"
            ),
            Detail::Position { x, y } => {
                write!(f, "paint position ({x}, {y}) is not finite")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A host-supplied dash specification had a negative or non-finite length, a non-finite
    /// offset, or lengths summing to zero.
    InvalidDashSpec,

    /// The rendering backend could not produce a pattern for a cache miss.
    ///
    /// Nothing is inserted into the cache, so the same key can be retried.
    PatternCreationFailed,

    /// Subpixel quantization produced an index outside the entry's pattern array.
    ///
    /// This is an internal invariant violation, never an expected runtime condition.
    PhaseIndexOutOfRange,

    /// A paint position had a NaN or infinite coordinate.
    ///
    /// Nothing is painted and the cache is not consulted.
    NonFinitePosition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn render_failure_reports_phase() {
        let err = Error::pattern_creation_failed("non-finite geometry").at_phase(3);
        assert_eq!(err.kind(), ErrorKind::PatternCreationFailed);
        assert_eq!(err.phase(), Some(3));
        assert_eq!(
            err.to_string(),
            "pattern creation failed for phase 3: non-finite geometry"
        );
    }

    #[test]
    fn dash_length_context() {
        let err = Error::invalid_dash_length(0, -1.0);
        assert_eq!(err.kind(), ErrorKind::InvalidDashSpec);
        assert_eq!(err.dash_length(), Some((0, -1.0)));
        assert_eq!(err.phase(), None);
    }

    #[test]
    fn non_finite_position_message() {
        let err = Error::non_finite_position(f64::NAN, 1.0);
        assert_eq!(err.kind(), ErrorKind::NonFinitePosition);
        assert_eq!(err.phase(), None);
        assert_eq!(err.to_string(), "paint position (NaN, 1) is not finite");
    }

    #[test]
    fn at_phase_leaves_other_kinds_alone() {
        let err = Error::zero_dash_total().at_phase(1);
        assert_eq!(err.kind(), ErrorKind::InvalidDashSpec);
        assert_eq!(err.phase(), None);
    }
}
