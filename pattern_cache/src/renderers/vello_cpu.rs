// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline pattern target implementation using Vello CPU.
//!
//! The dash lives on the context's current stroke; outlines are filled with the context's
//! current paint.

use vello_cpu::RenderContext;

use crate::dash::DashContext;
use crate::kurbo::{Affine, BezPath};
use crate::renderers::outline::OutlineTarget;
use crate::Fill;

impl DashContext for RenderContext {
    fn dash(&self) -> (f64, &[f64]) {
        let stroke = self.stroke();
        (stroke.dash_offset, stroke.dash_pattern.as_slice())
    }

    fn set_dash(&mut self, offset: f64, pattern: &[f64]) {
        let mut stroke = self.stroke().clone();
        stroke.dash_offset = offset;
        stroke.dash_pattern = pattern.iter().copied().collect();
        self.set_stroke(stroke);
    }
}

impl OutlineTarget for RenderContext {
    fn fill_outline(&mut self, transform: Affine, path: &BezPath, fill: Fill) {
        let old_transform = *self.transform();
        let old_fill = *self.fill_rule();
        self.set_transform(transform);
        self.set_fill_rule(fill);
        self.fill_path(path);
        self.set_fill_rule(old_fill);
        self.set_transform(old_transform);
    }
}
