// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drawing context that records what is painted into it.
//!
//! A [`MaskRecorder`] stands in for a real drawing surface: patterns masked through it are
//! recorded as [`MaskCommand`]s which can be inspected, or replayed onto any other
//! [`OutlineTarget`] later.

use alloc::vec::Vec;

use crate::dash::DashContext;
use crate::kurbo::{Affine, BezPath};
use crate::renderers::outline::OutlineTarget;
use crate::Fill;

/// A single command recorded by a [`MaskRecorder`].
///
/// The variants correspond 1:1 to the methods of [`OutlineTarget`] and [`DashContext`].
#[derive(Clone, Debug, PartialEq)]
pub enum MaskCommand {
    /// Fill an outline with the current paint.
    FillOutline {
        /// Outline-to-surface transform.
        transform: Affine,
        /// The outline.
        path: BezPath,
        /// Fill rule.
        fill: Fill,
    },
    /// Replace the current dash.
    SetDash {
        /// Dash offset.
        offset: f64,
        /// On/off lengths.
        pattern: Vec<f64>,
    },
}

/// Records outline fills and dash changes.
#[derive(Clone, Debug, Default)]
pub struct MaskRecorder {
    dash_offset: f64,
    dash_pattern: Vec<f64>,
    /// The recorded commands.
    pub commands: Vec<MaskCommand>,
}

impl MaskRecorder {
    /// Creates a recorder with no dash and no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes all recorded commands, leaving the recorder empty.
    ///
    /// The current dash is kept.
    pub fn take_commands(&mut self) -> Vec<MaskCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Number of outline fills recorded.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, MaskCommand::FillOutline { .. }))
            .count()
    }

    /// Replays the recorded commands onto `target`, in order.
    pub fn replay(&self, target: &mut impl OutlineTarget) {
        for command in &self.commands {
            match command {
                MaskCommand::FillOutline {
                    transform,
                    path,
                    fill,
                } => target.fill_outline(*transform, path, *fill),
                MaskCommand::SetDash { offset, pattern } => target.set_dash(*offset, pattern),
            }
        }
    }
}

impl DashContext for MaskRecorder {
    fn dash(&self) -> (f64, &[f64]) {
        (self.dash_offset, self.dash_pattern.as_slice())
    }

    fn set_dash(&mut self, offset: f64, pattern: &[f64]) {
        self.dash_offset = offset;
        self.dash_pattern.clear();
        self.dash_pattern.extend_from_slice(pattern);
        self.commands.push(MaskCommand::SetDash {
            offset,
            pattern: pattern.to_vec(),
        });
    }
}

impl OutlineTarget for MaskRecorder {
    fn fill_outline(&mut self, transform: Affine, path: &BezPath, fill: Fill) {
        self.commands.push(MaskCommand::FillOutline {
            transform,
            path: path.clone(),
            fill,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dash::{convert_dash, set_dashes, DashState};

    #[test]
    fn records_dash_changes() {
        let mut recorder = MaskRecorder::new();
        assert_eq!(convert_dash(&recorder), DashState::NONE);

        let dash = DashState::from_spec(Some(1.5), Some(&[4.0, 2.0])).unwrap();
        set_dashes(&mut recorder, &dash);
        assert_eq!(convert_dash(&recorder), dash);
        assert_eq!(
            recorder.take_commands(),
            [MaskCommand::SetDash {
                offset: 1.5,
                pattern: alloc::vec![4.0, 2.0],
            }]
        );
        assert!(recorder.commands.is_empty());
        assert_eq!(convert_dash(&recorder), dash);
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut recorder = MaskRecorder::new();
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 1.0));
        recorder.fill_outline(Affine::translate((2.0, 3.0)), &path, Fill::EvenOdd);
        recorder.set_dash(0.0, &[1.0]);
        assert_eq!(recorder.fill_count(), 1);

        let mut copy = MaskRecorder::new();
        recorder.replay(&mut copy);
        assert_eq!(copy.commands, recorder.commands);
        assert_eq!(copy.dash(), (0.0, &[1.0][..]));
    }
}
