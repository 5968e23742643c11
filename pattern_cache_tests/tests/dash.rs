// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dash conversion tests.

use pattern_cache::kurbo::PathEl;
use pattern_cache::renderers::recorder::{MaskCommand, MaskRecorder};
use pattern_cache::{convert_dash, set_dashes, DashState, ErrorKind};
use vello_cpu::RenderContext;

use crate::util::{samples, stroke_key, test_cache};

#[test]
fn dash_round_trip_through_contexts() {
    let cases: [(Option<f64>, Option<&[f64]>); 3] = [
        (None, None),
        (Some(0.0), Some(&[3.0, 1.0])),
        (Some(2.5), Some(&[5.0, 2.0, 1.0, 2.0])),
    ];
    for (offset, pattern) in cases {
        let dash = DashState::from_spec(offset, pattern).unwrap();

        let mut recorder = MaskRecorder::new();
        set_dashes(&mut recorder, &dash);
        assert_eq!(convert_dash(&recorder), dash);

        let mut ctx = RenderContext::new(8, 8);
        set_dashes(&mut ctx, &dash);
        assert_eq!(convert_dash(&ctx), dash);
    }
}

#[test]
fn dash_no_pattern_is_solid() {
    let recorder = MaskRecorder::new();
    assert!(convert_dash(&recorder).is_none());
    let dash = DashState::from_spec(Some(4.0), Some(&[])).unwrap();
    assert_eq!(dash, DashState::NONE);
    assert_eq!(dash.offset(), 0.0);
}

#[test]
fn dash_invalid_host_spec() {
    for pattern in [&[-1.0, 2.0][..], &[f64::NAN], &[0.0, 0.0]] {
        let err = DashState::from_spec(None, Some(pattern)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDashSpec, "{pattern:?}");
    }
    let err = DashState::from_spec(Some(f64::INFINITY), Some(&[1.0])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDashSpec);
}

#[test]
fn dash_from_context_hits_same_entry() {
    let mut cache = test_cache();
    let mut ctx = MaskRecorder::new();
    let path = samples::segment(8.0);
    let dash = DashState::from_spec(Some(1.0), Some(&[2.0, 1.0])).unwrap();

    set_dashes(&mut ctx, &dash);
    let key = stroke_key(&path, 1.0, convert_dash(&ctx));
    cache.mask(&mut ctx, &key, 0.0, 0.0).unwrap();

    // Reset and reapply the same dash: the round trip yields an equal key.
    set_dashes(&mut ctx, &DashState::NONE);
    set_dashes(&mut ctx, &dash);
    let again = stroke_key(&path, 1.0, convert_dash(&ctx));
    cache.mask(&mut ctx, &again, 0.0, 0.0).unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn dash_splits_cached_stroke() {
    let mut cache = test_cache();
    let mut ctx = MaskRecorder::new();
    let path = samples::segment(20.0);
    let dash = DashState::from_spec(None, Some(&[2.0, 3.0])).unwrap();

    let subpaths = |ctx: &mut MaskRecorder| {
        ctx.take_commands()
            .iter()
            .map(|command| match command {
                MaskCommand::FillOutline { path, .. } => path
                    .elements()
                    .iter()
                    .filter(|el| matches!(el, PathEl::MoveTo(_)))
                    .count(),
                MaskCommand::SetDash { .. } => 0,
            })
            .sum::<usize>()
    };

    cache
        .mask(&mut ctx, &stroke_key(&path, 1.0, DashState::NONE), 0.0, 0.0)
        .unwrap();
    assert_eq!(subpaths(&mut ctx), 1);

    cache
        .mask(&mut ctx, &stroke_key(&path, 1.0, dash), 0.0, 0.0)
        .unwrap();
    // Dashes start at 0, 5, 10 and 15.
    assert_eq!(subpaths(&mut ctx), 4);
}
