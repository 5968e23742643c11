// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `pattern_cache`.
//!
//! - The `util` module contains the instrumented backend and sample paths shared by the
//!   different test modules.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so the shared utilities are compiled once.
//! - If you want to add new tests, put them into the module matching their "topic" (keys,
//!   dashes, subpixel placement, failures, rasterization), or `basic.rs` otherwise. Start the
//!   test name with the topic, e.g. `subpixel_whole_pixel_shift` rather than
//!   `whole_pixel_shift_subpixel`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod dash;
mod util;
