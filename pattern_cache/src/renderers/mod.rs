// Copyright 2025 the Pattern Cache Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various renderer implementation backends.

pub mod outline;
pub mod recorder;

#[cfg(feature = "vello_cpu")]
pub mod vello_cpu;
