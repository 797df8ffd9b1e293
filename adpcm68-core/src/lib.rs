// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// The following lints are allowed in all Adpcm68 crates. Please see the workspace Cargo.toml for
// their justification.
#![allow(clippy::identity_op)]
#![allow(clippy::manual_range_contains)]

//! The core of Adpcm68: converts linear 16-bit big-endian PCM into the 4-bit ADPCM dialect of the
//! X680x0 sound chip family, resampling to the target playback rate and validating the source
//! loudness along the way.
//!
//! The single entry point is [`convert::convert`]. The lower-level building blocks (the stateful
//! codec step functions, the signal conditioner, and the nibble packer) are public so that callers
//! can drive them directly, for example to audition converted data with [`convert::decode`].

pub mod codec;
pub mod convert;
pub mod dsp;
pub mod errors;
pub mod nibble;
