// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `convert` module orchestrates the full conversion: conditioning, the loudness gate, the
//! fade-out tail, the codec, and nibble packing.

use log::debug;

use crate::codec::{self, CodecState};
use crate::dsp::{self, Channels};
use crate::errors::{level_range_error, malformed_input_error, Result};
use crate::nibble;

/// `ConverterOptions` is a collection of options a conversion uses.
#[derive(Copy, Clone, Debug)]
pub struct ConverterOptions {
    /// Peak level above which the source is rejected as too close to clipping, in percent of
    /// full scale. Default: 90.0.
    pub max_peak_pct: f64,
    /// Average level below which the source is rejected as too quiet, in percent of full scale.
    /// Default: 6.0.
    pub min_avg_pct: f64,
    /// Linearly fade out the final second of audio. Default: `false`.
    pub fade_out: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions { max_peak_pct: 90.0, min_avg_pct: 6.0, fade_out: false }
    }
}

/// Peak and average absolute level of the conditioned signal, in percent of 16-bit full scale.
/// Measured before any fade-out is applied.
#[derive(Copy, Clone, Debug, Default)]
pub struct LevelMetrics {
    pub avg_pct: f64,
    pub peak_pct: f64,
}

/// The product of a successful conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Packed 4-bit ADPCM codes, two per byte, low nibble first.
    pub adpcm: Vec<u8>,
    /// The loudness measured while conditioning the input.
    pub levels: LevelMetrics,
}

/// Converts big-endian 16-bit PCM into packed X680x0 ADPCM at the target rate.
///
/// The input is downmixed to mono and decimated to `dst_rate`, then metered. Conversion is
/// refused with [`Error::LevelRange`](crate::errors::Error::LevelRange) when the measured average
/// level falls below `min_avg_pct` or the peak exceeds `max_peak_pct`; the error carries the
/// measured levels. On success the conditioned samples, faded if requested, are truncated to the
/// codec's 12-bit range and encoded with the state threaded from the initial `(0, 0)`.
pub fn convert(
    pcm: &[u8],
    channels: Channels,
    src_rate: u32,
    dst_rate: u32,
    options: &ConverterOptions,
) -> Result<Conversion> {
    if src_rate == 0 || dst_rate == 0 {
        return malformed_input_error("sample rates must be non-zero");
    }

    let (mut samples, meter) = dsp::condition(pcm, channels, src_rate, dst_rate)?;

    let levels = LevelMetrics { avg_pct: meter.avg_pct(), peak_pct: meter.peak_pct() };
    debug!("average level {:.2}%, peak level {:.2}%", levels.avg_pct, levels.peak_pct);

    if levels.avg_pct < options.min_avg_pct || levels.peak_pct > options.max_peak_pct {
        return level_range_error(levels.avg_pct, levels.peak_pct);
    }

    // The gate meters the unfaded signal, so fade only after it passes.
    if options.fade_out {
        dsp::fade_out(&mut samples, dst_rate);
    }

    let mut state = CodecState::new();
    let mut codes = Vec::with_capacity(samples.len());

    for &sample in &samples {
        // 16-bit to 12-bit: the arithmetic shift keeps floor semantics for negative samples.
        let target = i32::from(sample) >> 4;
        codes.push(codec::encode(target, &mut state));
    }

    Ok(Conversion { adpcm: nibble::pack(&codes), levels })
}

/// Expands packed ADPCM back into 16-bit samples. The lossy inverse of [`convert`].
pub fn decode(adpcm: &[u8]) -> Vec<i16> {
    let mut state = CodecState::new();
    nibble::unpack(adpcm).map(|code| (codec::decode(code, &mut state) << 4) as i16).collect()
}
