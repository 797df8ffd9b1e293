// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `dsp` module conditions raw PCM for the codec: stereo downmix, counter-based decimation to
//! the target rate, loudness metering, and the optional fade-out tail.

use log::{debug, warn};

use crate::errors::{malformed_input_error, Result};

/// The channel layout of the input PCM stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channels {
    Mono,
    Stereo,
}

impl Channels {
    pub fn count(&self) -> usize {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }

    pub fn from_count(count: u32) -> Option<Channels> {
        match count {
            1 => Some(Channels::Mono),
            2 => Some(Channels::Stereo),
            _ => None,
        }
    }
}

/// `LevelMeter` accumulates the peak and average absolute level of the metered samples.
///
/// Levels are reported in percent of 16-bit full scale (32767). Metering an empty stream reports
/// 0.0 for both, which the loudness gate downstream rejects as silence.
#[derive(Clone, Debug, Default)]
pub struct LevelMeter {
    peak: i32,
    sum: u64,
    count: u64,
}

impl LevelMeter {
    pub fn add(&mut self, sample: i16) {
        // Widen before taking the absolute value, i16::MIN has no i16 negation.
        let abs = i32::from(sample).abs();
        self.peak = self.peak.max(abs);
        self.sum += abs as u64;
        self.count += 1;
    }

    pub fn peak_pct(&self) -> f64 {
        100.0 * f64::from(self.peak) / 32767.0
    }

    pub fn avg_pct(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        100.0 * self.sum as f64 / self.count as f64 / 32767.0
    }
}

/// Decodes big-endian 16-bit PCM and decimates it to the target rate, downmixing stereo to mono
/// and metering the accepted samples.
///
/// The decimator accumulates `dst_rate` per input frame and accepts a frame whenever the counter
/// reaches `src_rate`, so at most one output sample is produced per input frame. When
/// `dst_rate > src_rate` every frame passes through unchanged; no interpolation is performed.
/// Stereo frames are averaged to mono with floor division, but both channels are metered
/// individually beforehand.
pub fn condition(
    pcm: &[u8],
    channels: Channels,
    src_rate: u32,
    dst_rate: u32,
) -> Result<(Vec<i16>, LevelMeter)> {
    let frame_len = 2 * channels.count();
    if pcm.len() % frame_len != 0 {
        return malformed_input_error("pcm length is not a multiple of the frame size");
    }

    if dst_rate > src_rate {
        warn!(
            "output rate {} Hz exceeds input rate {} Hz, passing samples through unchanged",
            dst_rate, src_rate
        );
    }

    let num_frames = pcm.len() / frame_len;
    let mut samples = Vec::with_capacity(num_frames);
    let mut meter = LevelMeter::default();
    let mut counter: u64 = 0;

    match channels {
        Channels::Mono => {
            for frame in pcm.chunks_exact(2) {
                counter += u64::from(dst_rate);
                if counter >= u64::from(src_rate) {
                    let m = i16::from_be_bytes([frame[0], frame[1]]);
                    meter.add(m);
                    samples.push(m);
                    counter -= u64::from(src_rate);
                }
            }
        }
        Channels::Stereo => {
            for frame in pcm.chunks_exact(4) {
                counter += u64::from(dst_rate);
                if counter >= u64::from(src_rate) {
                    let l = i16::from_be_bytes([frame[0], frame[1]]);
                    let r = i16::from_be_bytes([frame[2], frame[3]]);
                    meter.add(l);
                    meter.add(r);
                    // Arithmetic shift: floor division, matching the reference output for
                    // negative odd sums.
                    samples.push(((i32::from(l) + i32::from(r)) >> 1) as i16);
                    counter -= u64::from(src_rate);
                }
            }
        }
    }

    debug!("accepted {} of {} input frames", samples.len(), num_frames);

    Ok((samples, meter))
}

/// Linearly scales the final `window` samples down toward zero. The first sample of the window
/// keeps its full amplitude and the last is scaled by `1/window`. Streams shorter than the window
/// are left untouched.
pub fn fade_out(samples: &mut [i16], window: u32) {
    let window = window as usize;
    if window == 0 || samples.len() < window {
        return;
    }

    let start = samples.len() - window;
    for (k, sample) in samples[start..].iter_mut().enumerate() {
        *sample = (i64::from(*sample) * (window - k) as i64 / window as i64) as i16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_be_bytes(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_be_bytes()).collect()
    }

    #[test]
    fn verify_identity_resample() {
        let input: Vec<i16> = (0..480).map(|n| (n * 17) as i16).collect();
        let (samples, _) = condition(&to_be_bytes(&input), Channels::Mono, 48000, 48000).unwrap();
        assert_eq!(samples, input);
    }

    #[test]
    fn verify_decimate_by_two() {
        let input: Vec<i16> = (0..480).map(|n| n as i16).collect();
        let (samples, _) = condition(&to_be_bytes(&input), Channels::Mono, 48000, 24000).unwrap();
        assert_eq!(samples.len(), 240);
        // Every second input sample is accepted.
        assert_eq!(samples[0], 1);
        assert_eq!(samples[1], 3);
    }

    #[test]
    fn verify_pass_through_upsample() {
        let input: Vec<i16> = (0..100).map(|n| n as i16).collect();
        let (samples, _) = condition(&to_be_bytes(&input), Channels::Mono, 15625, 31250).unwrap();
        assert_eq!(samples, input);
    }

    #[test]
    fn verify_stereo_downmix() {
        let bytes = to_be_bytes(&[1000, 2000, -3, 0]);
        let (samples, meter) = condition(&bytes, Channels::Stereo, 48000, 48000).unwrap();
        assert_eq!(samples, vec![1500, -2]);
        // Both channels are metered individually.
        assert!((meter.peak_pct() - 100.0 * 2000.0 / 32767.0).abs() < 1e-9);
        assert!((meter.avg_pct() - 100.0 * (3003.0 / 4.0) / 32767.0).abs() < 1e-9);
    }

    #[test]
    fn verify_malformed_length() {
        assert!(condition(&[0u8; 3], Channels::Mono, 48000, 48000).is_err());
        assert!(condition(&[0u8; 6], Channels::Stereo, 48000, 48000).is_err());
    }

    #[test]
    fn verify_silence_meters_zero() {
        let (_, meter) = condition(&[0u8; 64], Channels::Mono, 48000, 48000).unwrap();
        assert_eq!(meter.peak_pct(), 0.0);
        assert_eq!(meter.avg_pct(), 0.0);
    }

    #[test]
    fn verify_empty_input_meters_zero() {
        let (samples, meter) = condition(&[], Channels::Mono, 48000, 48000).unwrap();
        assert!(samples.is_empty());
        assert_eq!(meter.avg_pct(), 0.0);
    }

    #[test]
    fn verify_fade_out_window() {
        let mut samples = vec![16384i16; 2000];
        fade_out(&mut samples, 1000);
        // Unscaled right up to the window.
        assert_eq!(samples[999], 16384);
        // Full amplitude at the window start, near zero at the end.
        assert_eq!(samples[1000], 16384);
        assert_eq!(i32::from(samples[1500]), 16384 * 500 / 1000);
        assert_eq!(samples[1999], 16384 / 1000);
    }

    #[test]
    fn verify_fade_out_short_stream() {
        let mut samples = vec![1000i16; 10];
        fade_out(&mut samples, 1000);
        assert_eq!(samples, vec![1000i16; 10]);
    }

    #[test]
    fn verify_fade_out_negative_samples() {
        let mut samples = vec![-1000i16; 4];
        fade_out(&mut samples, 4);
        // Truncation toward zero: -1000 * 1 / 4 is -250.
        assert_eq!(samples, vec![-1000, -750, -500, -250]);
    }
}
