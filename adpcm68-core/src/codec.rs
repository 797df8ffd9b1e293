// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `codec` module implements the stateful X680x0 ADPCM encode and decode step functions.
//!
//! Each step consumes one 12-bit sample (encode) or one 4-bit code (decode) and advances a
//! [`CodecState`]. The encoder advances its state by running the decoder on the code it just
//! produced, which keeps both sides of the codec bit-for-bit synchronized.

/// Lower bound of the 12-bit predictor range.
pub const ESTIMATE_MIN: i32 = -2048;
/// Upper bound of the 12-bit predictor range.
pub const ESTIMATE_MAX: i32 = 2047;

/// Highest valid index into [`STEP_SIZE_TABLE`].
pub const STEP_INDEX_MAX: i32 = 48;

/// Per-code step index adjustment. Low-magnitude codes shrink the step, high-magnitude codes
/// grow it.
#[rustfmt::skip]
const STEP_ADJUST_TABLE: [i32; 16] = [
    -1, -1, -1, -1, 2, 4, 6, 8,
    -1, -1, -1, -1, 2, 4, 6, 8,
];

/// Quantization step sizes, each entry roughly 1.1x the previous.
#[rustfmt::skip]
const STEP_SIZE_TABLE: [i32; 49] = [
     16,  17,  19,  21,  23,  25,  28,  31,  34,  37,  41,  45,   50,   55,   60,   66,
     73,  80,  88,  97, 107, 118, 130, 143, 157, 173, 190, 209,  230,  253,  279,  307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796, 876, 963, 1060, 1166, 1282, 1411, 1552,
];

/// `CodecState` carries the running predictor and step index of one encode or decode pass.
///
/// `estimate` stays within `[-2048, 2047]` and `step_index` within `[0, 48]` after every step.
/// A fresh stream starts from `CodecState::new()`. The fields are public so that state may be
/// inspected or seeded from a container header; out-of-range values are clamped on the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecState {
    pub estimate: i32,
    pub step_index: i32,
}

impl CodecState {
    pub fn new() -> CodecState {
        CodecState { estimate: 0, step_index: 0 }
    }
}

impl Default for CodecState {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes one 4-bit code, advancing `state`. Returns the new estimate.
///
/// Only the lowest 4 bits of `code` are used. Total and deterministic: clamping absorbs all
/// out-of-range inputs.
pub fn decode(code: u8, state: &mut CodecState) -> i32 {
    let code = code & 0x0f;
    let step_index = state.step_index.clamp(0, STEP_INDEX_MAX);
    let ss = STEP_SIZE_TABLE[step_index as usize];

    // The three magnitude bits gate independent fractions of the step size on top of the
    // ss/8 base, giving deltas of ss/8 up to 15*ss/8 in ss/4 increments.
    let mut delta = ss >> 3;
    if code & 0x01 != 0 {
        delta += ss >> 2;
    }
    if code & 0x02 != 0 {
        delta += ss >> 1;
    }
    if code & 0x04 != 0 {
        delta += ss;
    }
    if code & 0x08 != 0 {
        delta = -delta;
    }

    state.estimate = (state.estimate + delta).clamp(ESTIMATE_MIN, ESTIMATE_MAX);
    state.step_index = (step_index + STEP_ADJUST_TABLE[code as usize]).clamp(0, STEP_INDEX_MAX);
    state.estimate
}

/// Encodes one sample in the 12-bit range, advancing `state`. Returns the 4-bit code.
///
/// Greedy magnitude search, most-significant contribution first: sign, then whole, half, and
/// quarter step size.
pub fn encode(target: i32, state: &mut CodecState) -> u8 {
    let ss = STEP_SIZE_TABLE[state.step_index.clamp(0, STEP_INDEX_MAX) as usize];

    let mut delta = target - state.estimate;

    let mut code = 0x00;
    if delta < 0 {
        code |= 0x08;
        delta = -delta;
    }
    if delta >= ss {
        code |= 0x04;
        delta -= ss;
    }
    if delta >= (ss >> 1) {
        code |= 0x02;
        delta -= ss >> 1;
    }
    if delta >= (ss >> 2) {
        code |= 0x01;
    }

    // Advance the state with the decoder's own arithmetic so that encoder and decoder predictors
    // can never drift apart.
    decode(code, state);
    code
}
