// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `nibble` module packs and unpacks 4-bit ADPCM codes, two per byte, low nibble first.

/// `Nibble` represents the lower or upper 4 bits of a byte.
#[derive(Copy, Clone, Debug)]
pub enum Nibble {
    Upper,
    Lower,
}

impl Nibble {
    pub fn get_nibble(&self, byte: u8) -> u8 {
        match self {
            Nibble::Upper => byte >> 4,
            Nibble::Lower => byte & 0x0f,
        }
    }
}

/// Packs a sequence of 4-bit codes two per byte, the first code of each pair in the low nibble.
/// An odd tail leaves the final byte's high nibble zero.
pub fn pack(codes: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity((codes.len() + 1) / 2);

    for pair in codes.chunks(2) {
        let mut byte = pair[0] & 0x0f;
        if let Some(hi) = pair.get(1) {
            byte |= (hi & 0x0f) << 4;
        }
        packed.push(byte);
    }

    packed
}

/// Unpacks packed bytes back into 4-bit codes, yielding the low nibble of each byte before the
/// high nibble.
pub fn unpack(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| [Nibble::Lower.get_nibble(byte), Nibble::Upper.get_nibble(byte)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_pack_order() {
        assert_eq!(pack(&[0x01, 0x02, 0x03, 0x04]), vec![0x21, 0x43]);
    }

    #[test]
    fn verify_pack_odd_tail() {
        assert_eq!(pack(&[0x0f]), vec![0x0f]);
        assert_eq!(pack(&[0x01, 0x02, 0x03]), vec![0x21, 0x03]);
    }

    #[test]
    fn verify_pack_empty() {
        assert!(pack(&[]).is_empty());
    }

    #[test]
    fn verify_round_trip() {
        let codes = [0x00, 0x0f, 0x08, 0x07];
        let unpacked: Vec<u8> = unpack(&pack(&codes)).collect();
        assert_eq!(unpacked, codes);
    }

    #[test]
    fn verify_pack_masks_high_bits() {
        assert_eq!(pack(&[0xf1, 0xf2]), vec![0x21]);
    }
}
