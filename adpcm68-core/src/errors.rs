// Adpcm68
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Adpcm68.
#[derive(Debug)]
pub enum Error {
    /// An IO error occured while reading or writing a buffer.
    IoError(io::Error),
    /// The measured signal level falls outside the acceptable band: the source is either too
    /// quiet or too close to clipping for 4-bit ADPCM. Carries the measured average and peak
    /// levels in percent of 16-bit full scale.
    LevelRange { avg: f64, peak: f64 },
    /// The input buffer was malformed and could not be converted.
    MalformedInput(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::IoError(ref err) => err.fmt(f),
            Error::LevelRange { avg, peak } => {
                write!(f, "level range error: average {:.2}%, peak {:.2}%", avg, peak)
            }
            Error::MalformedInput(msg) => {
                write!(f, "malformed input: {}", msg)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IoError(ref err) => Some(err),
            Error::LevelRange { .. } => None,
            Error::MalformedInput(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a level range error.
pub fn level_range_error<T>(avg: f64, peak: f64) -> Result<T> {
    Err(Error::LevelRange { avg, peak })
}

/// Convenience function to create a malformed input error.
pub fn malformed_input_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::MalformedInput(desc))
}
