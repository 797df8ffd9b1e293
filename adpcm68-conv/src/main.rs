// Adpcm68 Conversion Tool
// Copyright (c) 2026 The Project Adpcm68 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use std::fs;
use std::process;

use adpcm68_core::convert::{convert, ConverterOptions};
use adpcm68_core::dsp::Channels;
use adpcm68_core::errors::{malformed_input_error, Error, Result};

use clap::{Arg, ArgMatches};
use log::error;

fn main() {
    pretty_env_logger::init();

    let args = clap::Command::new("Adpcm68 Converter")
        .version("1.0")
        .about("Convert 16-bit big-endian PCM to X680x0 4-bit ADPCM")
        .arg(
            Arg::new("max-peak")
                .long("max-peak")
                .short('p')
                .value_name("PCT")
                .help("Maximum allowed peak level, in percent of full scale")
                .default_value("90.0"),
        )
        .arg(
            Arg::new("min-avg")
                .long("min-avg")
                .short('l')
                .value_name("PCT")
                .help("Minimum required average level, in percent of full scale")
                .default_value("6.0"),
        )
        .arg(
            Arg::new("fade-out")
                .long("fade-out")
                .short('f')
                .help("Linearly fade out the final second of audio"),
        )
        .arg(Arg::new("PCM_FILE").help("The input PCM file path").required(true).index(1))
        .arg(Arg::new("PCM_FREQ").help("The input sample rate in Hz").required(true).index(2))
        .arg(
            Arg::new("PCM_CHANNELS")
                .help("The input channel count (1 or 2)")
                .required(true)
                .index(3),
        )
        .arg(Arg::new("ADPCM_FILE").help("The output ADPCM file path").required(true).index(4))
        .arg(Arg::new("ADPCM_FREQ").help("The output sample rate in Hz").required(true).index(5))
        .get_matches();

    let code = match run(&args) {
        Ok(()) => 0,
        Err(Error::IoError(err)) => {
            error!("{}", err);
            2
        }
        // The level summary and gate message were already printed.
        Err(Error::LevelRange { .. }) => 1,
        Err(err) => {
            error!("{}", err.to_string().to_lowercase());
            1
        }
    };

    process::exit(code)
}

fn run(args: &ArgMatches) -> Result<()> {
    let pcm_path = args.value_of("PCM_FILE").unwrap();
    let src_rate = parse_rate(args.value_of("PCM_FREQ").unwrap())?;
    let channels = parse_channels(args.value_of("PCM_CHANNELS").unwrap())?;
    let adpcm_path = args.value_of("ADPCM_FILE").unwrap();
    let dst_rate = parse_rate(args.value_of("ADPCM_FREQ").unwrap())?;

    let options = ConverterOptions {
        max_peak_pct: parse_pct(args.value_of("max-peak").unwrap())?,
        min_avg_pct: parse_pct(args.value_of("min-avg").unwrap())?,
        fade_out: args.is_present("fade-out"),
    };

    let pcm = fs::read(pcm_path)?;

    match convert(&pcm, channels, src_rate, dst_rate, &options) {
        Ok(conversion) => {
            print_levels(conversion.levels.avg_pct, conversion.levels.peak_pct);
            fs::write(adpcm_path, &conversion.adpcm)?;
            Ok(())
        }
        Err(Error::LevelRange { avg, peak }) => {
            print_levels(avg, peak);
            println!("Level range error. Adjust volume settings.");
            Err(Error::LevelRange { avg, peak })
        }
        Err(err) => Err(err),
    }
}

fn print_levels(avg: f64, peak: f64) {
    println!("Average Level ... {:.2}%", avg);
    println!("Peak Level    ... {:.2}%", peak);
}

fn parse_rate(value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => malformed_input_error("sample rates must be positive integers"),
    }
}

fn parse_channels(value: &str) -> Result<Channels> {
    match value.parse::<u32>().ok().and_then(Channels::from_count) {
        Some(channels) => Ok(channels),
        None => malformed_input_error("channel count must be 1 or 2"),
    }
}

fn parse_pct(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(pct) => Ok(pct),
        Err(_) => malformed_input_error("level thresholds must be numeric"),
    }
}
