//! `nl-fixed`: convert raw integer samples to Qm.n fixed point.
//!
//! Usage:
//!   nl-fixed --width u16|i16|u32|i32 --scale <q31> --frac-bits <n> <raw>...
//!
//! Prints one `0xBITS value` line per raw sample.

use nl_utilities_cli::{convert, parse_fixed_args};

fn main() {
    env_logger::init();

    let options = match parse_fixed_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    for raw in &options.raw {
        match convert(options.width, raw, options.scale, options.frac_bits) {
            Ok(converted) => println!("{converted}"),
            Err(e) => {
                eprintln!("{raw}: {e}");
                std::process::exit(1);
            }
        }
    }
}
