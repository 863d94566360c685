//! `nl-base64`: base64-encode stdin to stdout, or decode with `--decode`.
//!
//! Usage:
//!   nl-base64 [--decode|-d] [--no-pad]

use nl_utilities_cli::{decode_text, encode_stream, parse_base64_args, Base64Options, CliError};
use std::io::{self, Read, Write};

fn run(options: Base64Options) -> Result<(), CliError> {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    if options.decode {
        let mut buf = Vec::new();
        io::BufReader::new(stdin).read_to_end(&mut buf)?;
        let bytes = decode_text(&buf)?;
        stdout.write_all(&bytes)?;
    } else {
        let written = encode_stream(stdin, &mut stdout, options.pad)?;
        log::debug!("wrote {written} characters");
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let result = parse_base64_args(std::env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
