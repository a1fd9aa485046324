//! Encode and decode sample buffers with `rlenc`.
//!
//! # Usage
//!
//! Run the built-in samples:
//!
//! ```sh
//! cargo run --release --bin rlenc-driver
//! ```
//!
//! ```txt
//! encoded: 6A1F2D7C1A17E
//! decoded: AAAAAAFDDCCCCCCCAEEEEEEEEEEEEEEEEEAAAAAAFDD...
//! ```
//!
//! Or provide your own input:
//!
//! ```sh
//! cargo run --release --bin rlenc-driver -- --encode WWWWBBB --decode 4W3B --max-len 1024
//! ```
//!
//! Decoding malformed input exits with a non-zero status.

use clap::{value_parser, Arg, ArgAction, Command};
use rlenc::{decode_cfg, encode, try_encode, Config, Error, System, Tracking};
use std::process::exit;
use tracing::{error, info, Level};

/// Encoded by default when `--encode` is not provided.
const ENCODE_SAMPLE: &[u8] = b"AAAAAAFDDCCCCCCCAEEEEEEEEEEEEEEEEE";

/// Repeated to build the default input when `--decode` is not provided.
const DECODE_SAMPLE: &[u8] = b"6A1F2D7C1A17E";

/// Number of times [DECODE_SAMPLE] is repeated.
const DECODE_REPETITIONS: usize = 38;

fn main() {
    // Parse arguments
    let matches = Command::new("rlenc-driver")
        .about("run-length encode and decode bytes")
        .arg(
            Arg::new("encode")
                .long("encode")
                .required(false)
                .help("Text to encode"),
        )
        .arg(
            Arg::new("decode")
                .long("decode")
                .required(false)
                .help("Text to decode"),
        )
        .arg(
            Arg::new("max-len")
                .long("max-len")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Maximum number of decoded bytes"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Refuse to encode ASCII digits"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Collect inputs
    let custom_encode = matches.get_one::<String>("encode");
    let custom_decode = matches.get_one::<String>("decode");
    let samples = custom_encode.is_none() && custom_decode.is_none();
    let to_encode = custom_encode
        .map(|text| text.as_bytes().to_vec())
        .or_else(|| samples.then(|| ENCODE_SAMPLE.to_vec()));
    let to_decode = custom_decode
        .map(|text| text.as_bytes().to_vec())
        .or_else(|| samples.then(|| DECODE_SAMPLE.repeat(DECODE_REPETITIONS)));
    let cfg = matches
        .get_one::<usize>("max-len")
        .map_or_else(Config::unbounded, |max_len| Config::new(*max_len));
    let strict = matches.get_flag("strict");

    let allocator = Tracking::new(System);

    // Encode
    if let Some(data) = to_encode {
        let encoded = if strict {
            match try_encode(&data, &allocator) {
                Ok(encoded) => encoded,
                Err(err) => fail("encode", err),
            }
        } else {
            encode(&data, &allocator)
        };
        println!("encoded: {}", String::from_utf8_lossy(&encoded));
        info!(input = data.len(), output = encoded.len(), "encoded");
    }

    // Decode
    if let Some(data) = to_decode {
        let decoded = match decode_cfg(&data, &allocator, &cfg) {
            Ok(decoded) => decoded,
            Err(err) => fail("decode", err),
        };
        println!("decoded: {}", String::from_utf8_lossy(&decoded));
        info!(input = data.len(), output = decoded.len(), "decoded");
    }

    info!(
        allocations = allocator.allocations(),
        live = allocator.live(),
        "released buffers"
    );
}

/// Logs `err` and exits with a failure status.
fn fail(operation: &str, err: Error) -> ! {
    error!(operation, status = err.status(), ?err, "failed");
    exit(1);
}
