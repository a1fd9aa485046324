#![no_main]

use libfuzzer_sys::fuzz_target;
use rlenc::{decode_cfg, decoded_len, encode, Config, Error, System, Tracking};

// Bound outputs so that short inputs with huge counts do not exhaust memory.
const MAX_LEN: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    let allocator = Tracking::new(System);
    let cfg = Config::new(MAX_LEN);
    match decode_cfg(data, &allocator, &cfg) {
        Ok(decoded) => {
            assert!(decoded.len() <= MAX_LEN);
            assert_eq!(decoded_len(data), Ok(decoded.len()));

            // A digit-free output re-encodes to tuples of the same total length.
            if !decoded.is_empty() && !decoded.iter().any(u8::is_ascii_digit) {
                let encoded = encode(&decoded, &allocator);
                assert_eq!(decoded_len(&encoded), Ok(decoded.len()));
            }
        }
        Err(Error::LengthExceeded(found, max)) => {
            assert!(found > max);
            assert_eq!(allocator.allocations(), 0);
        }
        Err(_) => {
            assert_eq!(allocator.allocations(), 0);
        }
    }
    assert_eq!(allocator.live(), 0);
});
