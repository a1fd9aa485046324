#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rlenc::{decode, encode, max_encoded_len, try_encode, Error, Pool, System, Tracking};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    data: Vec<u8>,
    pooled: bool,
}

fn roundtrip<A: rlenc::Allocator>(data: &[u8], allocator: &Tracking<A>) {
    let encoded = encode(data, allocator);
    assert!(encoded.len() <= max_encoded_len(data.len()));

    match try_encode(data, allocator) {
        Ok(strict) => {
            // Without digit payloads, both encoders agree and the output decodes back.
            assert_eq!(&*strict, &*encoded);
            let decoded = decode(&encoded, allocator).expect("Failed to decode encoded input!");
            assert_eq!(&*decoded, data);
        }
        Err(Error::DigitPayload(offset)) => {
            assert!(data[offset].is_ascii_digit());
            assert!(data[..offset].iter().all(|b| !b.is_ascii_digit()));
        }
        Err(err) => panic!("unexpected error: {err}"),
    }
}

fuzz_target!(|input: FuzzInput| {
    if input.pooled {
        let allocator = Tracking::new(Pool::default());
        roundtrip(&input.data, &allocator);
        assert_eq!(allocator.live(), 0);
    } else {
        let allocator = Tracking::new(System);
        roundtrip(&input.data, &allocator);
        assert_eq!(allocator.live(), 0);
    }
});
