//! Run-length encode bytes with a caller-supplied allocator.
//!
//! # Overview
//!
//! Every maximal run of identical bytes is written as its length in ASCII decimal followed
//! by the byte itself. Tuples are concatenated with no header, delimiter or escaping:
//!
//! ```txt
//! WWWWWWWWWWWWBWWWWWWWWWWWWBBBWWWWWWWWWWWWWWWWWWWWWWWWBWWWWWWWWWWWWWW
//! 12W1B12W3B24W1B14W
//! ```
//!
//! Decoding walks the input twice: once to validate it and size the output exactly, and once
//! to fill the output. Malformed input is rejected before anything is allocated.
//!
//! # Allocation
//!
//! The codec performs no memory management of its own. Buffers come from an [Allocator]
//! supplied at each call and are returned to it when the resulting [Output] is dropped. Use
//! [System] for the global heap, [Pool] to recycle buffers, or [Tracking] to observe traffic.
//!
//! # Errors
//!
//! The only structural error is [Error::NotRlencoded]: a tuple with no count digits, or
//! count digits with no byte after them. [decode] also returns [Error::CountOverflow] when a
//! count, or the sum of all counts, does not fit in a `usize`, rather than wrapping around.
//! [decode_cfg] adds [Error::LengthExceeded] and [try_encode] adds [Error::DigitPayload].
//! [Error::status] maps each kind to a negative integer code.
//!
//! # Digit Payloads
//!
//! Digit characters are reserved for counts, but [encode] does not escape payload bytes.
//! Input containing `'0'..='9'` encodes to output that does not decode back to the same
//! bytes (`"111"` encodes to `"31"`, which is rejected). Use [try_encode] to refuse such
//! input up front.
//!
//! # Example
//!
//! ```
//! use rlenc::{decode, encode, Tracking, System};
//!
//! let allocator = Tracking::new(System);
//! let data = b"AAAAAAFDDCCCCCCCAEEEEEEEEEEEEEEEEE";
//!
//! let encoded = encode(data, &allocator);
//! assert_eq!(&*encoded, b"6A1F2D7C1A17E");
//!
//! let decoded = decode(&encoded, &allocator).unwrap();
//! assert_eq!(&*decoded, data);
//!
//! drop(encoded);
//! drop(decoded);
//! assert_eq!(allocator.live(), 0);
//! ```

pub mod alloc;
pub mod codec;
pub mod config;
pub mod error;
pub mod output;
pub mod run;

// Re-export main types and functions
pub use alloc::{Allocator, Pool, PoolBuf, PoolConfig, System, Tracking};
pub use codec::{decode, decode_cfg, decoded_len, encode, max_encoded_len, try_encode};
pub use config::Config;
pub use error::{status, Error};
pub use output::Output;
pub use run::Run;
