//! Run-length encoding and decoding.

use crate::{
    run::{runs, Run},
    Allocator, Config, Error, Output,
};
use bytes::{Buf, BufMut};
use tracing::{debug, trace};

/// Returns the number of bytes [encode] reserves for an input of `len` bytes.
///
/// Every run costs at least one digit plus its byte, so input made only of runs of length one
/// doubles in size.
pub const fn max_encoded_len(len: usize) -> usize {
    len.saturating_mul(2)
}

/// Encodes `data`, collapsing each run of identical bytes into `<count><byte>`.
///
/// Empty input encodes to empty output. Payload bytes in `'0'..='9'` are written as-is and
/// will not decode back to the same data; use [try_encode] to reject them instead.
///
/// # Examples
///
/// ```
/// use rlenc::{encode, System};
///
/// let encoded = encode(b"WWWWBWWW", &System);
/// assert_eq!(&*encoded, b"4W1B3W");
/// ```
pub fn encode<'a, A: Allocator + ?Sized>(data: &[u8], allocator: &'a A) -> Output<'a, A> {
    let mut output = Output::allocate(allocator, max_encoded_len(data.len()));
    let mut buf = output.spare_mut();
    let capacity = buf.len();
    for run in runs(data) {
        run.write(&mut buf);
    }
    let written = capacity - buf.len();
    output.set_len(written);
    trace!(input = data.len(), output = written, "encoded");
    output
}

/// Encodes `data` like [encode], but first rejects any payload byte that is an ASCII digit.
///
/// Output produced by this function always decodes back to `data`. Nothing is allocated
/// when [Error::DigitPayload] is returned.
pub fn try_encode<'a, A: Allocator + ?Sized>(
    data: &[u8],
    allocator: &'a A,
) -> Result<Output<'a, A>, Error> {
    if let Some(offset) = data.iter().position(u8::is_ascii_digit) {
        debug!(offset, "rejected digit payload");
        return Err(Error::DigitPayload(offset));
    }
    Ok(encode(data, allocator))
}

/// Returns the length `data` decodes to, without allocating.
pub fn decoded_len(data: &[u8]) -> Result<usize, Error> {
    measure(data, &Config::unbounded())
}

/// Walks every tuple in `data`, summing counts until `cfg` is exceeded.
fn measure(data: &[u8], cfg: &Config) -> Result<usize, Error> {
    let mut buf = data;
    let mut total: usize = 0;
    while buf.has_remaining() {
        let offset = data.len() - buf.remaining();
        let run = Run::read(&mut buf).inspect_err(|err| debug!(offset, ?err, "rejected tuple"))?;
        total = total.checked_add(run.count).ok_or(Error::CountOverflow)?;
        if !cfg.allows(total) {
            debug!(total, max = cfg.max_len, "decoded length exceeds limit");
            return Err(Error::LengthExceeded(total, cfg.max_len));
        }
    }
    Ok(total)
}

/// Decodes `data`, a concatenation of `<count><byte>` tuples.
///
/// See [decode_cfg] to bound the size of the output.
///
/// # Errors
///
/// - [Error::NotRlencoded]: a tuple has no count digits, or the input ends after digits.
/// - [Error::CountOverflow]: a count, or the total decoded length, overflows `usize`.
///
/// # Examples
///
/// ```
/// use rlenc::{decode, Error, System};
///
/// let decoded = decode(b"4W1B3W", &System).unwrap();
/// assert_eq!(&*decoded, b"WWWWBWWW");
///
/// // A byte with no count in front of it
/// assert_eq!(decode(b"4WB", &System).unwrap_err(), Error::NotRlencoded);
/// ```
pub fn decode<'a, A: Allocator + ?Sized>(
    data: &[u8],
    allocator: &'a A,
) -> Result<Output<'a, A>, Error> {
    decode_cfg(data, allocator, &Config::default())
}

/// Decodes `data`, rejecting outputs longer than `cfg` allows.
///
/// The input is walked twice: once to validate every tuple and compute the exact output
/// length, and once to fill an output of that length. Nothing is allocated unless the first
/// walk succeeds.
pub fn decode_cfg<'a, A: Allocator + ?Sized>(
    data: &[u8],
    allocator: &'a A,
    cfg: &Config,
) -> Result<Output<'a, A>, Error> {
    let len = measure(data, cfg)?;

    let mut output = Output::allocate(allocator, len);
    let mut src = data;
    let mut dst = output.spare_mut();
    while src.has_remaining() {
        let run = Run::read(&mut src)?;
        dst.put_bytes(run.byte, run.count);
    }
    debug_assert!(dst.is_empty());
    output.set_len(len);
    trace!(input = data.len(), output = len, "decoded");
    Ok(output)
}
