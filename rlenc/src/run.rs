//! Runs of identical bytes and their encoded form.
//!
//! A run is written as a tuple: its count in ASCII decimal (most-significant digit first)
//! immediately followed by the repeated byte. Tuples carry no delimiter, so a reader
//! consumes every leading digit as part of the count. A payload byte in `'0'..='9'`
//! therefore cannot be told apart from the count that precedes it.

use crate::Error;
use bytes::{Buf, BufMut};

const RADIX: usize = 10;

/// The number of decimal digits in `usize::MAX`.
const MAX_DIGITS: usize = usize::MAX.ilog10() as usize + 1;

/// A maximal sequence of identical bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    /// The repeated byte.
    pub byte: u8,
    /// How many times `byte` repeats.
    pub count: usize,
}

impl Run {
    /// Creates a run of `count` copies of `byte`.
    pub const fn new(byte: u8, count: usize) -> Self {
        Self { byte, count }
    }

    /// Returns the number of bytes [Run::write] produces for this run.
    pub fn encode_size(&self) -> usize {
        digits(self.count) + 1
    }

    /// Writes the tuple for this run to `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero (a tuple always has at least one digit) or if `buf` does not
    /// have [Run::encode_size] bytes of capacity left.
    pub fn write(&self, buf: &mut impl BufMut) {
        assert!(self.count > 0, "run must not be empty");

        // Digits are produced least-significant first, so fill from the back.
        let mut digits = [0u8; MAX_DIGITS];
        let mut start = MAX_DIGITS;
        let mut count = self.count;
        while count > 0 {
            start -= 1;
            digits[start] = b'0' + (count % RADIX) as u8;
            count /= RADIX;
        }
        buf.put_slice(&digits[start..]);
        buf.put_u8(self.byte);
    }

    /// Reads one tuple from `buf`, consuming its digits and its byte.
    ///
    /// Returns [Error::NotRlencoded] if `buf` does not start with a digit, or if it ends
    /// before the byte that must follow the digits. Returns [Error::CountOverflow] if the
    /// count does not fit in a `usize`.
    pub fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        let mut count: usize = 0;
        let mut digits = 0;
        while buf.has_remaining() {
            let next = buf.chunk()[0];
            if !next.is_ascii_digit() {
                break;
            }
            buf.advance(1);
            digits += 1;
            count = count
                .checked_mul(RADIX)
                .and_then(|count| count.checked_add(usize::from(next - b'0')))
                .ok_or(Error::CountOverflow)?;
        }
        if digits == 0 || !buf.has_remaining() {
            return Err(Error::NotRlencoded);
        }
        Ok(Self::new(buf.get_u8(), count))
    }
}

/// Returns the number of decimal digits needed to write `count` (zero for zero).
fn digits(count: usize) -> usize {
    count.checked_ilog10().map_or(0, |log| log as usize + 1)
}

/// Splits `data` into its maximal runs, left to right.
pub fn runs(data: &[u8]) -> impl Iterator<Item = Run> + '_ {
    data.chunk_by(|a, b| a == b)
        .map(|run| Run::new(run[0], run.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use test_case::test_case;

    #[test_case(1, b'A', b"1A"; "single")]
    #[test_case(9, b'A', b"9A"; "largest single digit")]
    #[test_case(10, b'A', b"10A"; "smallest two digits")]
    #[test_case(24, b'W', b"24W"; "two digits")]
    #[test_case(1000, 0x00, b"1000\x00"; "raw byte")]
    fn test_write(count: usize, byte: u8, expected: &[u8]) {
        let run = Run::new(byte, count);
        let mut buf = Vec::new();
        run.write(&mut buf);
        assert_eq!(buf, expected);
        assert_eq!(buf.len(), run.encode_size());
    }

    #[test]
    fn test_write_max_count() {
        let run = Run::new(b'x', usize::MAX);
        let mut buf = Vec::new();
        run.write(&mut buf);
        assert_eq!(buf.len(), MAX_DIGITS + 1);
        assert_eq!(&buf[..MAX_DIGITS], usize::MAX.to_string().as_bytes());
    }

    #[test]
    #[should_panic(expected = "run must not be empty")]
    fn test_write_empty_run() {
        Run::new(b'A', 0).write(&mut Vec::new());
    }

    #[test]
    fn test_write_into_slice() {
        let mut array = [0u8; 4];
        let mut buf = &mut array[..];
        Run::new(b'B', 12).write(&mut buf);
        assert_eq!(buf.len(), 1);
        assert_eq!(&array[..3], b"12B");
    }

    #[test]
    fn test_read_consumes_one_tuple() {
        let mut buf = Bytes::from_static(b"12W3B");
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'W', 12));
        assert_eq!(buf.remaining(), 2);
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'B', 3));
        assert!(!buf.has_remaining());
    }

    #[test]
    fn test_read_leading_zeros() {
        let mut buf = &b"007X"[..];
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'X', 7));
    }

    #[test]
    fn test_read_zero_count() {
        let mut buf = &b"0X"[..];
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'X', 0));
    }

    #[test_case(b""; "empty")]
    #[test_case(b"W"; "no digits")]
    #[test_case(b"5"; "orphan digit")]
    #[test_case(b"123"; "orphan digits")]
    fn test_read_not_rlencoded(input: &[u8]) {
        let mut buf = input;
        assert_eq!(Run::read(&mut buf), Err(Error::NotRlencoded));
    }

    #[test]
    fn test_read_overflow() {
        let input = format!("{}0X", usize::MAX);
        let mut buf = input.as_bytes();
        assert_eq!(Run::read(&mut buf), Err(Error::CountOverflow));
    }

    #[test]
    fn test_read_max_count() {
        let input = format!("{}X", usize::MAX);
        let mut buf = input.as_bytes();
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'X', usize::MAX));
    }

    #[test]
    fn test_read_digit_payload_is_greedy() {
        // "111" is written as "31", which reads back as a count with no byte.
        let mut buf = Vec::new();
        Run::new(b'1', 3).write(&mut buf);
        assert_eq!(buf, b"31");
        assert_eq!(Run::read(&mut &buf[..]), Err(Error::NotRlencoded));

        // Followed by another tuple, the digit payload merges into the next count.
        let mut buf = &b"311A"[..];
        assert_eq!(Run::read(&mut buf).unwrap(), Run::new(b'A', 311));
    }

    #[test]
    fn test_runs() {
        let collected: Vec<_> = runs(b"aaabccdddd").collect();
        assert_eq!(
            collected,
            vec![
                Run::new(b'a', 3),
                Run::new(b'b', 1),
                Run::new(b'c', 2),
                Run::new(b'd', 4),
            ]
        );
        assert_eq!(runs(b"").count(), 0);
    }

    #[test]
    fn test_runs_partition_input() {
        let data = b"WWWWWWWWWWWWBWWWWWWWWWWWWBBB";
        let total: usize = runs(data).map(|run| run.count).sum();
        assert_eq!(total, data.len());
        assert!(runs(data)
            .collect::<Vec<_>>()
            .windows(2)
            .all(|pair| pair[0].byte != pair[1].byte));
    }
}
