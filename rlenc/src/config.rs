//! Limits applied while decoding.

/// Configuration for [crate::decode_cfg].
///
/// Encoded input is tiny compared to what it can expand to (`"99999999W"` is nine bytes), so
/// callers decoding untrusted data should bound the decoded length before anything is
/// allocated.
///
/// # Examples
///
/// ```
/// use rlenc::{decode_cfg, Config, Error, System};
///
/// let cfg = Config::new(8);
/// assert_eq!(&*decode_cfg(b"8A", &System, &cfg).unwrap(), b"AAAAAAAA");
/// assert_eq!(decode_cfg(b"9A", &System, &cfg).unwrap_err(), Error::LengthExceeded(9, 8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    /// The maximum number of bytes a decoded output may contain.
    pub max_len: usize,
}

impl Config {
    /// Creates a configuration that rejects outputs longer than `max_len` bytes.
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Creates a configuration with no limit.
    pub const fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Returns whether `len` decoded bytes are allowed.
    pub const fn allows(&self, len: usize) -> bool {
        len <= self.max_len
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::unbounded()
    }
}
