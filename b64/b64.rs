//! A library for base64 encoding and decoding.
//!
//! This library converts binary data to padded base64 text and back using the
//! standard and URL-safe alphabets of RFC 4648. Each alphabet is exposed as a
//! module of free functions ([`standard`], [`url_safe`]) backed by a
//! preconfigured [`Engine`].
//!
//! Decoding is lax by default: the input length must be a multiple of 4, but
//! symbols outside the alphabet decode as zero and the first padded group ends
//! the data. [`DecodeMode::Strict`] rejects both instead.

use thiserror::Error;
use tracing::{debug, trace};

#[path = "b64_alphabet.rs"]
mod alphabet;

#[cfg(test)]
#[path = "b64_tests.rs"]
mod tests;

pub use alphabet::{Alphabet, AlphabetTable, ALPHABET_STANDARD, ALPHABET_URL, PAD};

/// Error type for base64 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The encoded input length is not a multiple of 4.
    #[error("invalid input length: {length} is not a multiple of 4")]
    InvalidLength { length: usize },
    /// A byte outside the alphabet was found by a strict decoder.
    #[error("invalid character: '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },
    /// Padding appeared somewhere other than the tail of the final group.
    #[error("invalid padding at index {index}")]
    InvalidPadding { index: usize },
    /// The caller supplied output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// How a decoder treats malformed symbols and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DecodeMode {
    /// Unknown symbols decode as zero; anything after the first padded group is ignored.
    #[default]
    Lax,
    /// Unknown symbols and misplaced padding are errors.
    Strict,
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Config {
    pub alphabet: Alphabet,
    pub mode: DecodeMode,
}

impl Config {
    /// A lax configuration for `alphabet`.
    pub const fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            mode: DecodeMode::Lax,
        }
    }

    /// Returns a copy of this configuration using `mode`.
    pub const fn with_mode(self, mode: DecodeMode) -> Self {
        Self { mode, ..self }
    }
}

/// Standard alphabet, lax decoding.
pub const STANDARD: Engine = Engine::new(Config::new(Alphabet::Standard));

/// URL-safe alphabet, lax decoding.
pub const URL_SAFE: Engine = Engine::new(Config::new(Alphabet::Url));

/// Standard alphabet, strict decoding.
pub const STANDARD_STRICT: Engine =
    Engine::new(Config::new(Alphabet::Standard).with_mode(DecodeMode::Strict));

/// URL-safe alphabet, strict decoding.
pub const URL_SAFE_STRICT: Engine =
    Engine::new(Config::new(Alphabet::Url).with_mode(DecodeMode::Strict));

/// Calculates the padded encoded length for `len` input bytes.
///
/// # Example
///
/// ```
/// use b64::encoded_len;
///
/// assert_eq!(encoded_len(0), 0);
/// assert_eq!(encoded_len(1), 4);
/// assert_eq!(encoded_len(3), 4);
/// assert_eq!(encoded_len(4), 8);
/// ```
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Number of bytes carried by the first `end` symbols of a padded string.
const fn decoded_len(end: usize) -> usize {
    (end / 4) * 3 + (end % 4).saturating_sub(1)
}

fn check_length(input: &[u8]) -> Result<()> {
    if input.len() % 4 != 0 {
        return Err(Error::InvalidLength {
            length: input.len(),
        });
    }
    Ok(())
}

/// A stateless base64 encoder/decoder bound to one [`Config`].
///
/// # Example
///
/// ```
/// use b64::{Alphabet, Config, Engine};
///
/// let engine = Engine::new(Config::new(Alphabet::Url));
/// assert_eq!(engine.encode(&[0xfb, 0xff]), "-_8=");
/// assert_eq!(engine.decode("-_8=").unwrap(), [0xfbu8, 0xff]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Creates an engine for `config`.
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this engine was built with.
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Returns the number of bytes `encoded` decodes to, without decoding it.
    ///
    /// The data ends at the first padding character, so a string of
    /// concatenated padded groups reports only the bytes before that point.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if the length is not a multiple of 4.
    ///
    /// # Example
    ///
    /// ```
    /// use b64::STANDARD;
    ///
    /// assert_eq!(STANDARD.byte_length("Zm9vYg==").unwrap(), 4);
    /// assert_eq!(STANDARD.byte_length("SQ==QU0=").unwrap(), 1);
    /// assert!(STANDARD.byte_length("Qld").is_err());
    /// ```
    pub fn byte_length(&self, encoded: &str) -> Result<usize> {
        let input = encoded.as_bytes();
        check_length(input)?;
        let end = input.iter().position(|&c| c == PAD).unwrap_or(input.len());
        Ok(decoded_len(end))
    }

    /// Encodes `data` to a padded base64 string.
    ///
    /// # Example
    ///
    /// ```
    /// use b64::STANDARD;
    ///
    /// assert_eq!(STANDARD.encode(b"Hello"), "SGVsbG8=");
    /// ```
    pub fn encode(&self, data: &[u8]) -> String {
        if data.is_empty() {
            return String::new();
        }

        let mut output = vec![0u8; encoded_len(data.len())];
        encode_groups(self.config.alphabet.table(), data, &mut output);

        // All bytes come from the alphabet or are '=', which is valid UTF-8
        String::from_utf8(output).expect("base64 output is always valid UTF-8")
    }

    /// Encodes `data` into `output`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`Error::BufferTooSmall`] if `output` is shorter than [`encoded_len`].
    pub fn encode_to_slice(&self, data: &[u8], output: &mut [u8]) -> Result<usize> {
        let needed = encoded_len(data.len());
        if output.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: output.len(),
            });
        }
        encode_groups(self.config.alphabet.table(), data, &mut output[..needed]);
        Ok(needed)
    }

    /// Decodes a base64 string to binary data.
    ///
    /// The output is allocated once, sized by [`Engine::byte_length`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if the length is not a multiple of 4. Strict
    /// engines also return [`Error::InvalidCharacter`] and
    /// [`Error::InvalidPadding`].
    ///
    /// # Example
    ///
    /// ```
    /// use b64::STANDARD;
    ///
    /// assert_eq!(STANDARD.decode("SGVsbG8=").unwrap(), b"Hello");
    /// ```
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>> {
        let mut output = vec![0u8; self.byte_length(encoded)?];
        let written = self.decode_groups(encoded.as_bytes(), &mut output)?;
        debug_assert_eq!(written, output.len());
        Ok(output)
    }

    /// Decodes `encoded` into `output`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// As [`Engine::decode`], plus [`Error::BufferTooSmall`] if `output` is
    /// shorter than [`Engine::byte_length`].
    pub fn decode_to_slice(&self, encoded: &str, output: &mut [u8]) -> Result<usize> {
        let needed = self.byte_length(encoded)?;
        if output.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                available: output.len(),
            });
        }
        self.decode_groups(encoded.as_bytes(), &mut output[..needed])
    }

    /// Decodes 4-symbol groups until the input ends or a group carries padding.
    ///
    /// `output` must be exactly `byte_length` bytes long; the input length has
    /// already been checked.
    fn decode_groups(&self, input: &[u8], output: &mut [u8]) -> Result<usize> {
        let table = self.config.alphabet.table();
        let strict = self.config.mode == DecodeMode::Strict;
        let mut written = 0;
        let mut unmapped = 0usize;

        for (index, group) in input.chunks_exact(4).enumerate() {
            let v = [
                table.values[group[0] as usize],
                table.values[group[1] as usize],
                table.values[group[2] as usize],
                table.values[group[3] as usize],
            ];

            // Fast path: four alphabet symbols, no padding
            if (v[0] | v[1] | v[2] | v[3]) < 64 {
                output[written..written + 3].copy_from_slice(&join(v));
                written += 3;
                continue;
            }

            let offset = index * 4;
            let symbols = group.iter().position(|&c| c == PAD).unwrap_or(4);
            if strict {
                let last = offset + 4 == input.len();
                if let Err(err) = validate_group(table, group, offset, symbols, last) {
                    trace!(%err, "rejected malformed base64 input");
                    return Err(err);
                }
            }

            let mut sextets = [0u8; 4];
            for (sextet, &c) in sextets.iter_mut().zip(&group[..symbols]) {
                match table.value(c) {
                    Some(value) => *sextet = value,
                    None => unmapped += 1,
                }
            }

            let n = symbols.saturating_sub(1);
            output[written..written + n].copy_from_slice(&join(sextets)[..n]);
            written += n;

            if symbols < 4 {
                let discarded = (input.len() - offset) / 4 - 1;
                if discarded > 0 {
                    debug!(discarded, "ignoring groups after a padded group");
                }
                break;
            }
        }

        if unmapped > 0 {
            debug!(unmapped, "decoded symbols outside the alphabet as zero");
        }
        Ok(written)
    }
}

/// Packs four 6-bit values into three bytes.
#[inline]
fn join([a, b, c, d]: [u8; 4]) -> [u8; 3] {
    [(a << 2) | (b >> 4), (b << 4) | (c >> 2), (c << 6) | d]
}

/// Strict checks for a group that failed the fast path.
///
/// `symbols` is the offset of the group's first padding character, or 4.
fn validate_group(
    table: &AlphabetTable,
    group: &[u8],
    offset: usize,
    symbols: usize,
    last: bool,
) -> Result<()> {
    if let Some(i) = (0..symbols).find(|&i| table.value(group[i]).is_none()) {
        return Err(Error::InvalidCharacter {
            character: group[i] as char,
            index: offset + i,
        });
    }
    if symbols < 4 {
        let tail_is_padding = group[symbols..].iter().all(|&c| c == PAD);
        if !last || symbols < 2 || !tail_is_padding {
            return Err(Error::InvalidPadding {
                index: offset + symbols,
            });
        }
    }
    Ok(())
}

/// Writes `encoded_len(data.len())` bytes into `output`.
fn encode_groups(table: &AlphabetTable, data: &[u8], output: &mut [u8]) {
    let full = data.len() / 3 * 3;
    let (head, tail) = output.split_at_mut(full / 3 * 4);

    for (chunk, group) in data[..full].chunks_exact(3).zip(head.chunks_exact_mut(4)) {
        let (b0, b1, b2) = (chunk[0], chunk[1], chunk[2]);
        group[0] = table.symbol(b0 >> 2);
        group[1] = table.symbol(((b0 & 0x03) << 4) | (b1 >> 4));
        group[2] = table.symbol(((b1 & 0x0F) << 2) | (b2 >> 6));
        group[3] = table.symbol(b2 & 0x3F);
    }

    // Handle remaining bytes
    match data[full..] {
        [b0] => {
            tail[0] = table.symbol(b0 >> 2);
            tail[1] = table.symbol((b0 & 0x03) << 4);
            tail[2] = PAD;
            tail[3] = PAD;
        }
        [b0, b1] => {
            tail[0] = table.symbol(b0 >> 2);
            tail[1] = table.symbol(((b0 & 0x03) << 4) | (b1 >> 4));
            tail[2] = table.symbol((b1 & 0x0F) << 2);
            tail[3] = PAD;
        }
        _ => {}
    }
}

/// Standard alphabet (`+`, `/`) functions.
pub mod standard {
    use super::{Result, STANDARD};

    /// Decoded length of `encoded`. See [`Engine::byte_length`](super::Engine::byte_length).
    pub fn byte_length(encoded: &str) -> Result<usize> {
        STANDARD.byte_length(encoded)
    }

    /// Decodes `encoded` with the standard alphabet.
    pub fn to_bytes(encoded: &str) -> Result<Vec<u8>> {
        STANDARD.decode(encoded)
    }

    /// Encodes `data` with the standard alphabet, padded.
    pub fn from_bytes(data: &[u8]) -> String {
        STANDARD.encode(data)
    }
}

/// URL-safe alphabet (`-`, `_`) functions.
pub mod url_safe {
    use super::{Result, URL_SAFE};

    /// Decoded length of `encoded`. See [`Engine::byte_length`](super::Engine::byte_length).
    pub fn byte_length(encoded: &str) -> Result<usize> {
        URL_SAFE.byte_length(encoded)
    }

    /// Decodes `encoded` with the URL-safe alphabet.
    pub fn to_bytes(encoded: &str) -> Result<Vec<u8>> {
        URL_SAFE.decode(encoded)
    }

    /// Encodes `data` with the URL-safe alphabet, padded.
    pub fn from_bytes(data: &[u8]) -> String {
        URL_SAFE.encode(data)
    }
}
