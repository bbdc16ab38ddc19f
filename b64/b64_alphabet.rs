//! Symbol tables for the two RFC 4648 alphabets.

/// Padding character shared by both alphabets.
pub const PAD: u8 = b'=';

/// Marks a byte that is not part of the alphabet in the reverse table.
const INVALID: u8 = 0xFF;

/// Standard base64 alphabet (RFC 4648 section 4).
pub const ALPHABET_STANDARD: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// URL and filename safe base64 alphabet (RFC 4648 section 5).
pub const ALPHABET_URL: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

static TABLE_STANDARD: AlphabetTable = AlphabetTable::new(ALPHABET_STANDARD);
static TABLE_URL: AlphabetTable = AlphabetTable::new(ALPHABET_URL);

/// Forward and reverse lookup tables for one 64-symbol alphabet.
#[derive(Debug, PartialEq, Eq)]
pub struct AlphabetTable {
    symbols: [u8; 64],
    pub(crate) values: [u8; 256],
}

impl AlphabetTable {
    /// Builds the tables for `symbols` at compile time.
    ///
    /// Panics (a compile error when used in a `const` or `static`) if a symbol
    /// repeats or if `=` is used as a data symbol.
    pub const fn new(symbols: &[u8; 64]) -> Self {
        let mut values = [INVALID; 256];
        let mut i = 0;
        while i < 64 {
            let c = symbols[i];
            assert!(c != PAD, "padding character cannot be an alphabet symbol");
            assert!(values[c as usize] == INVALID, "duplicate alphabet symbol");
            values[c as usize] = i as u8;
            i += 1;
        }
        Self {
            symbols: *symbols,
            values,
        }
    }

    /// Returns the symbol for a 6-bit value.
    #[inline]
    pub const fn symbol(&self, value: u8) -> u8 {
        self.symbols[(value & 0x3F) as usize]
    }

    /// Returns the 6-bit value of `c`, or `None` if `c` is not in the alphabet.
    #[inline]
    pub const fn value(&self, c: u8) -> Option<u8> {
        match self.values[c as usize] {
            INVALID => None,
            v => Some(v),
        }
    }

    /// The 64 symbols in value order.
    pub const fn symbols(&self) -> &[u8; 64] {
        &self.symbols
    }
}

/// Selects one of the built-in alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Alphabet {
    /// `+` and `/` at indices 62 and 63.
    #[default]
    Standard,
    /// `-` and `_` at indices 62 and 63.
    Url,
}

impl Alphabet {
    /// The static lookup tables for this alphabet.
    pub fn table(self) -> &'static AlphabetTable {
        match self {
            Alphabet::Standard => &TABLE_STANDARD,
            Alphabet::Url => &TABLE_URL,
        }
    }
}
