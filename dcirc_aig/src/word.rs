//! Fixed-width bit-vector values carried on ports.

use contracts::*;
use serde::{Deserialize, Serialize};

/// A fixed-width bit-vector, least significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word(Vec<bool>);

impl Word {
    /// Build a word from bits, least significant first.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self(bits.into_iter().collect())
    }

    /// An all-zero word of the given width.
    #[must_use]
    pub fn zeros(width: usize) -> Self {
        Self(vec![false; width])
    }

    /// A single-bit word.
    #[must_use]
    pub fn from_bool(value: bool) -> Self {
        Self(vec![value])
    }

    /// Unsigned encoding of `value`, truncated to `width` bits.
    #[requires(width <= 64, "integer words are limited to 64 bits")]
    #[must_use]
    pub fn from_uint(width: usize, value: u64) -> Self {
        Self((0..width).map(|i| (value >> i) & 1 == 1).collect())
    }

    /// Two's complement encoding of `value`, truncated to `width` bits.
    #[requires(width <= 64, "integer words are limited to 64 bits")]
    #[must_use]
    pub fn from_int(width: usize, value: i64) -> Self {
        Self((0..width).map(|i| (value >> i) & 1 == 1).collect())
    }

    /// Number of bits.
    #[must_use]
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// The bits, least significant first.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// The bit at `index`, if the word is wide enough.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// Interpret the word as an unsigned integer.
    #[requires(self.width() <= 64, "integer words are limited to 64 bits")]
    #[must_use]
    pub fn to_uint(&self) -> u64 {
        self.0
            .iter()
            .enumerate()
            .fold(0, |acc, (i, &bit)| acc | (u64::from(bit) << i))
    }

    /// Interpret the word as a two's complement integer.
    #[requires(self.width() <= 64, "integer words are limited to 64 bits")]
    #[must_use]
    pub fn to_int(&self) -> i64 {
        let raw = self.to_uint();
        let width = self.width();
        if width == 0 || width == 64 || !self.0[width - 1] {
            raw as i64
        } else {
            (raw | (u64::MAX << width)) as i64
        }
    }
}

impl From<bool> for Word {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}'b", self.width())?;
        for bit in self.0.iter().rev() {
            write!(f, "{}", u8::from(*bit))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_uint_bits_are_lsb_first() {
        let word = Word::from_uint(3, 6);
        assert_eq!(word.bits(), &[false, true, true]);
        assert_eq!(word.to_uint(), 6);
    }

    #[test]
    fn test_uint_truncates() {
        assert_eq!(Word::from_uint(3, 9).to_uint(), 1);
    }

    #[test]
    fn test_signed_words() {
        assert_eq!(Word::from_int(4, -3).to_int(), -3);
        assert_eq!(Word::from_int(4, 7).to_int(), 7);
        assert_eq!(Word::from_int(4, -8).to_uint(), 8);
        assert_eq!(Word::from_int(64, i64::MIN).to_int(), i64::MIN);
    }

    #[test]
    fn test_display_is_msb_first() {
        assert_eq!(Word::from_uint(4, 3).to_string(), "4'b0011");
        assert_eq!(Word::default().to_string(), "0'b");
    }

    #[test]
    #[should_panic]
    fn test_wide_uint_rejected() {
        let _ = Word::from_uint(65, 0);
    }

    quickcheck! {
        fn prop_int_roundtrip_in_range(value: i8) -> bool {
            Word::from_int(8, i64::from(value)).to_int() == i64::from(value)
        }
    }
}
