//! Multi-bit signals.

use crate::aig::{Lit, translate};
use crate::Word;

/// An ordered group of literals forming one multi-bit signal, least
/// significant bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bus(Vec<Lit>);

impl Bus {
    /// Wrap a vector of literals.
    #[must_use]
    pub const fn new(bits: Vec<Lit>) -> Self {
        Self(bits)
    }

    /// A bus tied to the constant bits of `word`.
    #[must_use]
    pub fn constant(word: &Word) -> Self {
        word.bits().iter().copied().map(Lit::from_bool).collect()
    }

    /// Number of bits.
    #[must_use]
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// The literals, least significant first.
    #[must_use]
    pub fn bits(&self) -> &[Lit] {
        &self.0
    }

    /// The literal driving bit `index`.
    #[must_use]
    pub fn bit(&self, index: usize) -> Option<Lit> {
        self.0.get(index).copied()
    }

    /// Iterate over the literals.
    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.0.iter().copied()
    }

    /// Bitwise complement.
    #[must_use]
    pub fn complement(&self) -> Self {
        self.iter().map(|lit| !lit).collect()
    }

    pub(crate) fn translate(&self, map: &[Lit]) -> Self {
        self.iter().map(|lit| translate(map, lit)).collect()
    }
}

impl From<Lit> for Bus {
    fn from(lit: Lit) -> Self {
        Self(vec![lit])
    }
}

impl FromIterator<Lit> for Bus {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
