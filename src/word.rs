//! Word-size arithmetic: addition and subtraction modulo 2^w, and
//! rotations by an amount reduced modulo w.  Words are carried in a
//! `u64` and every result is masked back down to `w` bits.

use std::fmt;

use super::error::Error;
use super::{Block, Word};

/// The word sizes RC5 has magic constants for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordSize {
    W16,
    W32,
    W64,
}

impl WordSize {
    /// Word size in bits.
    pub const fn bits(self) -> u32 {
        match self {
            WordSize::W16 => 16,
            WordSize::W32 => 32,
            WordSize::W64 => 64,
        }
    }

    /// Word size in bytes.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Size of one block (two words) in bytes.
    pub const fn block_len(self) -> usize {
        2 * self.bytes()
    }

    pub const fn mask(self) -> Word {
        match self {
            WordSize::W64 => Word::MAX,
            _ => (1 << self.bits()) - 1,
        }
    }

    pub const fn block_mask(self) -> Block {
        match self {
            WordSize::W64 => Block::MAX,
            _ => (1 << (2 * self.bits())) - 1,
        }
    }

    /// The (P, Q) pair: odd approximations of (e - 2) and (phi - 1)
    /// scaled by 2^w.
    pub const fn magic(self) -> (Word, Word) {
        match self {
            WordSize::W16 => (0xB7E1, 0x9E37),
            WordSize::W32 => (0xB7E1_5163, 0x9E37_79B9),
            WordSize::W64 => (0xB7E1_5162_8AED_2A6B, 0x9E37_79B9_7F4A_7C15),
        }
    }

    #[inline]
    pub fn add(self, x: Word, y: Word) -> Word {
        x.wrapping_add(y) & self.mask()
    }

    #[inline]
    pub fn sub(self, x: Word, y: Word) -> Word {
        x.wrapping_sub(y) & self.mask()
    }

    /// Rotates `x` left by `n mod w` bits.
    #[inline]
    pub fn rotl(self, x: Word, n: Word) -> Word {
        let w = self.bits();
        let n = (n % w as Word) as u32;
        if n == 0 {
            return x;
        }
        ((x << n) | (x >> (w - n))) & self.mask()
    }

    /// Rotates `x` right by `n mod w` bits.
    #[inline]
    pub fn rotr(self, x: Word, n: Word) -> Word {
        let w = self.bits();
        let n = (n % w as Word) as u32;
        if n == 0 {
            return x;
        }
        ((x >> n) | (x << (w - n))) & self.mask()
    }

    /// Splits a block into its (A, B) halves, A being the high word.
    #[inline]
    pub(crate) fn split(self, block: Block) -> (Word, Word) {
        let a = (block >> self.bits()) as Word & self.mask();
        let b = block as Word & self.mask();
        (a, b)
    }

    #[inline]
    pub(crate) fn join(self, a: Word, b: Word) -> Block {
        ((a as Block) << self.bits()) | b as Block
    }
}

impl TryFrom<u32> for WordSize {
    type Error = Error;

    fn try_from(bits: u32) -> Result<WordSize, Error> {
        match bits {
            16 => Ok(WordSize::W16),
            32 => Ok(WordSize::W32),
            64 => Ok(WordSize::W64),
            other => Err(Error::UnsupportedWordSize(other)),
        }
    }
}

impl fmt::Display for WordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[test]
fn modular_add_and_sub() {
    let w = WordSize::W16;
    assert_eq!(w.add(0xFFFF, 1), 0);
    assert_eq!(w.add(0x8000, 0x8001), 1);
    assert_eq!(w.sub(0, 1), 0xFFFF);
    assert_eq!(w.sub(5, 7), 0xFFFE);

    let w = WordSize::W64;
    assert_eq!(w.add(u64::MAX, 2), 1);
    assert_eq!(w.sub(1, 2), u64::MAX);
}

#[test]
fn rotation_amount_is_reduced_mod_w() {
    for w in [WordSize::W16, WordSize::W32, WordSize::W64] {
        let x = 0x0123_4567_89AB_CDEF & w.mask();
        let bits = w.bits() as Word;
        assert_eq!(w.rotl(x, 0), x);
        assert_eq!(w.rotl(x, bits), x);
        assert_eq!(w.rotr(x, bits), x);
        assert_eq!(w.rotl(x, bits + 3), w.rotl(x, 3));
        assert_eq!(w.rotr(x, 5 * bits + 7), w.rotr(x, 7));
        assert_eq!(w.rotl(x, Word::MAX), w.rotl(x, Word::MAX % bits));
        assert!(w.rotl(x, 11) <= w.mask());
        assert!(w.rotr(x, 11) <= w.mask());
    }
}

#[test]
fn rotation_matches_native() {
    let x: u16 = 0xB7E1;
    assert_eq!(WordSize::W16.rotl(x as Word, 3), x.rotate_left(3) as Word);
    assert_eq!(WordSize::W16.rotr(x as Word, 19), x.rotate_right(3) as Word);

    let x: u32 = 0x9E37_79B9;
    assert_eq!(WordSize::W32.rotl(x as Word, 31), x.rotate_left(31) as Word);
    assert_eq!(WordSize::W32.rotr(x as Word, 1), x.rotate_right(1) as Word);
}

#[test]
fn split_and_join() {
    let w = WordSize::W32;
    assert_eq!(w.split(0x1234_5678_9ABC_DEF0), (0x1234_5678, 0x9ABC_DEF0));
    assert_eq!(w.join(0x1234_5678, 0x9ABC_DEF0), 0x1234_5678_9ABC_DEF0);

    let w = WordSize::W64;
    assert_eq!(w.split(Block::MAX), (Word::MAX, Word::MAX));
}

#[test]
fn only_known_sizes_convert() {
    assert_eq!(WordSize::try_from(32).unwrap(), WordSize::W32);
    assert!(matches!(WordSize::try_from(8), Err(Error::UnsupportedWordSize(8))));
    assert!(matches!(WordSize::try_from(128), Err(Error::UnsupportedWordSize(128))));
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_word_size() -> impl Strategy<Value = WordSize> {
        prop_oneof![Just(WordSize::W16), Just(WordSize::W32), Just(WordSize::W64)]
    }

    proptest! {
        #[test]
        fn rotations_invert(w in any_word_size(), x in any::<u64>(), n in any::<u64>()) {
            let x = x & w.mask();
            prop_assert_eq!(w.rotr(w.rotl(x, n), n), x);
        }

        #[test]
        fn sub_inverts_add(w in any_word_size(), x in any::<u64>(), y in any::<u64>()) {
            let (x, y) = (x & w.mask(), y & w.mask());
            prop_assert_eq!(w.sub(w.add(x, y), y), x);
        }
    }
}
