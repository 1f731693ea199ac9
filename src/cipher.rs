//! Implements the basic RC5 routines as described in Rivest's paper
//! (https://people.csail.mit.edu/rivest/Rivest-rc5rev.pdf).  These
//! functions only deal with a single block of two words at a time.

use super::error::{Error, Result};
use super::key::KeySchedule;
use super::word::WordSize;
use super::{Block, Word};

/// An RC5 instance: a word size, a round count and the subkeys
/// expanded from one key.
#[derive(Clone, Debug)]
pub struct Rc5 {
    schedule: KeySchedule,
}

impl Rc5 {
    /// Builds a cipher from a word size given in bits.  Fails with
    /// `Error::UnsupportedWordSize` unless `word_bits` is 16, 32 or 64.
    ///
    /// # Example:
    /// ```
    /// use rc5::Rc5;
    ///
    /// assert!(Rc5::new(32, 12, b"key").is_ok());
    /// assert!(Rc5::new(24, 12, b"key").is_err());
    /// ```
    pub fn new(word_bits: u32, rounds: u32, key: &[u8]) -> Result<Rc5> {
        let word = WordSize::try_from(word_bits)?;
        Ok(Rc5::with_word_size(word, rounds, key))
    }

    pub fn with_word_size(word: WordSize, rounds: u32, key: &[u8]) -> Rc5 {
        Rc5::from_schedule(KeySchedule::new(word, rounds, key))
    }

    pub fn from_schedule(schedule: KeySchedule) -> Rc5 {
        Rc5 { schedule }
    }

    pub fn word_size(&self) -> WordSize {
        self.schedule.word_size()
    }

    pub fn rounds(&self) -> u32 {
        self.schedule.rounds()
    }

    /// Size of one block in bytes.
    pub fn block_len(&self) -> usize {
        self.word_size().block_len()
    }

    /// Encrypts one block.  The block must fit in two words.
    ///
    /// # Example:
    /// ```
    /// use rc5::Rc5;
    ///
    /// let rc5 = Rc5::new(32, 12, b"my secret key").unwrap();
    /// let plaintext = 0x1234_5678_9ABC_DEF0;
    /// let ciphertext = rc5.encrypt_block(plaintext).unwrap();
    /// assert_eq!(ciphertext, 0x92F4_D0C5_EB00_88E3);
    /// ```
    pub fn encrypt_block(&self, block: Block) -> Result<Block> {
        self.check(block)?;
        Ok(self.encipher(block))
    }

    /// Decrypts one block.  The block must fit in two words.
    ///
    /// # Example:
    /// ```
    /// use rc5::Rc5;
    ///
    /// let rc5 = Rc5::new(16, 8, b"key").unwrap();
    /// let ciphertext = rc5.encrypt_block(0xDEAD_BEEF).unwrap();
    /// assert_eq!(rc5.decrypt_block(ciphertext).unwrap(), 0xDEAD_BEEF);
    /// ```
    pub fn decrypt_block(&self, block: Block) -> Result<Block> {
        self.check(block)?;
        Ok(self.decipher(block))
    }

    /// Encrypts the halves `a` (high) and `b` (low) of a block.  Both
    /// are reduced to the word size first.
    pub fn encrypt_words(&self, a: Word, b: Word) -> (Word, Word) {
        let w = self.word_size();
        let s = self.schedule.table();

        let mut a = w.add(a & w.mask(), s[0]);
        let mut b = w.add(b & w.mask(), s[1]);
        for round in s[2..].chunks_exact(2) {
            a = w.add(w.rotl(a ^ b, b), round[0]);
            b = w.add(w.rotl(b ^ a, a), round[1]);
        }
        (a, b)
    }

    /// Decrypts the halves `a` (high) and `b` (low) of a block.
    pub fn decrypt_words(&self, a: Word, b: Word) -> (Word, Word) {
        let w = self.word_size();
        let s = self.schedule.table();

        let (mut a, mut b) = (a & w.mask(), b & w.mask());
        for round in s[2..].chunks_exact(2).rev() {
            b = w.rotr(w.sub(b, round[1]), a) ^ a;
            a = w.rotr(w.sub(a, round[0]), b) ^ b;
        }
        (w.sub(a, s[0]), w.sub(b, s[1]))
    }

    // Callers must already have reduced `block` to two words.
    pub(crate) fn encipher(&self, block: Block) -> Block {
        let w = self.word_size();
        let (a, b) = w.split(block);
        let (a, b) = self.encrypt_words(a, b);
        w.join(a, b)
    }

    pub(crate) fn decipher(&self, block: Block) -> Block {
        let w = self.word_size();
        let (a, b) = w.split(block);
        let (a, b) = self.decrypt_words(a, b);
        w.join(a, b)
    }

    pub(crate) fn check(&self, block: Block) -> Result<()> {
        let w = self.word_size();
        if block & !w.block_mask() != 0 {
            return Err(Error::BlockOutOfRange {
                block,
                bits: 2 * w.bits(),
            });
        }
        Ok(())
    }
}

#[test]
fn it_works() {
    let rc5 = Rc5::new(32, 12, &[10, 20, 30, 42]).unwrap();
    let plaintext: Block = 0x0000_012C_0000_0190;
    let ciphertext = rc5.encrypt_block(plaintext).unwrap();
    assert!(plaintext != ciphertext);
    assert_eq!(plaintext, rc5.decrypt_block(ciphertext).unwrap());
}

#[test]
fn known_answers() {
    // (word bits, rounds, key, plaintext, ciphertext)
    let vectors: &[(u32, u32, &[u8], Block, Block)] = &[
        (32, 12, &[0; 16], 0, 0xEEDB_A521_6D8F_4B15),
        (32, 12, b"my secret key", 0x1234_5678_9ABC_DEF0, 0x92F4_D0C5_EB00_88E3),
        (32, 12, b"", 0, 0x109C_FDEB_25C6_4305),
        (32, 0, b"", 0x0102_0304_0506_0708, 0x4EBC_7E7E_2323_1881),
        (16, 12, &[0; 8], 0, 0x78D8_5D4A),
        (16, 8, &[1, 2, 3], 0xDEAD_BEEF, 0xB9D2_3E29),
        (64, 24, &[0; 16], 0, 0x6460_BFC7_F5E6_1A7E_489A_DF24_4CAD_8BC4),
    ];
    for &(bits, rounds, key, plaintext, ciphertext) in vectors {
        let rc5 = Rc5::new(bits, rounds, key).unwrap();
        assert_eq!(rc5.encrypt_block(plaintext).unwrap(), ciphertext, "RC5-{}/{}", bits, rounds);
        assert_eq!(rc5.decrypt_block(ciphertext).unwrap(), plaintext, "RC5-{}/{}", bits, rounds);
    }
}

#[test]
fn words_agree_with_blocks() {
    let rc5 = Rc5::new(32, 12, b"my secret key").unwrap();
    assert_eq!(
        rc5.encrypt_words(0x1234_5678, 0x9ABC_DEF0),
        (0x92F4_D0C5, 0xEB00_88E3)
    );
    assert_eq!(
        rc5.decrypt_words(0x92F4_D0C5, 0xEB00_88E3),
        (0x1234_5678, 0x9ABC_DEF0)
    );
}

#[test]
fn rejects_blocks_wider_than_two_words() {
    let rc5 = Rc5::new(16, 12, b"key").unwrap();
    assert!(rc5.encrypt_block(0xFFFF_FFFF).is_ok());
    match rc5.encrypt_block(0x1_0000_0000) {
        Err(Error::BlockOutOfRange { bits, .. }) => assert_eq!(bits, 32),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(rc5.decrypt_block(Block::MAX).is_err());

    // Every u128 is a valid 64-bit-word block.
    let rc5 = Rc5::new(64, 12, b"key").unwrap();
    assert!(rc5.encrypt_block(Block::MAX).is_ok());
}

#[test]
fn rejects_unknown_word_sizes() {
    assert!(matches!(Rc5::new(8, 12, b""), Err(Error::UnsupportedWordSize(8))));
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn block_round_trip(
            bits in prop_oneof![Just(16u32), Just(32), Just(64)],
            rounds in 0u32..24,
            key in proptest::collection::vec(any::<u8>(), 0..40),
            block in any::<u128>(),
        ) {
            let rc5 = Rc5::new(bits, rounds, &key).unwrap();
            let block = block & rc5.word_size().block_mask();
            let ciphertext = rc5.encrypt_block(block).unwrap();
            prop_assert!(ciphertext <= rc5.word_size().block_mask());
            prop_assert_eq!(rc5.decrypt_block(ciphertext).unwrap(), block);
        }
    }
}
