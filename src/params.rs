//! Cipher parameters and the helpers that draw fresh keys and seeds.

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::cipher::Rc5;
use super::error::{Error, Result};
use super::word::WordSize;
use super::Block;

pub const DEFAULT_ROUNDS: u32 = 12;
pub const DEFAULT_WORD_BITS: u32 = 64;
pub const DEFAULT_KEY_BITS: usize = 128;

/// Word size, round count and key length for one cipher setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub word: WordSize,
    pub rounds: u32,
    /// Key length in bytes.
    pub key_len: usize,
}

impl Default for Params {
    fn default() -> Params {
        Params {
            word: WordSize::W64,
            rounds: DEFAULT_ROUNDS,
            key_len: DEFAULT_KEY_BITS / 8,
        }
    }
}

impl Params {
    /// Validates raw settings: the word size must be 16, 32 or 64 bits
    /// and the key length a whole number of bytes.
    ///
    /// # Example:
    /// ```
    /// use rc5::{Params, WordSize};
    ///
    /// let params = Params::new(32, 20, 96).unwrap();
    /// assert_eq!(params.word, WordSize::W32);
    /// assert_eq!(params.key_len, 12);
    /// assert!(Params::new(32, 20, 100).is_err());
    /// ```
    pub fn new(word_bits: u32, rounds: u32, key_bits: usize) -> Result<Params> {
        let word = WordSize::try_from(word_bits)?;
        if key_bits % 8 != 0 {
            return Err(Error::InvalidKeyLength(key_bits));
        }
        Ok(Params {
            word,
            rounds,
            key_len: key_bits / 8,
        })
    }

    /// Builds a cipher for `key`.  The key may be any length; `key_len`
    /// only governs `generate_key`.
    pub fn cipher(&self, key: &[u8]) -> Rc5 {
        Rc5::with_word_size(self.word, self.rounds, key)
    }

    /// Draws `key_len` random bytes.
    pub fn generate_key<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0; self.key_len]);
        rng.fill_bytes(&mut key);
        key
    }

    /// Draws a random stream seed that fits in one block.
    pub fn generate_seed<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Block {
        let mut bytes = [0; 16];
        rng.fill_bytes(&mut bytes);
        Block::from_le_bytes(bytes) & self.word.block_mask()
    }
}

#[test]
fn defaults() {
    let params = Params::default();
    assert_eq!(params.word.bits(), DEFAULT_WORD_BITS);
    assert_eq!(params.rounds, 12);
    assert_eq!(params.key_len, 16);
    assert_eq!(Params::new(64, 12, 128).unwrap(), params);
}

#[test]
fn rejects_bad_settings() {
    assert!(matches!(Params::new(48, 12, 128), Err(Error::UnsupportedWordSize(48))));
    assert!(matches!(Params::new(32, 12, 127), Err(Error::InvalidKeyLength(127))));
    assert_eq!(Params::new(16, 0, 0).unwrap().key_len, 0);
}

#[test]
fn generated_material_fits() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(0xDEAD_BEEF);
    let params = Params::new(16, 12, 40).unwrap();
    let key = params.generate_key(&mut rng);
    assert_eq!(key.len(), 5);

    for _ in 0..64 {
        let seed = params.generate_seed(&mut rng);
        assert!(seed <= params.word.block_mask());
        assert!(params.cipher(&key).encrypt_block(seed).is_ok());
    }
}
