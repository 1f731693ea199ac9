//! Key expansion: turns a key of any length into the `2r + 2` subkeys
//! the block transform consumes.
//!
//! The expansion runs in three steps:
//!
//! 1. the key is zero-padded to a whole number of words and read as
//!    little-endian words `L` (at least one, even for an empty key),
//! 2. the table `S` is filled with `P, P + Q, P + 2Q, ...`,
//! 3. `L` is mixed into `S` over `3 * max(len(L), len(S))` steps.

use std::cmp::max;
use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use super::word::WordSize;
use super::Word;

/// The expanded subkey table for one (word size, rounds, key) triple.
/// It never changes after construction and is wiped on drop.
#[derive(Clone)]
pub struct KeySchedule {
    word: WordSize,
    rounds: u32,
    table: Vec<Word>,
}

impl KeySchedule {
    /// Expands `key` for a cipher with the given word size and number
    /// of rounds.
    ///
    /// # Example:
    /// ```
    /// use rc5::{KeySchedule, WordSize};
    ///
    /// let schedule = KeySchedule::new(WordSize::W32, 12, b"secret");
    /// assert_eq!(schedule.table().len(), 26);
    /// ```
    pub fn new(word: WordSize, rounds: u32, key: &[u8]) -> KeySchedule {
        let mut key_words = align(word, key);
        let mut table = extend(word, rounds);
        mix(word, &mut table, &mut key_words);
        KeySchedule { word, rounds, table }
    }

    pub fn word_size(&self) -> WordSize {
        self.word
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The subkeys `S[0..2r+2]`.
    pub fn table(&self) -> &[Word] {
        &self.table
    }
}

impl Drop for KeySchedule {
    fn drop(&mut self) {
        self.table.zeroize();
    }
}

impl fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySchedule")
            .field("word", &self.word)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

// Pads the key with zero bytes to a multiple of the word size and reads
// it as little-endian words.
fn align(word: WordSize, key: &[u8]) -> Zeroizing<Vec<Word>> {
    let u = word.bytes();
    let mut words: Vec<Word> = key
        .chunks(u)
        .map(|chunk| {
            chunk
                .iter()
                .rev()
                .fold(0, |acc: Word, &byte| (acc << 8) | Word::from(byte))
        })
        .collect();
    if words.is_empty() {
        words.push(0);
    }
    Zeroizing::new(words)
}

fn extend(word: WordSize, rounds: u32) -> Vec<Word> {
    let (p, q) = word.magic();
    let len = 2 * rounds as usize + 2;
    let mut table = Vec::with_capacity(len);
    table.push(p);
    for i in 1..len {
        table.push(word.add(table[i - 1], q));
    }
    table
}

fn mix(word: WordSize, table: &mut [Word], key_words: &mut [Word]) {
    let (mut a, mut b): (Word, Word) = (0, 0);
    let (mut i, mut j) = (0, 0);
    for _ in 0..3 * max(table.len(), key_words.len()) {
        table[i] = word.rotl(word.add(word.add(table[i], a), b), 3);
        a = table[i];
        let ab = word.add(a, b);
        key_words[j] = word.rotl(word.add(key_words[j], ab), ab);
        b = key_words[j];
        i = (i + 1) % table.len();
        j = (j + 1) % key_words.len();
    }
}

#[test]
fn table_has_two_words_per_round_plus_two() {
    for rounds in [0, 1, 12, 20] {
        let schedule = KeySchedule::new(WordSize::W32, rounds, b"key");
        assert_eq!(schedule.table().len(), 2 * rounds as usize + 2);
    }
}

#[test]
fn unmixed_table_steps_by_q() {
    let table = extend(WordSize::W16, 2);
    assert_eq!(table, vec![0xB7E1, 0x5618, 0xF44F, 0x9286, 0x30BD, 0xCEF4]);
}

#[test]
fn key_words_are_little_endian_and_zero_padded() {
    let words = align(WordSize::W32, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(*words, vec![0x0403_0201, 0x0000_0005]);

    let words = align(WordSize::W16, &[]);
    assert_eq!(*words, vec![0]);
}

#[test]
fn zero_rounds_keeps_only_whitening_words() {
    let schedule = KeySchedule::new(WordSize::W32, 0, b"");
    assert_eq!(schedule.table(), &[0x4DBA_7B7A, 0x1E1D_1179]);
}

#[test]
fn empty_key_matches_single_zero_word() {
    let empty = KeySchedule::new(WordSize::W32, 12, b"");
    assert_eq!(empty.table(), KeySchedule::new(WordSize::W32, 12, &[0]).table());
    assert_eq!(empty.table(), KeySchedule::new(WordSize::W32, 12, &[0; 4]).table());
    // A second zero word shifts which key word each step mixes in.
    assert_ne!(empty.table(), KeySchedule::new(WordSize::W32, 12, &[0; 8]).table());
}

#[test]
fn subkeys_fit_in_word() {
    let schedule = KeySchedule::new(WordSize::W16, 16, b"some longer key material");
    assert!(schedule.table().iter().all(|&s| s <= WordSize::W16.mask()));
}

#[test]
fn pinned_first_subkey() {
    let schedule = KeySchedule::new(WordSize::W32, 12, &[0; 16]);
    assert_eq!(schedule.table()[0], 0x9BBB_D8C8);
}

#[test]
fn one_key_bit_flips_many_subkey_bits() {
    let key = *b"0123456789abcdef";
    let mut flipped = key;
    flipped[7] ^= 0x10;

    let a = KeySchedule::new(WordSize::W32, 12, &key);
    let b = KeySchedule::new(WordSize::W32, 12, &flipped);
    let differing: u32 = a
        .table()
        .iter()
        .zip(b.table())
        .map(|(x, y)| (x ^ y).count_ones())
        .sum();
    let total = a.table().len() as u32 * 32;
    assert!(differing > total / 4, "only {} of {} bits changed", differing, total);
    assert!(differing < total * 3 / 4, "{} of {} bits changed", differing, total);
}

#[test]
fn debug_hides_subkeys() {
    let schedule = KeySchedule::new(WordSize::W64, 1, b"k");
    let shown = format!("{:?}", schedule);
    assert!(shown.contains("W64"));
    assert!(!shown.contains("table"));
}
